//! Tile values are powers of two.

use super::super::Grid;
use super::Invariant;

/// Invariant: every tile value is a power of two of at least 2.
pub struct PowerOfTwoInvariant;

impl Invariant<Grid> for PowerOfTwoInvariant {
    fn holds(grid: &Grid) -> bool {
        grid.tiles()
            .all(|tile| tile.value() >= 2 && tile.value().is_power_of_two())
    }

    fn description() -> &'static str {
        "Tile values are powers of two"
    }
}
