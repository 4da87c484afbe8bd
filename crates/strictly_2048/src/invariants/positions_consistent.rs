//! Each tile's recorded position matches the slot holding it.

use super::super::{Grid, Position};
use super::Invariant;

/// Invariant: a tile's recorded position is the slot it occupies.
pub struct PositionsConsistentInvariant;

impl Invariant<Grid> for PositionsConsistentInvariant {
    fn holds(grid: &Grid) -> bool {
        let mut consistent = true;
        grid.each_cell(|x, y, tile| {
            if let Some(tile) = tile
                && tile.position() != Position::new(x, y)
            {
                consistent = false;
            }
        });
        consistent
    }

    fn description() -> &'static str {
        "Tile positions match their grid slots"
    }
}
