//! Terminal-state detection.

use super::super::{Direction, Grid};
use tracing::instrument;

/// Returns true if any tile has an orthogonal neighbour it can merge with.
///
/// All four directions are probed from every occupied cell.
#[instrument(skip(grid))]
pub fn tile_matches_available(grid: &Grid) -> bool {
    grid.tiles().any(|tile| {
        Direction::all().any(|direction| {
            grid.cell_content(tile.position().step(direction))
                .tile()
                .is_some_and(|other| other.can_merge_with(tile))
        })
    })
}

/// Returns true if some move could still change the grid.
#[instrument(skip(grid))]
pub fn moves_available(grid: &Grid) -> bool {
    grid.cells_available() || tile_matches_available(grid)
}
