//! Traversal order and farthest-cell search.

use super::super::{Direction, Grid, Position};
use tracing::instrument;

/// Column and row visiting order for one move.
///
/// Cells are visited column by column (`x` outer, `y` inner). Each axis runs
/// from the edge the tiles are sliding towards, so a tile is never processed
/// before the tiles in front of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Traversals {
    /// Column visiting order.
    pub x: Vec<i32>,
    /// Row visiting order.
    pub y: Vec<i32>,
}

impl Traversals {
    /// Iterates over every position in visiting order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.x
            .iter()
            .flat_map(move |&x| self.y.iter().map(move |&y| Position::new(x, y)))
    }
}

/// Builds the visiting order for a move in `direction` on a grid of `size`.
#[instrument]
pub fn build_traversals(size: usize, direction: Direction) -> Traversals {
    let mut x: Vec<i32> = (0..size as i32).collect();
    let mut y: Vec<i32> = (0..size as i32).collect();

    let (dx, dy) = direction.vector();
    if dx == 1 {
        x.reverse();
    }
    if dy == 1 {
        y.reverse();
    }

    Traversals { x, y }
}

/// Result of sliding a tile as far as it can go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FarthestPosition {
    /// Last empty cell reached, or the starting cell if it cannot move.
    pub farthest: Position,
    /// Cell just beyond `farthest`; occupied or off the grid.
    pub next: Position,
}

/// Walks from `cell` along `direction` through empty cells.
#[instrument(skip(grid))]
pub fn find_farthest_position(
    grid: &Grid,
    cell: Position,
    direction: Direction,
) -> FarthestPosition {
    let mut previous = cell;
    let mut next = cell.step(direction);
    while grid.cell_available(next) {
        previous = next;
        next = next.step(direction);
    }
    FarthestPosition {
        farthest: previous,
        next,
    }
}
