//! Cell coordinates and move directions.

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::instrument;

/// A cell coordinate on the grid.
///
/// Coordinates are signed so that a step off the edge of the grid is still
/// representable; [`crate::Grid::within_bounds`] decides whether a position
/// names a real cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Column, growing to the right.
    pub x: i32,
    /// Row, growing downwards.
    pub y: i32,
}

impl Position {
    /// Creates a new position.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the neighbouring position one step along `direction`.
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.vector();
        Self::new(self.x + dx, self.y + dy)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the four directions tiles can slide in.
///
/// The discriminants are the wire codes used by input sources:
/// 0 = up, 1 = right, 2 = down, 3 = left.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::Display,
)]
#[repr(u8)]
pub enum Direction {
    /// Towards row 0.
    Up = 0,
    /// Towards the last column.
    Right = 1,
    /// Towards the last row.
    Down = 2,
    /// Towards column 0.
    Left = 3,
}

impl Direction {
    /// Returns the unit vector `(dx, dy)` for this direction.
    pub fn vector(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
        }
    }

    /// Returns the wire code of this direction.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// All four directions in wire-code order.
    pub fn all() -> impl Iterator<Item = Direction> {
        Direction::iter()
    }
}

impl TryFrom<u8> for Direction {
    type Error = DirectionError;

    #[instrument]
    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Direction::Up),
            1 => Ok(Direction::Right),
            2 => Ok(Direction::Down),
            3 => Ok(Direction::Left),
            other => Err(DirectionError::UnknownCode(other)),
        }
    }
}

/// Error produced when an input code does not name a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum DirectionError {
    /// The code is outside `0..=3`.
    #[display("Unknown direction code {}", _0)]
    UnknownCode(#[error(not(source))] u8),
}
