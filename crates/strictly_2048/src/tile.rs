//! Numbered tiles and their per-move bookkeeping.

use super::position::Position;
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};

/// Value snapshot of a tile consumed by a merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Getters, new)]
pub struct TileOrigin {
    /// Where the consumed tile stood before the move.
    position: Position,
    /// Value the consumed tile carried.
    value: u32,
}

/// The two tiles a merged tile was produced from during the current move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Getters, new)]
pub struct MergedFrom {
    /// The tile that slid into the target.
    mover: TileOrigin,
    /// The tile that was already sitting in the merge cell.
    target: TileOrigin,
}

/// A tile on the grid.
///
/// Besides its position and value a tile carries two transient fields that
/// only mean something within a single move: the position it held when the
/// move started, and the merge that created it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    position: Position,
    value: u32,
    previous_position: Option<Position>,
    merged_from: Option<MergedFrom>,
}

impl Tile {
    /// Creates a fresh tile with no move history.
    pub fn new(position: Position, value: u32) -> Self {
        Self {
            position,
            value,
            previous_position: None,
            merged_from: None,
        }
    }

    /// Creates the tile that results from merging `mover` into `target`.
    ///
    /// The new tile sits on the target's cell with double the value. Returns
    /// `None` if the doubled value does not fit in a `u32`.
    pub fn merged(mover: &Tile, target: &Tile) -> Option<Self> {
        let value = target.value.checked_mul(2)?;
        Some(Self {
            position: target.position,
            value,
            previous_position: None,
            merged_from: Some(MergedFrom::new(
                TileOrigin::new(mover.origin(), mover.value),
                TileOrigin::new(target.origin(), target.value),
            )),
        })
    }

    /// Returns true if the two tiles could merge: equal values whose double
    /// is still representable.
    pub fn can_merge_with(&self, other: &Tile) -> bool {
        self.value == other.value && self.value.checked_mul(2).is_some()
    }

    /// Returns the current position.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Returns the tile value.
    pub fn value(&self) -> u32 {
        self.value
    }

    /// Returns the position recorded at the start of the current move.
    pub fn previous_position(&self) -> Option<Position> {
        self.previous_position
    }

    /// Returns the merge that produced this tile during the current move.
    pub fn merged_from(&self) -> Option<&MergedFrom> {
        self.merged_from.as_ref()
    }

    /// Returns true if this tile was produced by a merge this move.
    pub fn is_merged(&self) -> bool {
        self.merged_from.is_some()
    }

    /// Clears the merge marker and records the current position as the
    /// pre-move position.
    pub fn prepare_for_move(&mut self) {
        self.merged_from = None;
        self.previous_position = Some(self.position);
    }

    /// Moves the tile's recorded position.
    pub(crate) fn update_position(&mut self, position: Position) {
        self.position = position;
    }

    /// Returns true if the tile stands somewhere other than where the
    /// current move found it.
    pub fn has_moved(&self) -> bool {
        self.previous_position
            .is_some_and(|previous| previous != self.position)
    }

    /// Position the tile started the move from, falling back to where it is.
    fn origin(&self) -> Position {
        self.previous_position.unwrap_or(self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merged_tile_doubles_target() {
        let mut mover = Tile::new(Position::new(1, 0), 8);
        let mut target = Tile::new(Position::new(0, 0), 8);
        mover.prepare_for_move();
        target.prepare_for_move();

        let merged = Tile::merged(&mover, &target).expect("8 doubles");

        assert_eq!(merged.value(), 16);
        assert_eq!(merged.position(), Position::new(0, 0));
        let from = merged.merged_from().expect("merge marker set");
        assert_eq!(from.mover().position(), &Position::new(1, 0));
        assert_eq!(from.target().value(), &8);
    }

    #[test]
    fn test_prepare_clears_marker() {
        let a = Tile::new(Position::new(0, 0), 2);
        let b = Tile::new(Position::new(1, 0), 2);
        let mut merged = Tile::merged(&a, &b).expect("2 doubles");
        assert!(merged.is_merged());

        merged.prepare_for_move();

        assert!(!merged.is_merged());
        assert_eq!(merged.previous_position(), Some(Position::new(1, 0)));
    }

    #[test]
    fn test_largest_value_does_not_merge() {
        let top = 1u32 << 31;
        let a = Tile::new(Position::new(0, 0), top);
        let b = Tile::new(Position::new(1, 0), top);

        assert!(!a.can_merge_with(&b));
        assert!(Tile::merged(&b, &a).is_none());

        let c = Tile::new(Position::new(0, 0), 1 << 30);
        let d = Tile::new(Position::new(1, 0), 1 << 30);
        assert!(c.can_merge_with(&d));
        assert_eq!(Tile::merged(&d, &c).map(|tile| tile.value()), Some(top));
    }

    #[test]
    fn test_has_moved_tracks_position_change() {
        let mut tile = Tile::new(Position::new(2, 2), 4);
        assert!(!tile.has_moved());

        tile.prepare_for_move();
        assert!(!tile.has_moved());

        tile.update_position(Position::new(2, 0));
        assert!(tile.has_moved());
    }
}
