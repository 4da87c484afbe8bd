//! The N×N cell container and its placement primitives.
//!
//! The grid knows nothing about game rules. It stores at most one tile per
//! cell, keeps each tile's recorded position in step with its slot, and
//! converts to and from the sparse snapshot form used for persistence.

use super::error::SnapshotError;
use super::position::Position;
use super::random::RandomSource;
use super::tile::Tile;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// What a position on the grid holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellContent<'a> {
    /// The position lies outside the grid.
    OutOfBounds,
    /// The cell exists and holds no tile.
    Empty,
    /// The cell holds a tile.
    Occupied(&'a Tile),
}

impl<'a> CellContent<'a> {
    /// Returns the tile, if any.
    pub fn tile(self) -> Option<&'a Tile> {
        match self {
            CellContent::Occupied(tile) => Some(tile),
            CellContent::Empty | CellContent::OutOfBounds => None,
        }
    }
}

/// Largest supported side length.
pub const MAX_GRID_SIZE: usize = 256;

/// Square board of optional tiles, stored row-major.
///
/// Tiles only move through the grid, so a tile's recorded position cannot
/// drift away from its slot:
///
/// ```compile_fail
/// use strictly_2048::{Grid, Position, Tile};
///
/// let mut grid = Grid::new(2);
/// grid.insert_tile(Tile::new(Position::new(0, 0), 2));
/// for tile in grid.tiles_mut() {
///     tile.update_position(Position::new(1, 1));
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<Option<Tile>>,
}

impl Grid {
    /// Creates an empty grid with `size` × `size` cells.
    ///
    /// Sizes above [`MAX_GRID_SIZE`] are clamped to it.
    #[instrument]
    pub fn new(size: usize) -> Self {
        let size = size.min(MAX_GRID_SIZE);
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    /// Returns the side length.
    pub fn size(&self) -> usize {
        self.size
    }

    fn index(&self, position: Position) -> Option<usize> {
        self.within_bounds(position)
            .then(|| position.y as usize * self.size + position.x as usize)
    }

    /// Returns true if the position names a cell of this grid.
    pub fn within_bounds(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && (position.x as usize) < self.size
            && (position.y as usize) < self.size
    }

    /// Returns what the position holds. Never panics, even off the grid.
    pub fn cell_content(&self, position: Position) -> CellContent<'_> {
        match self.index(position) {
            None => CellContent::OutOfBounds,
            Some(index) => match &self.cells[index] {
                Some(tile) => CellContent::Occupied(tile),
                None => CellContent::Empty,
            },
        }
    }

    /// Returns true if the position is on the grid and empty.
    pub fn cell_available(&self, position: Position) -> bool {
        matches!(self.cell_content(position), CellContent::Empty)
    }

    /// Returns true if at least one cell is empty.
    pub fn cells_available(&self) -> bool {
        self.cells.iter().any(Option::is_none)
    }

    /// Lists every empty cell in row-major order.
    pub fn available_cells(&self) -> Vec<Position> {
        let mut available = Vec::new();
        self.each_cell(|x, y, tile| {
            if tile.is_none() {
                available.push(Position::new(x, y));
            }
        });
        available
    }

    /// Picks one empty cell uniformly at random.
    ///
    /// Returns `None` when the grid is full.
    #[instrument(skip(self, rng))]
    pub fn random_available_cell<R: RandomSource + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Option<Position> {
        let available = self.available_cells();
        if available.is_empty() {
            return None;
        }
        let chosen = available[rng.pick(available.len())];
        debug!(position = %chosen, free = available.len(), "Picked free cell");
        Some(chosen)
    }

    /// Places a tile at its recorded position, replacing whatever was there.
    ///
    /// Tiles whose position lies off the grid are dropped.
    pub fn insert_tile(&mut self, tile: Tile) {
        if let Some(index) = self.index(tile.position()) {
            self.cells[index] = Some(tile);
        }
    }

    /// Clears the slot at the tile's recorded position.
    pub fn remove_tile(&mut self, tile: &Tile) -> Option<Tile> {
        self.take(tile.position())
    }

    /// Removes and returns the tile at a position.
    pub fn take(&mut self, position: Position) -> Option<Tile> {
        let index = self.index(position)?;
        self.cells[index].take()
    }

    /// Moves the tile at `from` to the empty cell `to`, updating its
    /// recorded position.
    pub fn move_tile(&mut self, from: Position, to: Position) {
        if from == to {
            return;
        }
        if let Some(mut tile) = self.take(from) {
            tile.update_position(to);
            self.insert_tile(tile);
        }
    }

    /// Visits every cell once in row-major order.
    pub fn each_cell<F>(&self, mut visitor: F)
    where
        F: FnMut(i32, i32, Option<&Tile>),
    {
        for y in 0..self.size {
            for x in 0..self.size {
                visitor(x as i32, y as i32, self.cells[y * self.size + x].as_ref());
            }
        }
    }

    /// Iterates over the occupying tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.cells.iter().flatten()
    }

    /// Iterates mutably over the occupying tiles.
    pub(crate) fn tiles_mut(&mut self) -> impl Iterator<Item = &mut Tile> {
        self.cells.iter_mut().flatten()
    }

    /// Returns the tile values in row-major order, 0 for empty cells.
    pub fn values(&self) -> Vec<u32> {
        self.cells
            .iter()
            .map(|cell| cell.as_ref().map_or(0, Tile::value))
            .collect()
    }

    /// Converts the grid to its sparse persisted form.
    #[instrument(skip(self), fields(size = self.size))]
    pub fn to_snapshot(&self) -> GridSnapshot {
        let cells = (0..self.size)
            .map(|x| {
                (0..self.size)
                    .map(|y| {
                        self.cell_content(Position::new(x as i32, y as i32))
                            .tile()
                            .map(TileSnapshot::from)
                    })
                    .collect()
            })
            .collect();
        GridSnapshot {
            size: self.size,
            cells,
        }
    }

    /// Rebuilds a grid from its persisted form.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] if the size is zero or above
    /// [`MAX_GRID_SIZE`], the cell matrix does not
    /// match the size, a tile's coordinates disagree with its slot, or a
    /// tile value is not a power of two of at least 2.
    #[instrument(skip(snapshot), fields(size = snapshot.size))]
    pub fn from_snapshot(snapshot: &GridSnapshot) -> Result<Self, SnapshotError> {
        let size = snapshot.size;
        if size == 0 {
            return Err(SnapshotError::new("Grid size must be positive"));
        }
        if size > MAX_GRID_SIZE {
            return Err(SnapshotError::new(format!(
                "Grid size {} exceeds the maximum of {}",
                size, MAX_GRID_SIZE
            )));
        }
        if snapshot.cells.len() != size {
            return Err(SnapshotError::new(format!(
                "Expected {} columns, found {}",
                size,
                snapshot.cells.len()
            )));
        }

        if let Some((x, column)) = snapshot
            .cells
            .iter()
            .enumerate()
            .find(|(_, column)| column.len() != size)
        {
            return Err(SnapshotError::new(format!(
                "Column {} has {} cells, expected {}",
                x,
                column.len(),
                size
            )));
        }

        let mut grid = Grid::new(size);
        for (x, column) in snapshot.cells.iter().enumerate() {
            for (y, cell) in column.iter().enumerate() {
                let Some(tile) = cell else { continue };
                if tile.x as usize != x || tile.y as usize != y || tile.x < 0 || tile.y < 0 {
                    return Err(SnapshotError::new(format!(
                        "Tile at ({}, {}) stored in slot ({}, {})",
                        tile.x, tile.y, x, y
                    )));
                }
                if tile.value < 2 || !tile.value.is_power_of_two() {
                    return Err(SnapshotError::new(format!(
                        "Tile value {} is not a power of two",
                        tile.value
                    )));
                }
                grid.insert_tile(Tile::new(Position::new(tile.x, tile.y), tile.value));
            }
        }

        debug!(tiles = grid.tiles().count(), "Grid restored from snapshot");
        Ok(grid)
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for y in 0..self.size {
            let row = (0..self.size)
                .map(|x| match &self.cells[y * self.size + x] {
                    Some(tile) => format!("{:>5}", tile.value()),
                    None => format!("{:>5}", "."),
                })
                .collect::<String>();
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

/// Persisted form of a single tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct TileSnapshot {
    x: i32,
    y: i32,
    value: u32,
}

impl From<&Tile> for TileSnapshot {
    fn from(tile: &Tile) -> Self {
        Self {
            x: tile.position().x,
            y: tile.position().y,
            value: tile.value(),
        }
    }
}

/// Persisted form of a grid.
///
/// `cells` is indexed column first: `cells[x][y]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct GridSnapshot {
    size: usize,
    cells: Vec<Vec<Option<TileSnapshot>>>,
}
