//! Contracts for the components the game manager talks to.
//!
//! The manager consumes three collaborators: an input source producing
//! [`InputEvent`]s, a [`Presenter`] that draws state, and a [`Store`] that
//! persists the current game and the best score.

use super::error::StoreError;
use super::grid::Grid;
use super::position::Direction;
use super::state::{Metadata, Snapshot};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// A discrete command from the input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputEvent {
    /// Slide all tiles in a direction.
    Move(Direction),
    /// Abandon the current game and start a fresh one.
    Restart,
    /// Continue playing after reaching the winning tile.
    KeepPlaying,
}

/// Presentation sink.
pub trait Presenter {
    /// Draws the grid and the state summary.
    fn render(&mut self, grid: &Grid, metadata: &Metadata);

    /// Dismisses any win or game-over banner.
    fn clear_overlay(&mut self);
}

/// Persistence store for the current game and the best score.
pub trait Store {
    /// Returns the saved game, if any.
    fn load(&mut self) -> Result<Option<Snapshot>, StoreError>;

    /// Saves the current game, replacing any previous save.
    fn save(&mut self, snapshot: &Snapshot) -> Result<(), StoreError>;

    /// Forgets the saved game.
    fn clear(&mut self) -> Result<(), StoreError>;

    /// Returns the best score recorded so far (0 if none).
    fn best_score(&self) -> Result<u64, StoreError>;

    /// Records a new best score.
    fn set_best_score(&mut self, score: u64) -> Result<(), StoreError>;
}

/// Presenter that draws nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn render(&mut self, _grid: &Grid, _metadata: &Metadata) {}

    fn clear_overlay(&mut self) {}
}

/// Store that keeps everything in memory for the life of the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    snapshot: Option<Snapshot>,
    best_score: u64,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds a saved game.
    #[instrument(skip(snapshot))]
    pub fn with_snapshot(snapshot: Snapshot, best_score: u64) -> Self {
        Self {
            snapshot: Some(snapshot),
            best_score,
        }
    }

    /// Returns the saved game without consuming it.
    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }
}

impl Store for MemoryStore {
    fn load(&mut self) -> Result<Option<Snapshot>, StoreError> {
        Ok(self.snapshot.clone())
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<(), StoreError> {
        debug!(score = snapshot.score(), "Saving snapshot in memory");
        self.snapshot = Some(snapshot.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.snapshot = None;
        Ok(())
    }

    fn best_score(&self) -> Result<u64, StoreError> {
        Ok(self.best_score)
    }

    fn set_best_score(&mut self, score: u64) -> Result<(), StoreError> {
        self.best_score = score;
        Ok(())
    }
}
