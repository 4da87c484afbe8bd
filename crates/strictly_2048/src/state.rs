//! Game state, its status, and its persisted snapshot.

use super::error::SnapshotError;
use super::grid::{Grid, GridSnapshot};
use super::rules;
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Where a game stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum GameStatus {
    /// Moves are accepted.
    Playing,
    /// A winning tile exists and the player has not chosen to continue.
    Won,
    /// No move can change the grid.
    Over,
}

/// Complete mutable state of one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub(crate) grid: Grid,
    pub(crate) score: u64,
    pub(crate) over: bool,
    pub(crate) won: bool,
    pub(crate) keep_playing: bool,
}

impl GameState {
    /// Creates the state of a game that has not had any tiles spawned yet.
    #[instrument]
    pub fn empty(size: usize) -> Self {
        Self {
            grid: Grid::new(size),
            score: 0,
            over: false,
            won: false,
            keep_playing: false,
        }
    }

    /// Returns the grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the score.
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Returns true once no move is possible.
    pub fn over(&self) -> bool {
        self.over
    }

    /// Returns true once the winning tile has been reached.
    pub fn won(&self) -> bool {
        self.won
    }

    /// Returns true if the player chose to continue after winning.
    pub fn keep_playing(&self) -> bool {
        self.keep_playing
    }

    /// Returns true if moves are no longer accepted.
    pub fn is_terminated(&self) -> bool {
        self.over || (self.won && !self.keep_playing)
    }

    /// Summarises the state as a [`GameStatus`].
    pub fn status(&self) -> GameStatus {
        if self.over {
            GameStatus::Over
        } else if self.won && !self.keep_playing {
            GameStatus::Won
        } else {
            GameStatus::Playing
        }
    }

    /// Converts the state to its persisted form.
    #[instrument(skip(self), fields(score = self.score))]
    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            grid: self.grid.to_snapshot(),
            score: self.score,
            over: self.over,
            won: self.won,
            keep_playing: self.keep_playing,
        }
    }

    /// Rebuilds a state from its persisted form.
    ///
    /// The stored `over` flag is not trusted: it is recomputed from the
    /// restored grid.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] if the grid part is malformed.
    #[instrument(skip(snapshot), fields(score = snapshot.score))]
    pub fn from_snapshot(snapshot: &Snapshot) -> Result<Self, SnapshotError> {
        let grid = Grid::from_snapshot(&snapshot.grid)?;
        let over = !rules::moves_available(&grid);
        if over != snapshot.over {
            debug!(stored = snapshot.over, computed = over, "Stored over flag corrected");
        }
        Ok(Self {
            grid,
            score: snapshot.score,
            over,
            won: snapshot.won,
            keep_playing: snapshot.keep_playing,
        })
    }
}

/// The sole persisted representation of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    grid: GridSnapshot,
    score: u64,
    over: bool,
    won: bool,
    keep_playing: bool,
}

impl Snapshot {
    /// Serializes the snapshot to JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] if serialization fails.
    #[instrument(skip(self))]
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a snapshot from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] if the text is not a snapshot.
    #[instrument(skip(json), fields(len = json.len()))]
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// State summary handed to the presentation sink with every render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    score: u64,
    over: bool,
    won: bool,
    best_score: u64,
    terminated: bool,
}
