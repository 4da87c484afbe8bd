//! Strictly 2048 - rules engine for the sliding-tile merge puzzle
//!
//! Tiles carrying powers of two slide across a square grid; equal tiles that
//! collide merge into one of double the value, a new tile appears after
//! every move that changes the grid, and the game ends once nothing can move.
//!
//! # Architecture
//!
//! - **Grid**: the N×N cell container with placement primitives, no rules
//! - **Rules**: traversal order, farthest-cell search, terminal detection
//! - **GameManager**: move resolution, scoring, and game lifecycle
//! - **Collaborators**: [`Presenter`] and [`Store`] traits, plus
//!   [`InputEvent`]s fed to the manager
//!
//! # Example
//!
//! ```
//! use strictly_2048::{
//!     Direction, GameConfig, GameManager, MemoryStore, NullPresenter, SeededRandom,
//! };
//!
//! let mut game = GameManager::new(
//!     GameConfig::default(),
//!     NullPresenter,
//!     MemoryStore::new(),
//!     SeededRandom::from_seed(42),
//! )
//! .expect("default config is valid");
//!
//! let outcome = game.make_move(Direction::Left);
//! println!("score {} (moved: {})", game.state().score(), outcome.is_effective());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod collaborators;
mod config;
mod contracts;
mod error;
mod game;
mod grid;
mod position;
mod random;
mod state;
mod tile;

pub mod invariants;
pub mod rules;

// Crate-level exports - Geometry
pub use position::{Direction, DirectionError, Position};

// Crate-level exports - Board
pub use grid::{CellContent, Grid, GridSnapshot, MAX_GRID_SIZE, TileSnapshot};
pub use tile::{MergedFrom, Tile, TileOrigin};

// Crate-level exports - Game
pub use config::{ConfigError, GameConfig};
pub use contracts::MoveContract;
pub use game::{GameManager, MoveOutcome};
pub use state::{GameState, GameStatus, Metadata, Snapshot};

// Crate-level exports - Collaborators
pub use collaborators::{InputEvent, MemoryStore, NullPresenter, Presenter, Store};
pub use random::{RandomSource, ScriptedRandom, SeededRandom};

// Crate-level exports - Errors
pub use error::{SnapshotError, StoreError};
