//! Game configuration.

use super::grid::MAX_GRID_SIZE;
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Tunable parameters of a game.
///
/// Every field has a default, so a partial TOML table deserializes cleanly.
#[derive(Debug, Clone, PartialEq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct GameConfig {
    /// Side length of the square grid.
    #[serde(default = "default_size")]
    size: usize,

    /// Number of tiles spawned when a fresh game starts.
    #[serde(default = "default_start_tiles")]
    start_tiles: usize,

    /// Tile value that wins the game.
    #[serde(default = "default_winning_value")]
    winning_value: u32,

    /// Chance that a spawned tile is a 4 rather than a 2.
    #[serde(default = "default_four_probability")]
    four_probability: f64,
}

fn default_size() -> usize {
    4
}

fn default_start_tiles() -> usize {
    2
}

fn default_winning_value() -> u32 {
    2048
}

fn default_four_probability() -> f64 {
    0.1
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
            start_tiles: default_start_tiles(),
            winning_value: default_winning_value(),
            four_probability: default_four_probability(),
        }
    }
}

impl GameConfig {
    /// Checks that the configuration describes a playable game.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the size is zero or above [`MAX_GRID_SIZE`],
    /// more start tiles are requested than the grid holds, the winning value
    /// is not a power of two of at least 4, or the spawn probability lies
    /// outside `[0, 1]`.
    #[instrument(skip(self), fields(size = self.size, winning_value = self.winning_value))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size == 0 {
            return Err(ConfigError::new("Grid size must be at least 1".to_string()));
        }
        if self.size > MAX_GRID_SIZE {
            return Err(ConfigError::new(format!(
                "Grid size {} exceeds the maximum of {}",
                self.size, MAX_GRID_SIZE
            )));
        }
        let cells = self.size.checked_mul(self.size).ok_or_else(|| {
            ConfigError::new(format!("Grid size {} is too large", self.size))
        })?;
        if self.start_tiles > cells {
            return Err(ConfigError::new(format!(
                "Cannot spawn {} start tiles on a {}x{} grid",
                self.start_tiles, self.size, self.size
            )));
        }
        if self.winning_value < 4 || !self.winning_value.is_power_of_two() {
            return Err(ConfigError::new(format!(
                "Winning value {} is not a power of two of at least 4",
                self.winning_value
            )));
        }
        if !(0.0..=1.0).contains(&self.four_probability) {
            return Err(ConfigError::new(format!(
                "Four probability {} is outside [0, 1]",
                self.four_probability
            )));
        }
        debug!("Config is valid");
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
