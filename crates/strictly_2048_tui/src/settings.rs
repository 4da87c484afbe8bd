//! Settings file for the terminal front end.

use crate::cli::Cli;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use strictly_2048::{ConfigError, GameConfig};
use tracing::{debug, info, instrument};

/// Front-end settings, read from TOML.
///
/// ```toml
/// save_dir = ".strictly_2048"
/// log_file = "strictly_2048.log"
///
/// [game]
/// size = 5
/// winning_value = 4096
/// ```
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct Settings {
    /// Rules of the game.
    #[serde(default)]
    game: GameConfig,

    /// Directory holding the saved game and best score.
    #[serde(default = "default_save_dir")]
    save_dir: PathBuf,

    /// File receiving log output.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,
}

fn default_save_dir() -> PathBuf {
    PathBuf::from(".strictly_2048")
}

fn default_log_file() -> PathBuf {
    PathBuf::from("strictly_2048.log")
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            save_dir: default_save_dir(),
            log_file: default_log_file(),
        }
    }
}

impl Settings {
    /// Loads settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed, or if
    /// the game section is not playable.
    #[instrument(skip(path), fields(settings_path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading settings from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read settings file: {}", e)))?;

        let settings: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse settings: {}", e)))?;
        settings.game.validate()?;

        info!(size = *settings.game.size(), "Settings loaded");
        Ok(settings)
    }

    /// Loads settings from `path`, or returns the defaults if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but is invalid.
    #[instrument(skip(path), fields(settings_path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!("No settings file; using defaults");
            Ok(Self::default())
        }
    }

    /// Applies command-line overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the overridden game is not playable.
    #[instrument(skip_all)]
    pub fn with_overrides(mut self, cli: &Cli) -> Result<Self, ConfigError> {
        if let Some(size) = cli.size {
            self.game = self.game.with_size(size);
        }
        if let Some(dir) = &cli.save_dir {
            self.save_dir = dir.clone();
        }
        if let Some(file) = &cli.log_file {
            self.log_file = file.clone();
        }
        self.game.validate()?;
        Ok(self)
    }
}
