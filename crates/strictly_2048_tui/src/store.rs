//! Saved game and best score kept as JSON files.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use strictly_2048::{Snapshot, Store, StoreError};
use tracing::{debug, info, instrument};

const GAME_FILE: &str = "game_state.json";
const BEST_SCORE_FILE: &str = "best_score.json";

/// [`Store`] writing one JSON file per record into a directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Opens a store in `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the directory cannot be created.
    #[instrument(skip(dir), fields(save_dir = %dir.as_ref().display()))]
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        fs::create_dir_all(dir.as_ref())?;
        info!("Opened save directory");
        Ok(Self {
            dir: dir.as_ref().to_path_buf(),
        })
    }

    /// Returns the directory holding the files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn game_path(&self) -> PathBuf {
        self.dir.join(GAME_FILE)
    }

    fn best_score_path(&self) -> PathBuf {
        self.dir.join(BEST_SCORE_FILE)
    }

    /// Deletes both the saved game and the best score.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if a file exists but cannot be removed.
    #[instrument(skip(self))]
    pub fn reset(&mut self) -> Result<(), StoreError> {
        remove_if_present(&self.game_path())?;
        remove_if_present(&self.best_score_path())?;
        info!(dir = %self.dir.display(), "Save directory reset");
        Ok(())
    }
}

/// Reads a file, mapping a missing file to `None`.
fn read_if_present(path: &Path) -> Result<Option<String>, StoreError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn remove_if_present(path: &Path) -> Result<(), StoreError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Writes through a temporary file so a crash never leaves half a save.
fn write_replacing(path: &Path, contents: &str) -> Result<(), StoreError> {
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

impl Store for JsonFileStore {
    #[instrument(skip(self))]
    fn load(&mut self) -> Result<Option<Snapshot>, StoreError> {
        let Some(text) = read_if_present(&self.game_path())? else {
            debug!("No saved game");
            return Ok(None);
        };
        let snapshot = Snapshot::from_json(&text)?;
        debug!(score = snapshot.score(), "Saved game loaded");
        Ok(Some(snapshot))
    }

    #[instrument(skip(self, snapshot))]
    fn save(&mut self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let json = snapshot.to_json()?;
        write_replacing(&self.game_path(), &json)?;
        debug!(bytes = json.len(), "Game saved");
        Ok(())
    }

    #[instrument(skip(self))]
    fn clear(&mut self) -> Result<(), StoreError> {
        remove_if_present(&self.game_path())
    }

    #[instrument(skip(self))]
    fn best_score(&self) -> Result<u64, StoreError> {
        match read_if_present(&self.best_score_path())? {
            None => Ok(0),
            Some(text) => serde_json::from_str(&text)
                .map_err(|e| StoreError::new(format!("Unreadable best score: {}", e))),
        }
    }

    #[instrument(skip(self))]
    fn set_best_score(&mut self, score: u64) -> Result<(), StoreError> {
        write_replacing(&self.best_score_path(), &score.to_string())?;
        info!(score, "New best score");
        Ok(())
    }
}
