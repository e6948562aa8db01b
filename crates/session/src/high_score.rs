//! File-backed high score store.
//!
//! The file holds a single JSON object, `{"high_score": N}`. Missing or
//! corrupt files read as 0. Writes go to a sibling temp file which is then
//! renamed over the target, so a crash never leaves a half-written record.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::{HighScoreError, HighScoreStore, MemoryHighScore};

#[derive(Debug, Serialize, Deserialize)]
struct HighScoreFile {
    high_score: u32,
}

#[derive(Debug, Clone)]
pub struct FileHighScore {
    path: PathBuf,
}

impl FileHighScore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored value, reporting why it could not be read.
    pub fn try_load(&self) -> Result<u32, HighScoreError> {
        let bytes = fs::read(&self.path)?;
        let file: HighScoreFile =
            serde_json::from_slice(&bytes).map_err(|e| HighScoreError::Format(e.to_string()))?;
        Ok(file.high_score)
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl HighScoreStore for FileHighScore {
    fn load(&self) -> u32 {
        self.try_load().unwrap_or(0)
    }

    fn save(&mut self, score: u32) -> Result<(), HighScoreError> {
        let body = serde_json::to_vec(&HighScoreFile { high_score: score })
            .map_err(|e| HighScoreError::Format(e.to_string()))?;

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }

        let tmp = self.temp_path();
        fs::write(&tmp, &body)?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }
}

/// Store selected by configuration: a file when a path is set, memory otherwise.
pub fn open_store(path: Option<&Path>) -> Box<dyn HighScoreStore + Send> {
    match path {
        Some(p) => Box::new(FileHighScore::new(p)),
        None => Box::new(MemoryHighScore::default()),
    }
}
