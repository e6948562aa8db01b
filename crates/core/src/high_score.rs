//! High score persistence capability.
//!
//! The engine only needs to read a single integer at startup and offer the
//! final score when a game ends. Storage media live outside the core; this
//! module defines the seam and the keep-the-maximum rule.

use std::fmt;

/// Failure to persist a high score.
#[derive(Debug)]
pub enum HighScoreError {
    Io(std::io::Error),
    Format(String),
}

impl fmt::Display for HighScoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HighScoreError::Io(e) => write!(f, "high score i/o error: {}", e),
            HighScoreError::Format(msg) => write!(f, "high score format error: {}", msg),
        }
    }
}

impl std::error::Error for HighScoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HighScoreError::Io(e) => Some(e),
            HighScoreError::Format(_) => None,
        }
    }
}

impl From<std::io::Error> for HighScoreError {
    fn from(e: std::io::Error) -> Self {
        HighScoreError::Io(e)
    }
}

/// A place to keep the best score across sessions.
///
/// `load` never fails: unreadable storage reads as 0.
pub trait HighScoreStore {
    fn load(&self) -> u32;
    fn save(&mut self, score: u32) -> Result<(), HighScoreError>;
}

/// Offer `score` to `store`; it is written only if it beats the stored value.
///
/// Returns true when a new record was saved. Write failures leave the store
/// untouched and report false.
pub fn record_high_score<S: HighScoreStore + ?Sized>(store: &mut S, score: u32) -> bool {
    if score <= store.load() {
        return false;
    }
    store.save(score).is_ok()
}

/// In-process store, used when persistence is disabled and in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScore {
    value: u32,
}

impl MemoryHighScore {
    pub fn new(value: u32) -> Self {
        Self { value }
    }
}

impl HighScoreStore for MemoryHighScore {
    fn load(&self) -> u32 {
        self.value
    }

    fn save(&mut self, score: u32) -> Result<(), HighScoreError> {
        self.value = score;
        Ok(())
    }
}

impl<S: HighScoreStore + ?Sized> HighScoreStore for Box<S> {
    fn load(&self) -> u32 {
        (**self).load()
    }

    fn save(&mut self, score: u32) -> Result<(), HighScoreError> {
        (**self).save(score)
    }
}
