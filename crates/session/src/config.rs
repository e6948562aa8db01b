//! Session configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::core::GravityConfig;

/// File name used under `$HOME` when no high score path is given.
pub const DEFAULT_HIGH_SCORE_FILE: &str = ".term-tetris-highscore.json";

/// Session configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Piece RNG seed; `None` derives one from the clock.
    pub seed: Option<u32>,
    pub gravity: GravityConfig,
    /// High score file; `None` keeps the record in memory only.
    pub high_score_path: Option<PathBuf>,
    /// JSON-lines event log; `None` disables logging.
    pub log_path: Option<String>,
    /// Capacity of the command channel.
    pub max_pending_commands: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: None,
            gravity: GravityConfig::default(),
            high_score_path: None,
            log_path: None,
            max_pending_commands: 32,
        }
    }
}

impl SessionConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup; unparsable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let parse_u32 = |key: &str, default: u32| {
            lookup(key)
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(default)
        };

        let seed = lookup("TETRIS_SEED").and_then(|s| s.trim().parse().ok());

        let gravity = GravityConfig {
            initial_ms: parse_u32("TETRIS_INITIAL_SPEED_MS", defaults.gravity.initial_ms),
            min_ms: parse_u32("TETRIS_MIN_SPEED_MS", defaults.gravity.min_ms),
            step_ms: parse_u32("TETRIS_LEVEL_SPEED_STEP_MS", defaults.gravity.step_ms),
        };

        let high_score_path = match lookup("TETRIS_HIGH_SCORE_PATH") {
            Some(s) => Some(s.trim().to_string())
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),
            None => lookup("HOME")
                .filter(|h| !h.is_empty())
                .map(|home| PathBuf::from(home).join(DEFAULT_HIGH_SCORE_FILE)),
        };

        let log_path = lookup("TETRIS_LOG_PATH")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let max_pending_commands = lookup("TETRIS_MAX_PENDING")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .unwrap_or(defaults.max_pending_commands)
            .max(1);

        Self {
            seed,
            gravity,
            high_score_path,
            log_path,
            max_pending_commands,
        }
    }

    /// The configured seed, or one derived from the current time.
    pub fn resolve_seed(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            let nanos = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos();
            (nanos as u32) ^ std::process::id()
        })
    }
}
