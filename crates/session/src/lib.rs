//! Session driver: runs one game as a tokio task.
//!
//! - [`config`]: environment-driven settings
//! - [`session`]: the task that serializes commands and gravity ticks
//! - [`runtime`]: owns the tokio runtime for a synchronous front-end
//! - [`high_score`]: JSON file persistence for the best score
//! - [`event_log`]: JSON-lines event log writer

pub mod config;
pub mod event_log;
pub mod high_score;
pub mod runtime;
pub mod session;

pub use term_tetris_core as core;
pub use term_tetris_types as types;

pub use config::SessionConfig;
pub use event_log::{EventLog, LogRecord};
pub use high_score::{open_store, FileHighScore};
pub use runtime::SessionRuntime;
pub use session::{Session, SessionHandle, SessionSummary};
