//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. Terminals
//! repeat held keys on their own, so every press maps to exactly one action.

pub mod map;

pub use term_tetris_types as types;

pub use map::{handle_key_event, should_quit};
