//! Terminal Tetris (workspace facade crate).
//!
//! Re-exports the workspace crates as `term_tetris::{core,input,session,term,types}`
//! so the binary, integration tests and benches share one import root.

pub use term_tetris_core as core;
pub use term_tetris_input as input;
pub use term_tetris_session as session;
pub use term_tetris_term as term;
pub use term_tetris_types as types;
