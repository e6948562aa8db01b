//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules of the game and nothing else. It has no
//! dependencies on UI, timers, or I/O:
//!
//! - **Deterministic**: the piece sequence comes from an injected [`PieceSource`]
//! - **Testable**: every rule can be exercised with a scripted sequence
//! - **Portable**: terminal, headless, or any other front-end can drive it
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid with collision checks, locking and line clearing
//! - [`pieces`]: matrix shapes, clockwise rotation, horizontal wall kicks
//! - [`rng`]: uniform piece selection and scripted sequences
//! - [`scoring`]: line clear points, level, gravity interval
//! - [`game_state`]: the active piece lifecycle and game flags
//! - [`high_score`]: the persistence seam for the best score
//! - [`snapshot`]: plain-data copy of a game for renderers
//!
//! # Example
//!
//! ```
//! use term_tetris_core::{GameState, SimpleRng};
//! use term_tetris_types::GameAction;
//!
//! let mut game = GameState::new(SimpleRng::new(12345));
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! // Hard drop locks immediately; the next piece is already falling.
//! assert_eq!(game.piece_id(), 2);
//! ```
//!
//! # Timing
//!
//! The engine does not keep time. A driver calls
//! [`GameState::tick`](game_state::GameState::tick) once every
//! [`GameState::drop_interval_ms`](game_state::GameState::drop_interval_ms)
//! milliseconds and re-reads the interval after each lock, since clearing
//! lines can raise the level.

pub mod board;
pub mod game_state;
pub mod high_score;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use term_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use game_state::{GameState, Tetromino};
pub use high_score::{record_high_score, HighScoreError, HighScoreStore, MemoryHighScore};
pub use pieces::{base_shape, try_rotate, Shape};
pub use rng::{PieceSource, SequenceSource, SimpleRng};
pub use scoring::{calculate_level, line_clear_score, GravityConfig};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
