//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: views draw into a plain
//! framebuffer, and the renderer flushes only what changed to the terminal.
//! No widget or layout framework is involved, which keeps the 2:1 cell
//! aspect ratio and colors under direct control.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use term_tetris_core as core;
pub use term_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
