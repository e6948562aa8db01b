//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, session driver).
//!
//! # Board Dimensions
//!
//! Classic playfield dimensions:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19)
//! - New pieces spawn horizontally centered on row 0
//!
//! # Gravity Timing
//!
//! Timing values are in milliseconds and depend only on the level (1-based):
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `INITIAL_SPEED_MS` | 500 | Gravity interval at level 1 |
//! | `MIN_SPEED_MS` | 100 | Gravity floor |
//! | `LEVEL_SPEED_STEP_MS` | 50 | Interval decrement per level |
//! | `FRAME_MS` | 16 | Terminal input poll / redraw cadence |
//!
//! # Examples
//!
//! ```
//! use term_tetris_types::{PieceKind, GameAction, BOARD_WIDTH, BOARD_HEIGHT};
//!
//! // Parse from string (case-insensitive)
//! let parsed = PieceKind::from_str("t").unwrap();
//! assert_eq!(parsed, PieceKind::T);
//!
//! // Parse game action
//! let action = GameAction::from_str("moveLeft").unwrap();
//! assert_eq!(action, GameAction::MoveLeft);
//!
//! // Board dimensions
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Terminal frame interval in milliseconds (16ms ≈ 60 FPS)
pub const FRAME_MS: u32 = 16;

/// Gravity interval at level 1.
pub const INITIAL_SPEED_MS: u32 = 500;

/// Gravity never gets faster than this.
pub const MIN_SPEED_MS: u32 = 100;

/// Gravity interval decrement per level above 1.
pub const LEVEL_SPEED_STEP_MS: u32 = 50;

/// Lines needed to advance one level.
pub const LINES_PER_LEVEL: u32 = 10;

/// Horizontal offsets tried, in order, when a rotation does not fit in place.
pub const WALL_KICKS: [i8; 5] = [0, -1, 1, -2, 2];

/// Line clear scoring table
///
/// Base points for clearing N lines at level 1:
/// - 0 lines: 0 points
/// - 1 line: 100 points
/// - 2 lines: 300 points
/// - 3 lines: 600 points
/// - 4 lines: 1000 points (Tetris!)
///
/// Points are multiplied by the current level.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 600, 1000];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gravity_defaults() {
        assert_eq!(INITIAL_SPEED_MS, 500);
        assert_eq!(MIN_SPEED_MS, 100);
        assert_eq!(LEVEL_SPEED_STEP_MS, 50);
        assert!(MIN_SPEED_MS <= INITIAL_SPEED_MS);
    }

    #[test]
    fn kick_order_starts_in_place() {
        assert_eq!(WALL_KICKS[0], 0);
        assert_eq!(WALL_KICKS, [0, -1, 1, -2, 2]);
    }

    #[test]
    fn piece_kind_string_roundtrip() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(PieceKind::from_str("X"), None);
    }

    #[test]
    fn action_parsing_is_case_insensitive() {
        assert_eq!(GameAction::from_str("HARDDROP"), Some(GameAction::HardDrop));
        assert_eq!(GameAction::from_str("togglePause"), Some(GameAction::Pause));
        assert_eq!(GameAction::from_str("jump"), None);
    }
}

/// The seven tetromino piece kinds
///
/// Each piece has a distinct shape and color:
/// - **I**: Cyan, horizontal bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Magenta, T-shaped
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// Every kind, in catalog order. Uniform selection indexes into this.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use term_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }

    /// Compact 1-based code used by `u8` board grids (0 = empty).
    pub fn code(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::T => 3,
            PieceKind::S => 4,
            PieceKind::Z => 5,
            PieceKind::J => 6,
            PieceKind::L => 7,
        }
    }

    /// Inverse of [`PieceKind::code`].
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1..=7 => Some(Self::ALL[(code - 1) as usize]),
            _ => None,
        }
    }
}

/// Commands accepted by a game.
///
/// These arrive from the keyboard (or a scripted driver) and are serialized
/// with gravity ticks onto a single game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one cell down
    SoftDrop,
    /// Instantly drop piece to lowest valid position and lock it
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Toggle pause state
    Pause,
    /// Start a fresh game
    Restart,
    /// Leave the game (handled by the driver)
    Quit,
}

impl GameAction {
    /// Parse action from a camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use term_tetris_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotateCw"), Some(GameAction::RotateCw));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotatecw" => Some(GameAction::RotateCw),
            "pause" | "togglepause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            "quit" => Some(GameAction::Quit),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
            GameAction::Quit => "quit",
        }
    }
}

/// Result of a gravity tick or a locking command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Nothing happened (not started, paused, or already over).
    Idle,
    /// The active piece fell one row.
    Fell,
    /// The piece locked, `lines` rows were cleared, and the next piece spawned.
    Locked { lines: u32 },
    /// The next piece could not spawn.
    GameOver,
}

impl StepOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepOutcome::Idle => "idle",
            StepOutcome::Fell => "fell",
            StepOutcome::Locked { .. } => "locked",
            StepOutcome::GameOver => "game_over",
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled by a locked piece of that kind
pub type Cell = Option<PieceKind>;
