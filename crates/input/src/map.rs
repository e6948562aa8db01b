//! Key mapping from terminal events to game actions.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map keyboard input to game actions.
///
/// Release events are ignored on terminals that report them.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(GameAction::Quit),
            _ => None,
        };
    }

    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h' | 'H' | 'a' | 'A') => Some(GameAction::MoveLeft),
        KeyCode::Right | KeyCode::Char('l' | 'L' | 'd' | 'D') => Some(GameAction::MoveRight),
        KeyCode::Down | KeyCode::Char('j' | 'J' | 's' | 'S') => Some(GameAction::SoftDrop),

        // Rotation
        KeyCode::Up | KeyCode::Char('k' | 'K' | 'w' | 'W') => Some(GameAction::RotateCw),

        // Actions
        KeyCode::Char(' ') => Some(GameAction::HardDrop),
        KeyCode::Char('p' | 'P') => Some(GameAction::Pause),
        KeyCode::Char('r' | 'R') => Some(GameAction::Restart),
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => Some(GameAction::Quit),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    handle_key_event(key) == Some(GameAction::Quit)
}
