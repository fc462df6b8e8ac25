//! Input handling - convert key events to actions
//!
//! Holding a key produces press and repeat events; both count, so movement
//! keeps going while the key is down. Releases are ignored.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use delve_core::{Command, Direction};

/// Something the player asked for while in the game screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Forwarded to the dungeon state
    Game(Command),
    ToggleInventory,
    ToggleOptions,
    ToggleFullMap,
    NewDungeon,
    /// Leave the current screen
    Back,
    Quit,
}

/// Check if the event is a press or an auto-repeat
pub fn is_actionable(key: &KeyEvent) -> bool {
    matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat)
}

/// Convert a key event to an action on the game screen
pub fn key_to_action(key: KeyEvent) -> Option<Action> {
    if !is_actionable(&key) {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => {
            Some(Action::Game(Command::Move(Direction::Up)))
        }
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => {
            Some(Action::Game(Command::Move(Direction::Down)))
        }
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
            Some(Action::Game(Command::Move(Direction::Left)))
        }
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
            Some(Action::Game(Command::Move(Direction::Right)))
        }

        KeyCode::Char('t') => Some(Action::Game(Command::ToggleLineOfSight)),
        KeyCode::Char('i') => Some(Action::ToggleInventory),
        KeyCode::Char('o') => Some(Action::ToggleOptions),
        KeyCode::Char('m') => Some(Action::ToggleFullMap),
        KeyCode::Char('n') => Some(Action::NewDungeon),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Back),

        _ => None,
    }
}
