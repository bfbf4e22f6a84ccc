//! Key mapping for the race screen.
//!
//! Translates crossterm key events into UI-agnostic commands. Anything not
//! listed here is ignored.

use crate::racer::RaceInput;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks the application to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Race(RaceInput),
    Quit,
}

/// Map a key event to an action. Releases and unknown keys return `None`.
pub fn map_key(key: KeyEvent) -> Option<AppAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(AppAction::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Char('h') => {
            Some(AppAction::Race(RaceInput::SteerLeft))
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Char('l') => {
            Some(AppAction::Race(RaceInput::SteerRight))
        }
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(AppAction::Race(RaceInput::Start))
        }
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(AppAction::Quit),
        _ => None,
    }
}
