//! Keyboard mapping

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::Command;

/// Map a key event to a navigation command. Unbound keys return `None`.
pub fn key_to_command(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Command::Quit),
            _ => None,
        };
    }

    match key.code {
        // Arrows and vi keys
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('w') => Some(Command::StepForward),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('s') => Some(Command::StepBack),
        KeyCode::Left | KeyCode::Char('h') => Some(Command::TurnLeft),
        KeyCode::Right | KeyCode::Char('l') => Some(Command::TurnRight),

        KeyCode::Char('a') => Some(Command::StrafeLeft),
        KeyCode::Char('d') => Some(Command::StrafeRight),

        KeyCode::Char('>') => Some(Command::Descend),
        KeyCode::Char('<') => Some(Command::Ascend),

        KeyCode::Char('m') => Some(Command::ToggleMap),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}
