//! Key mapping from terminal events to player commands.
//!
//! Three layouts are accepted at once: arrow keys, vi keys (`hjkl`) and
//! `wasd`. Letters match in either case. "Up" in each layout rotates.

use crate::types::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Letter bindings as `(arrow-equivalent command, vi key, wasd key)`
const LETTERS: [(Command, char, char); 4] = [
    (Command::MoveLeft, 'h', 'a'),
    (Command::SoftDrop, 'j', 's'),
    (Command::Rotate, 'k', 'w'),
    (Command::MoveRight, 'l', 'd'),
];

/// Map a key press to a command, or `None` for unbound keys.
///
/// Presses with Ctrl or Alt held are never commands.
pub fn handle_key_event(key: KeyEvent) -> Option<Command> {
    if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return None;
    }

    match key.code {
        KeyCode::Left => Some(Command::MoveLeft),
        KeyCode::Right => Some(Command::MoveRight),
        KeyCode::Down => Some(Command::SoftDrop),
        KeyCode::Up => Some(Command::Rotate),
        KeyCode::Char(ch) => {
            let ch = ch.to_ascii_lowercase();
            LETTERS
                .iter()
                .find(|&&(_, vi, wasd)| ch == vi || ch == wasd)
                .map(|&(command, _, _)| command)
        }
        _ => None,
    }
}

/// Whether the key ends the session: `q`, Esc or Ctrl-C.
pub fn should_quit(key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => true,
        KeyCode::Char('q' | 'Q') => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
