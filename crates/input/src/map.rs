//! Key mapping from terminal events to game commands.

use crate::types::Command;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a terminal event asks the front end to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Command(Command),
    Quit,
}

/// Map keyboard input to a game command.
///
/// One command per press: repeats and releases map to nothing, so holding a
/// key does not auto-repeat on terminals that report key kinds.
pub fn map_key(key: KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    match key.code {
        KeyCode::Left
        | KeyCode::Char('h')
        | KeyCode::Char('H')
        | KeyCode::Char('a')
        | KeyCode::Char('A') => Some(Command::MoveLeft),
        KeyCode::Right
        | KeyCode::Char('l')
        | KeyCode::Char('L')
        | KeyCode::Char('d')
        | KeyCode::Char('D') => Some(Command::MoveRight),
        KeyCode::Down
        | KeyCode::Char('j')
        | KeyCode::Char('J')
        | KeyCode::Char('s')
        | KeyCode::Char('S') => Some(Command::SoftDrop),
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(Command::RotateCw),
        KeyCode::Char(' ') => Some(Command::HardDrop),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Map any terminal event. Only key presses produce an action.
pub fn map_event(event: &Event) -> Option<KeyAction> {
    let Event::Key(key) = event else {
        return None;
    };
    if should_quit(*key) {
        return Some(KeyAction::Quit);
    }
    map_key(*key).map(KeyAction::Command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn release(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Left)), Some(Command::MoveLeft));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Right)), Some(Command::MoveRight));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Down)), Some(Command::SoftDrop));

        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('A'))), Some(Command::MoveLeft));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('l'))), Some(Command::MoveRight));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('J'))), Some(Command::SoftDrop));
    }

    #[test]
    fn test_rotate_and_hard_drop() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Up)), Some(Command::RotateCw));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('w'))), Some(Command::RotateCw));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char(' '))), Some(Command::HardDrop));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('z'))), None);
    }

    #[test]
    fn test_only_presses_map() {
        assert_eq!(map_key(release(KeyCode::Left)), None);
        assert!(!should_quit(release(KeyCode::Char('q'))));
        assert_eq!(map_event(&Event::FocusLost), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
        assert_eq!(
            map_event(&Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))),
            Some(KeyAction::Quit)
        );
        assert_eq!(
            map_event(&Event::Key(KeyEvent::from(KeyCode::Left))),
            Some(KeyAction::Command(Command::MoveLeft))
        );
    }
}
