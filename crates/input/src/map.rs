//! Key mapping from terminal events to control events.

use crate::types::{ControlEvent, Direction};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map keyboard input to a control event.
///
/// Only key presses count; releases and auto-repeats are ignored.
pub fn map_key(key: KeyEvent) -> Option<ControlEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if should_quit(key) {
        return Some(ControlEvent::Quit);
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(ControlEvent::Steer(Direction::Up))
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(ControlEvent::Steer(Direction::Down))
        }
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(ControlEvent::Steer(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(ControlEvent::Steer(Direction::Right))
        }

        KeyCode::Char('r') | KeyCode::Char('R') => Some(ControlEvent::Restart),

        _ => None,
    }
}

/// Check if key should quit the client.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventState, KeyModifiers};

    fn steer(dir: Direction) -> Option<ControlEvent> {
        Some(ControlEvent::Steer(dir))
    }

    #[test]
    fn test_arrow_keys() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Up)), steer(Direction::Up));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Down)), steer(Direction::Down));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Left)), steer(Direction::Left));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Right)), steer(Direction::Right));
    }

    #[test]
    fn test_wasd_keys() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('w'))), steer(Direction::Up));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('A'))), steer(Direction::Left));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('s'))), steer(Direction::Down));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('D'))), steer(Direction::Right));
    }

    #[test]
    fn test_restart_and_quit() {
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('r'))),
            Some(ControlEvent::Restart)
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('q'))),
            Some(ControlEvent::Quit)
        );
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(ControlEvent::Quit)
        );
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_release_ignored() {
        let release = KeyEvent::new_with_kind_and_state(
            KeyCode::Up,
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        );
        assert_eq!(map_key(release), None);
    }
}
