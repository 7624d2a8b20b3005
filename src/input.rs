//! Maps terminal events to game commands. A click anywhere on the surface
//! and the spacebar share the primary action; `r` is the dedicated restart
//! key so a restart never double-fires through the generic handler.

use crossterm::event::{Event, KeyCode, MouseEventKind};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    /// Jump while running, start or restart otherwise.
    Primary,
    /// Force a fresh session from any state.
    Restart,
    Quit,
}

pub fn map_event(ev: &Event) -> Option<Command> {
    match ev {
        Event::Key(key) => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
            KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter => Some(Command::Primary),
            KeyCode::Char('r') => Some(Command::Restart),
            _ => None,
        },
        Event::Mouse(m) => match m.kind {
            MouseEventKind::Down(_) => Some(Command::Primary),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers, MouseButton, MouseEvent};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn spacebar_is_the_primary_action() {
        assert_eq!(map_event(&key(KeyCode::Char(' '))), Some(Command::Primary));
        assert_eq!(map_event(&key(KeyCode::Up)), Some(Command::Primary));
        assert_eq!(map_event(&key(KeyCode::Enter)), Some(Command::Primary));
    }

    #[test]
    fn click_is_the_primary_action() {
        let click = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 12,
            row: 4,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(map_event(&click), Some(Command::Primary));

        let moved = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Moved,
            column: 12,
            row: 4,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(map_event(&moved), None);
    }

    #[test]
    fn restart_and_quit_keys() {
        assert_eq!(map_event(&key(KeyCode::Char('r'))), Some(Command::Restart));
        assert_eq!(map_event(&key(KeyCode::Char('q'))), Some(Command::Quit));
        assert_eq!(map_event(&key(KeyCode::Esc)), Some(Command::Quit));
    }

    #[test]
    fn unmapped_events_are_ignored() {
        assert_eq!(map_event(&key(KeyCode::Char('z'))), None);
        assert_eq!(map_event(&Event::Resize(80, 24)), None);
    }
}
