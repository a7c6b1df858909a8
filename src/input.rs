use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::grid::Direction;

/// Logical player actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Move(Direction),
    Pause,
    Resume,
    QuitToMenu,
    Screenshot,
    OpenScreenshotFolder,
    Exit,
}

impl Action {
    /// Maps a key press to an action. Releases and repeats are ignored.
    pub fn from_key_event(key: KeyEvent) -> Option<Action> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Action::Exit);
        }

        match key.code {
            KeyCode::Up => Some(Action::Move(Direction::Up)),
            KeyCode::Down => Some(Action::Move(Direction::Down)),
            KeyCode::Left => Some(Action::Move(Direction::Left)),
            KeyCode::Right => Some(Action::Move(Direction::Right)),
            KeyCode::Esc => Some(Action::Exit),
            KeyCode::Char(' ') => Some(Action::QuitToMenu),
            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'w' => Some(Action::Move(Direction::Up)),
                's' => Some(Action::Move(Direction::Down)),
                'a' => Some(Action::Move(Direction::Left)),
                'd' => Some(Action::Move(Direction::Right)),
                'j' => Some(Action::Pause),
                'k' => Some(Action::Resume),
                'l' => Some(Action::Screenshot),
                'o' => Some(Action::OpenScreenshotFolder),
                _ => None,
            },
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(
            Action::from_key_event(press(KeyCode::Up)),
            Some(Action::Move(Direction::Up))
        );
        assert_eq!(
            Action::from_key_event(press(KeyCode::Char('a'))),
            Some(Action::Move(Direction::Left))
        );
        assert_eq!(
            Action::from_key_event(press(KeyCode::Char('D'))),
            Some(Action::Move(Direction::Right))
        );
        assert_eq!(
            Action::from_key_event(press(KeyCode::Char('s'))),
            Some(Action::Move(Direction::Down))
        );
    }

    #[test]
    fn test_control_keys() {
        assert_eq!(Action::from_key_event(press(KeyCode::Char('j'))), Some(Action::Pause));
        assert_eq!(Action::from_key_event(press(KeyCode::Char('k'))), Some(Action::Resume));
        assert_eq!(
            Action::from_key_event(press(KeyCode::Char(' '))),
            Some(Action::QuitToMenu)
        );
        assert_eq!(
            Action::from_key_event(press(KeyCode::Char('l'))),
            Some(Action::Screenshot)
        );
        assert_eq!(
            Action::from_key_event(press(KeyCode::Char('o'))),
            Some(Action::OpenScreenshotFolder)
        );
        assert_eq!(Action::from_key_event(press(KeyCode::Esc)), Some(Action::Exit));
        assert_eq!(
            Action::from_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Exit)
        );
        assert_eq!(Action::from_key_event(press(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_release_is_ignored() {
        let mut key = press(KeyCode::Up);
        key.kind = KeyEventKind::Release;
        assert_eq!(Action::from_key_event(key), None);
    }
}
