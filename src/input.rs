use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::grid::Direction;

/// Keys the game reacts to. W/A/S/D are aliases for the arrow keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    W,
    A,
    S,
    D,
    Space,
    Enter,
    Escape,
}

const ALIASES: [(Key, Key); 4] = [
    (Key::W, Key::Up),
    (Key::A, Key::Left),
    (Key::S, Key::Down),
    (Key::D, Key::Right),
];

impl Key {
    pub fn resolve_alias(self) -> Key {
        ALIASES
            .iter()
            .find(|(alias, _)| *alias == self)
            .map_or(self, |&(_, key)| key)
    }

    /// Heading for an arrow key (after alias resolution).
    pub fn direction(self) -> Option<Direction> {
        match self.resolve_alias() {
            Key::Up => Some(Direction::Up),
            Key::Down => Some(Direction::Down),
            Key::Left => Some(Direction::Left),
            Key::Right => Some(Direction::Right),
            Key::W | Key::A | Key::S | Key::D => None,
            Key::Space | Key::Enter | Key::Escape => None,
        }
    }
}

/// Screen position in terminal cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Point {
    pub column: u16,
    pub row: u16,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    QuitRequested,
    KeyPressed(Key),
    PointerPressed(Point),
    PointerMoved(Point),
}

pub fn translate(event: Event) -> Option<InputEvent> {
    match event {
        Event::Key(key) => translate_key(key),
        Event::Mouse(mouse) => translate_mouse(mouse),
        _ => None,
    }
}

fn translate_key(key: KeyEvent) -> Option<InputEvent> {
    // Only process key press events, not release
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(InputEvent::QuitRequested);
    }

    let key = match key.code {
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Char('w') | KeyCode::Char('W') => Key::W,
        KeyCode::Char('a') | KeyCode::Char('A') => Key::A,
        KeyCode::Char('s') | KeyCode::Char('S') => Key::S,
        KeyCode::Char('d') | KeyCode::Char('D') => Key::D,
        KeyCode::Char(' ') => Key::Space,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Escape,
        KeyCode::Char('q') | KeyCode::Char('Q') => return Some(InputEvent::QuitRequested),
        _ => return None,
    };

    Some(InputEvent::KeyPressed(key))
}

fn translate_mouse(mouse: MouseEvent) -> Option<InputEvent> {
    let point = Point {
        column: mouse.column,
        row: mouse.row,
    };
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(InputEvent::PointerPressed(point)),
        MouseEventKind::Moved | MouseEventKind::Drag(_) => Some(InputEvent::PointerMoved(point)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_arrow_keys() {
        assert_eq!(
            translate(press(KeyCode::Up)),
            Some(InputEvent::KeyPressed(Key::Up))
        );
        assert_eq!(
            translate(press(KeyCode::Down)),
            Some(InputEvent::KeyPressed(Key::Down))
        );
        assert_eq!(
            translate(press(KeyCode::Left)),
            Some(InputEvent::KeyPressed(Key::Left))
        );
        assert_eq!(
            translate(press(KeyCode::Right)),
            Some(InputEvent::KeyPressed(Key::Right))
        );
    }

    #[test]
    fn test_wasd_keys_are_aliases() {
        assert_eq!(Key::W.resolve_alias(), Key::Up);
        assert_eq!(Key::A.resolve_alias(), Key::Left);
        assert_eq!(Key::S.resolve_alias(), Key::Down);
        assert_eq!(Key::D.resolve_alias(), Key::Right);

        assert_eq!(Key::W.direction(), Some(Direction::Up));
        assert_eq!(Key::A.direction(), Some(Direction::Left));
        assert_eq!(Key::S.direction(), Some(Direction::Down));
        assert_eq!(Key::D.direction(), Some(Direction::Right));

        let upper = Event::Key(KeyEvent::new(KeyCode::Char('W'), KeyModifiers::SHIFT));
        assert_eq!(translate(upper), Some(InputEvent::KeyPressed(Key::W)));
    }

    #[test]
    fn test_non_directional_keys() {
        assert_eq!(Key::Space.resolve_alias(), Key::Space);
        assert_eq!(Key::Space.direction(), None);
        assert_eq!(Key::Enter.direction(), None);
        assert_eq!(Key::Escape.direction(), None);

        assert_eq!(
            translate(press(KeyCode::Char(' '))),
            Some(InputEvent::KeyPressed(Key::Space))
        );
        assert_eq!(
            translate(press(KeyCode::Enter)),
            Some(InputEvent::KeyPressed(Key::Enter))
        );
        assert_eq!(
            translate(press(KeyCode::Esc)),
            Some(InputEvent::KeyPressed(Key::Escape))
        );
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(
            translate(press(KeyCode::Char('q'))),
            Some(InputEvent::QuitRequested)
        );
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(translate(ctrl_c), Some(InputEvent::QuitRequested));
    }

    #[test]
    fn test_unknown_and_released_keys() {
        assert_eq!(translate(press(KeyCode::Char('x'))), None);
        assert_eq!(translate(press(KeyCode::Tab)), None);

        let mut release = KeyEvent::new(KeyCode::Up, KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(translate(Event::Key(release)), None);

        assert_eq!(translate(Event::Resize(80, 24)), None);
    }

    #[test]
    fn test_mouse_clicks() {
        let click = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 12,
            row: 7,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(
            translate(click),
            Some(InputEvent::PointerPressed(Point { column: 12, row: 7 }))
        );

        let moved = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Moved,
            column: 3,
            row: 4,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(
            translate(moved),
            Some(InputEvent::PointerMoved(Point { column: 3, row: 4 }))
        );

        let scrolled = Event::Mouse(MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 3,
            row: 4,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(translate(scrolled), None);
    }
}
