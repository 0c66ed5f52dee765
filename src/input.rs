//! Console buttons and the key map that produces them.

use std::collections::HashMap;

use crossterm::event::KeyCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Up,
    Down,
    Left,
    Right,
    A,
    B,
    X,
    Y,
    L,
    R,
    Plus,
    Minus,
}

impl Button {
    pub fn all() -> &'static [Button] {
        &[
            Button::Up,
            Button::Down,
            Button::Left,
            Button::Right,
            Button::A,
            Button::B,
            Button::X,
            Button::Y,
            Button::L,
            Button::R,
            Button::Plus,
            Button::Minus,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Button::Up => "Up",
            Button::Down => "Down",
            Button::Left => "Left",
            Button::Right => "Right",
            Button::A => "A",
            Button::B => "B",
            Button::X => "X",
            Button::Y => "Y",
            Button::L => "L",
            Button::R => "R",
            Button::Plus => "Plus",
            Button::Minus => "Minus",
        }
    }

    fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

/// Buttons pressed since the last tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonSet(u16);

impl ButtonSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, button: Button) {
        self.0 |= button.bit();
    }

    pub fn contains(&self, button: Button) -> bool {
        self.0 & button.bit() != 0
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<Button> for ButtonSet {
    fn from_iter<I: IntoIterator<Item = Button>>(iter: I) -> Self {
        let mut set = ButtonSet::new();
        for b in iter {
            set.insert(b);
        }
        set
    }
}

/// Parse a key name from the config file: "Up", "Enter", "Space", "Esc",
/// or a single character.
pub fn parse_key(name: &str) -> Option<KeyCode> {
    let code = match name.to_ascii_lowercase().as_str() {
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "space" => KeyCode::Char(' '),
        _ => {
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c.to_ascii_lowercase()),
                _ => return None,
            }
        }
    };
    Some(code)
}

pub fn key_name(code: KeyCode) -> String {
    match code {
        KeyCode::Up => "Up".into(),
        KeyCode::Down => "Down".into(),
        KeyCode::Left => "Left".into(),
        KeyCode::Right => "Right".into(),
        KeyCode::Enter => "Enter".into(),
        KeyCode::Esc => "Esc".into(),
        KeyCode::Tab => "Tab".into(),
        KeyCode::Backspace => "Backspace".into(),
        KeyCode::Char(' ') => "Space".into(),
        KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
        _ => "?".into(),
    }
}

#[derive(Debug, Clone, Default)]
pub struct KeyMap {
    keys: HashMap<KeyCode, Button>,
    labels: HashMap<Button, String>,
}

impl KeyMap {
    /// Build from (button, key names) pairs. Unknown key names are returned
    /// so the caller can report them.
    pub fn from_bindings<'a, I>(bindings: I) -> (Self, Vec<String>)
    where
        I: IntoIterator<Item = (Button, &'a [String])>,
    {
        let mut map = KeyMap::default();
        let mut unknown = vec![];
        for (button, names) in bindings {
            for name in names {
                match parse_key(name) {
                    Some(code) => map.bind(code, button),
                    None => unknown.push(name.clone()),
                }
            }
        }
        (map, unknown)
    }

    pub fn bind(&mut self, code: KeyCode, button: Button) {
        self.keys.insert(code, button);
        self.labels.entry(button).or_insert_with(|| key_name(code));
    }

    pub fn lookup(&self, code: KeyCode) -> Option<Button> {
        let code = match code {
            KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
            other => other,
        };
        self.keys.get(&code).copied()
    }

    /// The first key bound to `button`, for help text.
    pub fn label(&self, button: Button) -> &str {
        self.labels.get(&button).map(|s| s.as_str()).unwrap_or(button.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_set_tracks_presses() {
        let mut set = ButtonSet::new();
        assert!(set.is_empty());
        set.insert(Button::A);
        set.insert(Button::Minus);
        assert!(set.contains(Button::A));
        assert!(set.contains(Button::Minus));
        assert!(!set.contains(Button::B));
        set.clear();
        assert!(set.is_empty());
    }

    #[test]
    fn every_button_has_its_own_bit() {
        let set: ButtonSet = Button::all().iter().copied().collect();
        for b in Button::all() {
            let single: ButtonSet = [*b].into_iter().collect();
            assert!(set.contains(*b));
            for other in Button::all() {
                assert_eq!(single.contains(*other), other == b);
            }
        }
    }

    #[test]
    fn parse_named_and_character_keys() {
        assert_eq!(parse_key("Up"), Some(KeyCode::Up));
        assert_eq!(parse_key("enter"), Some(KeyCode::Enter));
        assert_eq!(parse_key("Space"), Some(KeyCode::Char(' ')));
        assert_eq!(parse_key("Z"), Some(KeyCode::Char('z')));
        assert_eq!(parse_key("nope"), None);
        assert_eq!(parse_key(""), None);
    }

    #[test]
    fn key_map_lookup_ignores_case() {
        let up = vec!["Up".to_string(), "w".to_string()];
        let quit = vec!["q".to_string(), "bogus".to_string()];
        let (map, unknown) =
            KeyMap::from_bindings([(Button::Up, up.as_slice()), (Button::Plus, quit.as_slice())]);
        assert_eq!(unknown, vec!["bogus".to_string()]);
        assert_eq!(map.lookup(KeyCode::Char('W')), Some(Button::Up));
        assert_eq!(map.lookup(KeyCode::Up), Some(Button::Up));
        assert_eq!(map.lookup(KeyCode::Char('q')), Some(Button::Plus));
        assert_eq!(map.lookup(KeyCode::Char('x')), None);
        assert_eq!(map.label(Button::Up), "Up");
        assert_eq!(map.label(Button::Plus), "Q");
        assert_eq!(map.label(Button::A), "A");
    }
}
