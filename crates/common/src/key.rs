use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of key slots in a key-state table. Covers every named key code.
pub const KEY_COUNT: usize = 350;

/// A platform key code using the GLFW numbering.
///
/// Any `i32` can be wrapped; only codes in `0..KEY_COUNT` address a slot in a
/// key table. Out-of-range codes (including the platform's "unknown" key,
/// `-1`) are carried around but never index anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Key(pub i32);

/// Errors from parsing a key name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyParseError {
    #[error("unknown key name {0:?}")]
    UnknownName(String),
}

impl Key {
    pub const UNKNOWN: Key = Key(-1);
    pub const SPACE: Key = Key(32);
    pub const APOSTROPHE: Key = Key(39);
    pub const COMMA: Key = Key(44);
    pub const MINUS: Key = Key(45);
    pub const PERIOD: Key = Key(46);
    pub const SLASH: Key = Key(47);
    pub const DIGIT_0: Key = Key(48);
    pub const SEMICOLON: Key = Key(59);
    pub const EQUAL: Key = Key(61);
    pub const A: Key = Key(65);
    pub const D: Key = Key(68);
    pub const Q: Key = Key(81);
    pub const S: Key = Key(83);
    pub const W: Key = Key(87);
    pub const Z: Key = Key(90);
    pub const LEFT_BRACKET: Key = Key(91);
    pub const BACKSLASH: Key = Key(92);
    pub const RIGHT_BRACKET: Key = Key(93);
    pub const GRAVE_ACCENT: Key = Key(96);
    pub const ESCAPE: Key = Key(256);
    pub const ENTER: Key = Key(257);
    pub const TAB: Key = Key(258);
    pub const BACKSPACE: Key = Key(259);
    pub const INSERT: Key = Key(260);
    pub const DELETE: Key = Key(261);
    pub const RIGHT: Key = Key(262);
    pub const LEFT: Key = Key(263);
    pub const DOWN: Key = Key(264);
    pub const UP: Key = Key(265);
    pub const PAGE_UP: Key = Key(266);
    pub const PAGE_DOWN: Key = Key(267);
    pub const HOME: Key = Key(268);
    pub const END: Key = Key(269);
    pub const CAPS_LOCK: Key = Key(280);
    pub const F1: Key = Key(290);
    pub const F12: Key = Key(301);
    pub const LEFT_SHIFT: Key = Key(340);
    pub const LEFT_CONTROL: Key = Key(341);
    pub const LEFT_ALT: Key = Key(342);
    pub const LEFT_SUPER: Key = Key(343);
    pub const RIGHT_SHIFT: Key = Key(344);
    pub const RIGHT_CONTROL: Key = Key(345);
    pub const RIGHT_ALT: Key = Key(346);
    pub const RIGHT_SUPER: Key = Key(347);
    pub const MENU: Key = Key(348);

    /// Letter key for an ASCII letter, either case.
    pub fn letter(c: char) -> Option<Key> {
        c.is_ascii_alphabetic()
            .then(|| Key(c.to_ascii_uppercase() as i32))
    }

    /// Digit key for `0..=9`.
    pub fn digit(n: u8) -> Option<Key> {
        (n <= 9).then(|| Key(Self::DIGIT_0.0 + n as i32))
    }

    /// Function key `F1..=F12`.
    pub fn function(n: u8) -> Option<Key> {
        (1..=12)
            .contains(&n)
            .then(|| Key(Self::F1.0 + n as i32 - 1))
    }

    /// Slot of this key in a `KEY_COUNT`-sized table, if it has one.
    pub fn index(self) -> Option<usize> {
        usize::try_from(self.0).ok().filter(|&i| i < KEY_COUNT)
    }

    fn name(self) -> Option<&'static str> {
        let name = match self {
            Self::SPACE => "space",
            Self::ESCAPE => "escape",
            Self::ENTER => "enter",
            Self::TAB => "tab",
            Self::BACKSPACE => "backspace",
            Self::INSERT => "insert",
            Self::DELETE => "delete",
            Self::RIGHT => "right",
            Self::LEFT => "left",
            Self::DOWN => "down",
            Self::UP => "up",
            Self::PAGE_UP => "page_up",
            Self::PAGE_DOWN => "page_down",
            Self::HOME => "home",
            Self::END => "end",
            Self::LEFT_SHIFT => "left_shift",
            Self::LEFT_CONTROL => "left_control",
            Self::LEFT_ALT => "left_alt",
            Self::RIGHT_SHIFT => "right_shift",
            Self::RIGHT_CONTROL => "right_control",
            Self::RIGHT_ALT => "right_alt",
            _ => return None,
        };
        Some(name)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = self.name() {
            return f.write_str(name);
        }
        match self.0 {
            65..=90 => write!(f, "{}", (self.0 as u8 as char).to_ascii_lowercase()),
            48..=57 => write!(f, "{}", self.0 - Self::DIGIT_0.0),
            290..=301 => write!(f, "f{}", self.0 - Self::F1.0 + 1),
            code => write!(f, "#{code}"),
        }
    }
}

impl FromStr for Key {
    type Err = KeyParseError;

    /// Accepts the names produced by `Display` (case-insensitive) or a raw
    /// decimal key code, written `#5` or, for codes of two or more digits,
    /// bare. A single bare digit is always the digit key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let named = match lower.as_str() {
            "space" => Some(Self::SPACE),
            "escape" | "esc" => Some(Self::ESCAPE),
            "enter" | "return" => Some(Self::ENTER),
            "tab" => Some(Self::TAB),
            "backspace" => Some(Self::BACKSPACE),
            "insert" => Some(Self::INSERT),
            "delete" => Some(Self::DELETE),
            "right" => Some(Self::RIGHT),
            "left" => Some(Self::LEFT),
            "down" => Some(Self::DOWN),
            "up" => Some(Self::UP),
            "page_up" => Some(Self::PAGE_UP),
            "page_down" => Some(Self::PAGE_DOWN),
            "home" => Some(Self::HOME),
            "end" => Some(Self::END),
            "left_shift" => Some(Self::LEFT_SHIFT),
            "left_control" => Some(Self::LEFT_CONTROL),
            "left_alt" => Some(Self::LEFT_ALT),
            "right_shift" => Some(Self::RIGHT_SHIFT),
            "right_control" => Some(Self::RIGHT_CONTROL),
            "right_alt" => Some(Self::RIGHT_ALT),
            _ => None,
        };
        if let Some(key) = named {
            return Ok(key);
        }

        let mut chars = lower.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if let Some(key) = Key::letter(c) {
                return Ok(key);
            }
            if let Some(key) = c.to_digit(10).and_then(|d| Key::digit(d as u8)) {
                return Ok(key);
            }
        }
        if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
            if let Some(key) = Key::function(n) {
                return Ok(key);
            }
        }
        lower
            .strip_prefix('#')
            .unwrap_or(&lower)
            .parse::<i32>()
            .map(Key)
            .map_err(|_| KeyParseError::UnknownName(s.to_string()))
    }
}

impl TryFrom<String> for Key {
    type Error = KeyParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        key.to_string()
    }
}

/// What happened to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    Press,
    Repeat,
    Release,
}

impl KeyAction {
    /// Whether the key is held after this action.
    pub fn is_down(self) -> bool {
        !matches!(self, Self::Release)
    }
}

/// A single key transition delivered by the window host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub action: KeyAction,
}

impl KeyEvent {
    pub fn new(key: Key, action: KeyAction) -> Self {
        Self { key, action }
    }

    pub fn press(key: Key) -> Self {
        Self::new(key, KeyAction::Press)
    }

    pub fn release(key: Key) -> Self {
        Self::new(key, KeyAction::Release)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_is_bounded() {
        assert_eq!(Key::SPACE.index(), Some(32));
        assert_eq!(Key::MENU.index(), Some(348));
        assert_eq!(Key(KEY_COUNT as i32 - 1).index(), Some(KEY_COUNT - 1));
        assert_eq!(Key(KEY_COUNT as i32).index(), None);
        assert_eq!(Key::UNKNOWN.index(), None);
        assert_eq!(Key(i32::MIN).index(), None);
    }

    #[test]
    fn letter_and_digit_helpers() {
        assert_eq!(Key::letter('a'), Some(Key::A));
        assert_eq!(Key::letter('Z'), Some(Key::Z));
        assert_eq!(Key::letter('!'), None);
        assert_eq!(Key::digit(0), Some(Key::DIGIT_0));
        assert_eq!(Key::digit(10), None);
        assert_eq!(Key::function(1), Some(Key::F1));
        assert_eq!(Key::function(12), Some(Key::F12));
        assert_eq!(Key::function(13), None);
    }

    #[test]
    fn parse_names() {
        assert_eq!("escape".parse::<Key>(), Ok(Key::ESCAPE));
        assert_eq!("Esc".parse::<Key>(), Ok(Key::ESCAPE));
        assert_eq!("q".parse::<Key>(), Ok(Key::Q));
        assert_eq!("7".parse::<Key>(), Ok(Key(55)));
        assert_eq!("f12".parse::<Key>(), Ok(Key::F12));
        assert_eq!("300".parse::<Key>(), Ok(Key(300)));
        assert!(matches!(
            "hyper".parse::<Key>(),
            Err(KeyParseError::UnknownName(_))
        ));
    }

    #[test]
    fn display_parses_back() {
        for key in [Key::ESCAPE, Key::W, Key::DIGIT_0, Key::F1, Key(163), Key::UNKNOWN] {
            assert_eq!(key.to_string().parse::<Key>(), Ok(key));
        }
    }

    #[test]
    fn low_raw_codes_stay_apart_from_digits() {
        for code in 0..=9 {
            let raw = Key(code);
            assert_eq!(raw.to_string(), format!("#{code}"));
            assert_eq!(raw.to_string().parse::<Key>(), Ok(raw));

            let json = serde_json::to_string(&raw).unwrap();
            assert_eq!(serde_json::from_str::<Key>(&json).unwrap(), raw);
        }
        assert_eq!("5".parse::<Key>(), Ok(Key(53)));
        assert_eq!("#53".parse::<Key>(), Ok(Key(53)));
    }

    #[test]
    fn serde_uses_names() {
        let json = serde_json::to_string(&Key::ESCAPE).unwrap();
        assert_eq!(json, "\"escape\"");
        let key: Key = serde_json::from_str("\"space\"").unwrap();
        assert_eq!(key, Key::SPACE);
    }

    #[test]
    fn release_is_the_only_up_action() {
        assert!(KeyAction::Press.is_down());
        assert!(KeyAction::Repeat.is_down());
        assert!(!KeyAction::Release.is_down());
    }
}
