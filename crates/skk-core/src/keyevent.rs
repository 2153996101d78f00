//! Logical key events consumed by the conversion engine.
//!
//! A `KeyEvent` is a key symbol plus a modifier set. Hosts build one either
//! from an X11 keysym (`from_keysym`) or from the textual notation used in
//! keymaps and tests (`"a"`, `"K"`, `"space"`, `"C-g"`, `"Return"`).

use std::fmt;
use std::str::FromStr;

bitflags::bitflags! {
    /// Modifier keys held while the key was pressed.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const SHIFT   = 0b0000_0001;
        const CONTROL = 0b0000_0010;
        const ALT     = 0b0000_0100;
        const META    = 0b0000_1000;
        /// Key release rather than press. Never consumed by the engine.
        const RELEASE = 0b1000_0000;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeySym {
    Char(char),
    Return,
    Escape,
    BackSpace,
    Tab,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum KeyEventError {
    #[error("empty key string")]
    Empty,
    #[error("unknown key name: {0}")]
    UnknownKeyName(String),
    #[error("unresolvable keysym: {0:#x}")]
    UnresolvableKeysym(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub sym: KeySym,
    pub modifiers: Modifiers,
}

// X11 keysym values for the named keys we understand.
mod keysym {
    pub const BACKSPACE: u32 = 0xff08;
    pub const TAB: u32 = 0xff09;
    pub const RETURN: u32 = 0xff0d;
    pub const ESCAPE: u32 = 0xff1b;
    pub const HOME: u32 = 0xff50;
    pub const LEFT: u32 = 0xff51;
    pub const UP: u32 = 0xff52;
    pub const RIGHT: u32 = 0xff53;
    pub const DOWN: u32 = 0xff54;
    pub const END: u32 = 0xff57;
    pub const KP_ENTER: u32 = 0xff8d;
    pub const DELETE: u32 = 0xffff;
}

impl KeyEvent {
    pub fn new(sym: KeySym, modifiers: Modifiers) -> Self {
        Self { sym, modifiers }
    }

    /// Plain printable key with no modifiers.
    pub fn char(c: char) -> Self {
        Self::new(KeySym::Char(c), Modifiers::empty())
    }

    pub fn named(sym: KeySym) -> Self {
        Self::new(sym, Modifiers::empty())
    }

    /// Build from an X11 keysym code. Printable Latin-1 keysyms map 1:1 onto
    /// their code points.
    pub fn from_keysym(code: u32, modifiers: Modifiers) -> Result<Self, KeyEventError> {
        let sym = match code {
            0x20..=0x7e | 0xa0..=0xff => {
                KeySym::Char(char::from_u32(code).ok_or(KeyEventError::UnresolvableKeysym(code))?)
            }
            keysym::BACKSPACE => KeySym::BackSpace,
            keysym::TAB => KeySym::Tab,
            keysym::RETURN | keysym::KP_ENTER => KeySym::Return,
            keysym::ESCAPE => KeySym::Escape,
            keysym::HOME => KeySym::Home,
            keysym::LEFT => KeySym::Left,
            keysym::UP => KeySym::Up,
            keysym::RIGHT => KeySym::Right,
            keysym::DOWN => KeySym::Down,
            keysym::END => KeySym::End,
            keysym::DELETE => KeySym::Delete,
            _ => return Err(KeyEventError::UnresolvableKeysym(code)),
        };
        Ok(Self::new(sym, modifiers))
    }

    pub fn is_release(&self) -> bool {
        self.modifiers.contains(Modifiers::RELEASE)
    }

    /// Control, Alt or Meta held. Shift alone does not count.
    pub fn has_command_modifier(&self) -> bool {
        self.modifiers
            .intersects(Modifiers::CONTROL | Modifiers::ALT | Modifiers::META)
    }

    /// The printable character carried by this event, if it is a bare
    /// (shift at most) press of a printable key.
    pub fn printable(&self) -> Option<char> {
        match self.sym {
            KeySym::Char(c) if !self.has_command_modifier() && !self.is_release() => {
                (!c.is_control()).then_some(c)
            }
            _ => None,
        }
    }

    /// Same key with modifiers relevant to keymap matching only.
    /// Shift is folded into the character itself, so it is dropped for
    /// printable keys.
    pub(crate) fn normalized(&self) -> Self {
        let mut modifiers = self.modifiers - Modifiers::RELEASE;
        if matches!(self.sym, KeySym::Char(_)) {
            modifiers -= Modifiers::SHIFT;
        }
        Self::new(self.sym, modifiers)
    }
}

fn named_key(name: &str) -> Option<KeySym> {
    let sym = match name {
        "space" => KeySym::Char(' '),
        "Return" | "Enter" => KeySym::Return,
        "Escape" => KeySym::Escape,
        "BackSpace" => KeySym::BackSpace,
        "Tab" => KeySym::Tab,
        "Delete" => KeySym::Delete,
        "Left" => KeySym::Left,
        "Right" => KeySym::Right,
        "Up" => KeySym::Up,
        "Down" => KeySym::Down,
        "Home" => KeySym::Home,
        "End" => KeySym::End,
        "slash" => KeySym::Char('/'),
        _ => return None,
    };
    Some(sym)
}

impl FromStr for KeyEvent {
    type Err = KeyEventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rest = s.trim();
        if rest.is_empty() {
            return Err(KeyEventError::Empty);
        }

        let mut modifiers = Modifiers::empty();
        while rest.len() > 2 {
            let flag = match rest.get(..2) {
                Some("C-") => Modifiers::CONTROL,
                Some("M-") => Modifiers::META,
                Some("A-") => Modifiers::ALT,
                Some("S-") => Modifiers::SHIFT,
                _ => break,
            };
            modifiers |= flag;
            rest = &rest[2..];
        }

        let mut chars = rest.chars();
        let sym = match (chars.next(), chars.next()) {
            (Some(c), None) => KeySym::Char(c),
            _ => named_key(rest).ok_or_else(|| KeyEventError::UnknownKeyName(rest.to_string()))?,
        };
        if let KeySym::Char(c) = sym {
            if c.is_ascii_uppercase() {
                modifiers |= Modifiers::SHIFT;
            }
        }
        Ok(Self::new(sym, modifiers))
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.contains(Modifiers::CONTROL) {
            f.write_str("C-")?;
        }
        if self.modifiers.contains(Modifiers::META) {
            f.write_str("M-")?;
        }
        if self.modifiers.contains(Modifiers::ALT) {
            f.write_str("A-")?;
        }
        match self.sym {
            KeySym::Char(' ') => f.write_str("space"),
            KeySym::Char(c) => write!(f, "{c}"),
            other => write!(f, "{other:?}"),
        }
    }
}

/// Parse a space-separated key sequence such as `"K a n j i space Return"`.
pub fn parse_key_sequence(keys: &str) -> Result<Vec<KeyEvent>, KeyEventError> {
    keys.split_whitespace().map(KeyEvent::from_str).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_plain_char() {
        let ev: KeyEvent = "a".parse().unwrap();
        assert_eq!(ev, KeyEvent::char('a'));
        assert_eq!(ev.printable(), Some('a'));
    }

    #[test]
    fn parse_uppercase_sets_shift() {
        let ev: KeyEvent = "K".parse().unwrap();
        assert_eq!(ev.sym, KeySym::Char('K'));
        assert!(ev.modifiers.contains(Modifiers::SHIFT));
        assert_eq!(ev.printable(), Some('K'));
    }

    #[test]
    fn parse_control() {
        let ev: KeyEvent = "C-g".parse().unwrap();
        assert_eq!(ev.sym, KeySym::Char('g'));
        assert!(ev.modifiers.contains(Modifiers::CONTROL));
        assert_eq!(ev.printable(), None);
    }

    #[test]
    fn parse_named_keys() {
        assert_eq!(
            "space".parse::<KeyEvent>().unwrap(),
            KeyEvent::char(' ')
        );
        assert_eq!(
            "Return".parse::<KeyEvent>().unwrap().sym,
            KeySym::Return
        );
        assert_eq!(
            "BackSpace".parse::<KeyEvent>().unwrap().sym,
            KeySym::BackSpace
        );
    }

    #[test]
    fn single_char_named_like_modifier_prefix() {
        // "C-" alone is not long enough to carry a key, so it is a name.
        assert!(matches!(
            "C-".parse::<KeyEvent>(),
            Err(KeyEventError::UnknownKeyName(_))
        ));
        assert_eq!("-".parse::<KeyEvent>().unwrap(), KeyEvent::char('-'));
    }

    #[test]
    fn parse_errors() {
        assert_eq!("".parse::<KeyEvent>(), Err(KeyEventError::Empty));
        assert!(matches!(
            "Hyper".parse::<KeyEvent>(),
            Err(KeyEventError::UnknownKeyName(_))
        ));
    }

    #[test]
    fn parse_non_ascii() {
        assert_eq!("あ".parse::<KeyEvent>().unwrap(), KeyEvent::char('あ'));
        assert!(matches!(
            "あい".parse::<KeyEvent>(),
            Err(KeyEventError::UnknownKeyName(_))
        ));
    }

    #[test]
    fn sequence() {
        let seq = parse_key_sequence("K a space C-j").unwrap();
        assert_eq!(seq.len(), 4);
        assert_eq!(seq[2], KeyEvent::char(' '));
    }

    #[test]
    fn keysym_mapping() {
        let ev = KeyEvent::from_keysym(0x61, Modifiers::empty()).unwrap();
        assert_eq!(ev, KeyEvent::char('a'));
        let ev = KeyEvent::from_keysym(0xff0d, Modifiers::empty()).unwrap();
        assert_eq!(ev.sym, KeySym::Return);
        assert_eq!(
            KeyEvent::from_keysym(0x1008_ff13, Modifiers::empty()),
            Err(KeyEventError::UnresolvableKeysym(0x1008_ff13))
        );
    }

    #[test]
    fn release_is_not_printable() {
        let ev = KeyEvent::new(KeySym::Char('a'), Modifiers::RELEASE);
        assert!(ev.is_release());
        assert_eq!(ev.printable(), None);
    }

    #[test]
    fn normalized_drops_shift_on_chars() {
        let ev: KeyEvent = "X".parse().unwrap();
        assert_eq!(ev.normalized().modifiers, Modifiers::empty());
        let tab = KeyEvent::new(KeySym::Tab, Modifiers::SHIFT);
        assert_eq!(tab.normalized().modifiers, Modifiers::SHIFT);
    }

    #[test]
    fn display_roundtrips_notation() {
        assert_eq!("C-g".parse::<KeyEvent>().unwrap().to_string(), "C-g");
        assert_eq!(KeyEvent::char(' ').to_string(), "space");
    }
}
