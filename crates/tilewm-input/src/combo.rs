// ABOUTME: Key combination strings like "Shift+Alt+Enter".
// ABOUTME: Parsing and exact-modifier matching against key events.

use std::fmt;
use std::str::FromStr;

const MODIFIERS: [&str; 4] = ["ctrl", "shift", "alt", "meta"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        shift: false,
        alt: false,
        meta: false,
    };

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::NONE
        }
    }
}

/// A key press as delivered by the host, already decoded to a key name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// Primary key name, e.g. "Enter", "W", "Tab"
    pub key: String,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HotkeyError {
    #[error("Invalid key combination '{combo}': {reason}")]
    InvalidCombo { combo: String, reason: String },
}

/// Parsed key combination: an exact modifier set plus one key, lower-cased
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    modifiers: Modifiers,
    key: String,
}

impl KeyCombo {
    pub fn parse(combo: &str) -> Result<Self, HotkeyError> {
        let invalid = |reason: &str| HotkeyError::InvalidCombo {
            combo: combo.to_string(),
            reason: reason.to_string(),
        };

        let mut modifiers = Modifiers::NONE;
        let mut key: Option<String> = None;

        for token in combo.to_lowercase().split('+').map(str::trim) {
            match token {
                "" => return Err(invalid("empty key token")),
                "ctrl" => modifiers.ctrl = true,
                "shift" => modifiers.shift = true,
                "alt" => modifiers.alt = true,
                "meta" => modifiers.meta = true,
                other => match &key {
                    // Repeated tokens collapse, as in a set
                    Some(existing) if existing == other => {}
                    Some(_) => return Err(invalid("more than one non-modifier key")),
                    None => key = Some(other.to_string()),
                },
            }
        }

        let key = key.ok_or_else(|| invalid("no non-modifier key"))?;
        Ok(Self { modifiers, key })
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Every modifier must match exactly; the key compares case-insensitively
    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.modifiers == event.modifiers && event.key.to_lowercase() == self.key
    }

    /// Event that this combination matches, for synthesizing input
    pub fn to_event(&self) -> KeyEvent {
        KeyEvent::new(self.key.clone(), self.modifiers)
    }
}

impl FromStr for KeyCombo {
    type Err = HotkeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags = [
            self.modifiers.ctrl,
            self.modifiers.shift,
            self.modifiers.alt,
            self.modifiers.meta,
        ];
        for (name, set) in MODIFIERS.iter().zip(flags) {
            if set {
                write!(f, "{name}+")?;
            }
        }
        f.write_str(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_enter_matches_only_with_exact_modifiers() {
        let combo = KeyCombo::parse("Shift+Enter").unwrap();
        assert!(combo.matches(&KeyEvent::new("Enter", Modifiers::shift())));

        let with_ctrl = Modifiers {
            ctrl: true,
            ..Modifiers::shift()
        };
        assert!(!combo.matches(&KeyEvent::new("Enter", with_ctrl)));
        assert!(!combo.matches(&KeyEvent::new("Enter", Modifiers::NONE)));
    }

    #[test]
    fn key_compares_case_insensitively() {
        let combo = KeyCombo::parse("Shift+W").unwrap();
        assert!(combo.matches(&KeyEvent::new("w", Modifiers::shift())));
        assert!(combo.matches(&KeyEvent::new("W", Modifiers::shift())));
        assert!(!combo.matches(&KeyEvent::new("Q", Modifiers::shift())));
    }

    #[test]
    fn parse_trims_and_ignores_case_and_order() {
        let a = KeyCombo::parse(" alt + SHIFT + Enter ").unwrap();
        let b = KeyCombo::parse("Shift+Alt+Enter").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.key(), "enter");
        assert!(a.modifiers().alt && a.modifiers().shift);
        assert!(!a.modifiers().ctrl && !a.modifiers().meta);
    }

    #[test]
    fn parse_rejects_zero_or_many_keys() {
        assert!(matches!(
            KeyCombo::parse("Ctrl+Shift"),
            Err(HotkeyError::InvalidCombo { .. })
        ));
        assert!(KeyCombo::parse("Ctrl+A+B").is_err());
        assert!(KeyCombo::parse("Shift+").is_err());
        assert!(KeyCombo::parse("").is_err());
    }

    #[test]
    fn repeated_tokens_collapse() {
        assert_eq!(
            KeyCombo::parse("shift+shift+w+w").unwrap(),
            KeyCombo::parse("Shift+W").unwrap()
        );
    }

    #[test]
    fn display_is_canonical_and_reparses() {
        let combo: KeyCombo = "Meta+Alt+Ctrl+Tab".parse().unwrap();
        assert_eq!(combo.to_string(), "ctrl+alt+meta+tab");
        assert_eq!(combo.to_string().parse::<KeyCombo>().unwrap(), combo);
    }

    #[test]
    fn synthesized_event_matches_its_combo() {
        let combo = KeyCombo::parse("Ctrl+Alt+X").unwrap();
        assert!(combo.matches(&combo.to_event()));
    }
}
