//! Keyboard shortcuts for viewer actions.
//!
//! Front ends translate their own key events into [`KeyPress`] values and
//! ask the keymap which [`Action`] (if any) to dispatch.

use crate::action::Action;
use crate::config::Config;
use std::collections::HashMap;

/// Keyboard modifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool, // Cmd on macOS, Win on Windows
}

impl Modifiers {
    /// No modifiers pressed.
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        alt: false,
        shift: false,
        meta: false,
    };

    /// Ctrl modifier.
    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        alt: false,
        shift: false,
        meta: false,
    };

    /// Returns true if no modifiers are pressed.
    pub fn is_empty(&self) -> bool {
        !self.ctrl && !self.alt && !self.shift && !self.meta
    }

    /// Parses modifiers from a string like "ctrl+shift".
    pub fn parse(s: &str) -> Self {
        let mut mods = Modifiers::NONE;
        for part in s.split('+').map(|p| p.trim().to_lowercase()) {
            match part.as_str() {
                "ctrl" | "control" => mods.ctrl = true,
                "alt" | "option" => mods.alt = true,
                "shift" => mods.shift = true,
                "meta" | "cmd" | "win" | "super" => mods.meta = true,
                _ => {}
            }
        }
        mods
    }
}

impl std::fmt::Display for Modifiers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.alt {
            parts.push("Alt");
        }
        if self.shift {
            parts.push("Shift");
        }
        if self.meta {
            #[cfg(target_os = "macos")]
            parts.push("Cmd");
            #[cfg(not(target_os = "macos"))]
            parts.push("Win");
        }
        write!(f, "{}", parts.join("+"))
    }
}

/// A key code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Delete,
    Backspace,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    F(u8), // F1-F12
    Space,
}

impl Key {
    /// Parses a key from a string.
    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "enter" | "return" => Some(Key::Enter),
            "delete" | "del" => Some(Key::Delete),
            "backspace" | "bs" => Some(Key::Backspace),
            "escape" | "esc" => Some(Key::Escape),
            "up" => Some(Key::Up),
            "down" => Some(Key::Down),
            "left" => Some(Key::Left),
            "right" => Some(Key::Right),
            "home" => Some(Key::Home),
            "end" => Some(Key::End),
            "space" => Some(Key::Space),
            _ if lower.starts_with('f') && (2..=3).contains(&lower.len()) => {
                lower[1..].parse().ok().map(Key::F)
            }
            _ => {
                let mut chars = lower.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(Key::Char(c)),
                    _ => None,
                }
            }
        }
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Key::Char(c) => write!(f, "{}", c.to_uppercase()),
            Key::Enter => write!(f, "Enter"),
            Key::Delete => write!(f, "Delete"),
            Key::Backspace => write!(f, "Backspace"),
            Key::Escape => write!(f, "Escape"),
            Key::Up => write!(f, "Up"),
            Key::Down => write!(f, "Down"),
            Key::Left => write!(f, "Left"),
            Key::Right => write!(f, "Right"),
            Key::Home => write!(f, "Home"),
            Key::End => write!(f, "End"),
            Key::F(n) => write!(f, "F{}", n),
            Key::Space => write!(f, "Space"),
        }
    }
}

/// A key press event.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPress {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyPress {
    /// Creates a new key press.
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// A key press without modifiers.
    pub fn plain(key: Key) -> Self {
        Self::new(key, Modifiers::NONE)
    }

    /// Parses a binding string like "ctrl+r" or "right".
    pub fn parse(s: &str) -> Option<Self> {
        let (mod_str, key_str) = match s.strip_suffix('+') {
            // "+" or "ctrl++" name the plus key itself.
            Some(rest) if rest.is_empty() || rest.ends_with('+') => (rest, "+"),
            _ => match s.rfind('+') {
                Some(i) => (&s[..i], &s[i + 1..]),
                None => ("", s),
            },
        };
        let key = Key::parse(key_str)?;
        Some(Self {
            key,
            modifiers: Modifiers::parse(mod_str),
        })
    }
}

impl std::fmt::Display for KeyPress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.modifiers.is_empty() {
            write!(f, "{}", self.key)
        } else {
            write!(f, "{}+{}", self.modifiers, self.key)
        }
    }
}

/// Maps key presses to viewer actions.
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: HashMap<KeyPress, Action>,
}

impl Keymap {
    /// Creates a keymap with the default bindings.
    pub fn new() -> Self {
        let mut keymap = Self {
            bindings: HashMap::new(),
        };
        keymap.add_default_bindings();
        keymap
    }

    /// Creates a keymap from configuration; user bindings win over defaults.
    pub fn from_config(config: &Config) -> Self {
        let mut keymap = Self::new();

        for (key_str, action_str) in &config.keyboard.bindings {
            match (KeyPress::parse(key_str), Action::parse(action_str)) {
                (Some(key), Some(action)) => {
                    keymap.bind(key, action);
                }
                _ => {
                    tracing::warn!("Ignoring key binding {} = {}", key_str, action_str);
                }
            }
        }

        keymap
    }

    fn add_default_bindings(&mut self) {
        let defaults = [
            (KeyPress::plain(Key::Right), Action::Next),
            (KeyPress::plain(Key::Left), Action::Prev),
            (KeyPress::plain(Key::Space), Action::Flip),
            (KeyPress::plain(Key::Delete), Action::Delete),
            (KeyPress::plain(Key::F(5)), Action::Load),
            (KeyPress::new(Key::Char('r'), Modifiers::CTRL), Action::Load),
        ];
        for (key, action) in defaults {
            self.bind(key, action);
        }
    }

    /// Adds or replaces a binding.
    pub fn bind(&mut self, key: KeyPress, action: Action) {
        self.bindings.insert(key, action);
    }

    /// Returns the action bound to `key`.
    pub fn lookup(&self, key: &KeyPress) -> Option<Action> {
        self.bindings.get(key).cloned()
    }

    /// Returns all bindings as `(key, action name)` pairs, sorted by key text.
    pub fn describe(&self) -> Vec<(String, &str)> {
        let mut rows: Vec<_> = self
            .bindings
            .iter()
            .map(|(k, a)| (k.to_string(), a.display_name()))
            .collect();
        rows.sort();
        rows
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new()
    }
}
