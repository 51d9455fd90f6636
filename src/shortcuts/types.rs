//! Core binding types with canonical serialization and platform-aware display.
//!
//! This module provides:
//! - `KeyBinding` - A keyboard chord (at least one modifier + a primary key)
//! - `Modifiers` - Abstract modifier flags (meta, ctrl, alt, shift)
//! - `ShortcutParseError` - Detailed parse errors for user feedback
//! - Canonical `meta+ctrl+alt+shift+key` encoding
//! - Platform-aware display (⌘⇧K on Mac-like layouts, Ctrl+Shift+K elsewhere)

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use super::platform::PlatformResolver;

/// Separator between tokens in the canonical string form.
pub const SEPARATOR: char = '+';

/// Errors that can occur when parsing a binding string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShortcutParseError {
    #[error("binding string is empty")]
    Empty,
    #[error("binding has no key after the last '+'")]
    MissingKey,
    #[error("binding '{0}' has no modifier")]
    MissingModifier(String),
    #[error("unknown modifier '{0}' in binding")]
    UnknownModifier(String),
    #[error("modifier '{0}' appears more than once")]
    DuplicateModifier(String),
    #[error("invalid key '{0}'")]
    InvalidKey(String),
}

/// One abstract modifier key.
///
/// `Meta` is the platform accelerator: Command on Mac-like layouts, Ctrl elsewhere.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModifierKey {
    Meta,
    Ctrl,
    Alt,
    Shift,
}

impl ModifierKey {
    /// Canonical emission order.
    pub const ALL: [ModifierKey; 4] = [
        ModifierKey::Meta,
        ModifierKey::Ctrl,
        ModifierKey::Alt,
        ModifierKey::Shift,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Meta => "meta",
            Self::Ctrl => "ctrl",
            Self::Alt => "alt",
            Self::Shift => "shift",
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "meta" => Some(Self::Meta),
            "ctrl" => Some(Self::Ctrl),
            "alt" => Some(Self::Alt),
            "shift" => Some(Self::Shift),
            _ => None,
        }
    }

    /// Single-glyph form used on Mac-like layouts.
    pub fn glyph(&self) -> char {
        match self {
            Self::Meta => '⌘',
            Self::Ctrl => '⌃',
            Self::Alt => '⌥',
            Self::Shift => '⇧',
        }
    }

    /// Textual form used on other layouts. `Meta` is physically the Ctrl key there.
    pub fn text(&self) -> &'static str {
        match self {
            Self::Meta | Self::Ctrl => "Ctrl",
            Self::Alt => "Alt",
            Self::Shift => "Shift",
        }
    }
}

impl fmt::Display for ModifierKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Abstract modifier flags for a binding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub meta: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        meta: false,
        ctrl: false,
        alt: false,
        shift: false,
    };
    pub const META: Modifiers = Modifiers {
        meta: true,
        ..Self::NONE
    };
    pub const META_SHIFT: Modifiers = Modifiers {
        meta: true,
        shift: true,
        ..Self::NONE
    };

    pub fn contains(&self, key: ModifierKey) -> bool {
        match key {
            ModifierKey::Meta => self.meta,
            ModifierKey::Ctrl => self.ctrl,
            ModifierKey::Alt => self.alt,
            ModifierKey::Shift => self.shift,
        }
    }

    pub fn insert(&mut self, key: ModifierKey) {
        match key {
            ModifierKey::Meta => self.meta = true,
            ModifierKey::Ctrl => self.ctrl = true,
            ModifierKey::Alt => self.alt = true,
            ModifierKey::Shift => self.shift = true,
        }
    }

    /// Modifiers present, in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = ModifierKey> {
        let modifiers = *self;
        ModifierKey::ALL
            .into_iter()
            .filter(move |m| modifiers.contains(*m))
    }

    pub fn any(&self) -> bool {
        self.meta || self.ctrl || self.alt || self.shift
    }

    pub fn none(&self) -> bool {
        !self.any()
    }
}

impl FromIterator<ModifierKey> for Modifiers {
    fn from_iter<I: IntoIterator<Item = ModifierKey>>(iter: I) -> Self {
        let mut modifiers = Modifiers::NONE;
        for key in iter {
            modifiers.insert(key);
        }
        modifiers
    }
}

/// A keyboard chord: a non-empty modifier set plus one primary key.
///
/// The key is stored lowercased. Construct through [`KeyBinding::new`] or [`parse`],
/// both of which reject bare keys.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    modifiers: Modifiers,
    key: Cow<'static, str>,
}

impl KeyBinding {
    /// Build a binding for the compiled-in default table.
    ///
    /// `key` must already be lowercase and `modifiers` non-empty; the registry tests
    /// check every entry against both.
    pub(crate) const fn from_static(modifiers: Modifiers, key: &'static str) -> Self {
        Self {
            modifiers,
            key: Cow::Borrowed(key),
        }
    }

    pub fn new(modifiers: Modifiers, key: impl AsRef<str>) -> Result<Self, ShortcutParseError> {
        let key = key.as_ref().to_lowercase();
        if key.is_empty() || ModifierKey::from_token(&key).is_some() {
            return Err(ShortcutParseError::MissingKey);
        }
        if key.contains(SEPARATOR) || key.chars().any(char::is_whitespace) {
            return Err(ShortcutParseError::InvalidKey(key));
        }
        if modifiers.none() {
            return Err(ShortcutParseError::MissingModifier(key));
        }
        Ok(Self {
            modifiers,
            key: Cow::Owned(key),
        })
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Canonical string, e.g. `meta+shift+1`.
    pub fn to_canonical_string(&self) -> String {
        serialize(self)
    }

    /// Human-readable form for the given platform.
    pub fn display_for(&self, platform: &dyn PlatformResolver) -> String {
        if platform.is_mac_like() {
            self.display_mac()
        } else {
            self.display_other()
        }
    }

    fn display_mac(&self) -> String {
        let mut s: String = self.modifiers.iter().map(|m| m.glyph()).collect();
        s.push_str(&key_glyph(&self.key));
        s
    }

    fn display_other(&self) -> String {
        // meta and ctrl share the "Ctrl" label here
        let mut parts: Vec<String> = Vec::with_capacity(4);
        for text in self.modifiers.iter().map(|m| m.text()) {
            if !parts.iter().any(|p| p == text) {
                parts.push(text.to_string());
            }
        }
        parts.push(key_text(&self.key));
        parts.join("+")
    }
}

impl fmt::Display for KeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&serialize(self))
    }
}

impl FromStr for KeyBinding {
    type Err = ShortcutParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

impl Serialize for KeyBinding {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&serialize(self))
    }
}

impl<'de> Deserialize<'de> for KeyBinding {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Encode a binding canonically: modifiers in `meta, ctrl, alt, shift` order, then the key.
pub fn serialize(binding: &KeyBinding) -> String {
    let mut parts: Vec<&str> = binding.modifiers.iter().map(|m| m.as_str()).collect();
    parts.push(binding.key());
    parts.join("+")
}

/// Decode a binding string.
///
/// The last `+`-separated token is the key and may not itself be a modifier name;
/// every earlier token must be a distinct modifier, and there must be at least one.
pub fn parse(s: &str) -> Result<KeyBinding, ShortcutParseError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ShortcutParseError::Empty);
    }

    let mut tokens: Vec<&str> = s.split(SEPARATOR).collect();
    let key = tokens.pop().ok_or(ShortcutParseError::Empty)?;
    if key.is_empty() {
        return Err(ShortcutParseError::MissingKey);
    }

    let mut modifiers = Modifiers::NONE;
    for token in tokens {
        let modifier = ModifierKey::from_token(token)
            .ok_or_else(|| ShortcutParseError::UnknownModifier(token.to_string()))?;
        if modifiers.contains(modifier) {
            return Err(ShortcutParseError::DuplicateModifier(token.to_string()));
        }
        modifiers.insert(modifier);
    }

    KeyBinding::new(modifiers, key)
}

/// Lenient form of [`parse`]: invalid input yields `None`.
pub fn parse_binding(s: &str) -> Option<KeyBinding> {
    parse(s).ok()
}

/// Normalize a key name reported by an input layer to binding form.
pub fn normalize_key(key: &str) -> String {
    match key {
        " " => "space".to_string(),
        k => k.to_lowercase(),
    }
}

fn key_glyph(key: &str) -> String {
    match key {
        "enter" => "↵",
        "escape" | "esc" => "⎋",
        "tab" => "⇥",
        "space" => "␣",
        "backspace" => "⌫",
        "delete" => "⌦",
        "arrowup" | "up" => "↑",
        "arrowdown" | "down" => "↓",
        "arrowleft" | "left" => "←",
        "arrowright" | "right" => "→",
        "home" => "↖",
        "end" => "↘",
        "pageup" => "⇞",
        "pagedown" => "⇟",
        k => return k.to_uppercase(),
    }
    .to_string()
}

fn key_text(key: &str) -> String {
    match key {
        "enter" => "Enter",
        "escape" | "esc" => "Esc",
        "tab" => "Tab",
        "space" => "Space",
        "backspace" => "Backspace",
        "delete" => "Delete",
        "arrowup" | "up" => "Up",
        "arrowdown" | "down" => "Down",
        "arrowleft" | "left" => "Left",
        "arrowright" | "right" => "Right",
        "home" => "Home",
        "end" => "End",
        "pageup" => "PageUp",
        "pagedown" => "PageDown",
        k => return k.to_uppercase(),
    }
    .to_string()
}
