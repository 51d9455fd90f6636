//! Matching live key events against bindings.

use serde::{Deserialize, Serialize};

use super::platform::{PhysicalModifiers, PlatformResolver};
use super::types::{normalize_key, KeyBinding, Modifiers};

/// What kind of element had focus when the key was pressed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventTarget {
    #[default]
    Other,
    Input,
    TextArea,
    ContentEditable,
}

impl EventTarget {
    /// Targets where keystrokes belong to ordinary text entry.
    pub fn is_text_editable(&self) -> bool {
        matches!(self, Self::Input | Self::TextArea | Self::ContentEditable)
    }
}

/// One physical keypress as reported by the host input layer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyEvent {
    pub key: String,
    #[serde(default)]
    pub meta_key: bool,
    #[serde(default)]
    pub ctrl_key: bool,
    #[serde(default)]
    pub alt_key: bool,
    #[serde(default)]
    pub shift_key: bool,
    #[serde(default)]
    pub target: EventTarget,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }

    pub fn meta(mut self) -> Self {
        self.meta_key = true;
        self
    }

    pub fn ctrl(mut self) -> Self {
        self.ctrl_key = true;
        self
    }

    pub fn alt(mut self) -> Self {
        self.alt_key = true;
        self
    }

    pub fn shift(mut self) -> Self {
        self.shift_key = true;
        self
    }

    pub fn with_target(mut self, target: EventTarget) -> Self {
        self.target = target;
        self
    }

    pub fn any_modifier(&self) -> bool {
        self.meta_key || self.ctrl_key || self.alt_key || self.shift_key
    }

    /// Whether the pressed key is itself a modifier (Meta, Control, Alt or Shift).
    pub fn is_modifier_only(&self) -> bool {
        matches!(
            self.key.to_ascii_lowercase().as_str(),
            "meta" | "control" | "ctrl" | "alt" | "shift" | "os" | "altgraph"
        )
    }

    pub fn is_escape(&self) -> bool {
        matches!(self.key.to_ascii_lowercase().as_str(), "escape" | "esc")
    }

    /// Abstract modifiers for this event.
    ///
    /// Off Mac-like platforms the Control key is the accelerator, so it is read back
    /// as `meta`; this keeps recorded bindings aligned with the defaults.
    pub fn modifiers(&self, platform: &dyn PlatformResolver) -> Modifiers {
        let mut modifiers = Modifiers::NONE;
        if platform.is_mac_like() {
            modifiers.meta = self.meta_key;
            modifiers.ctrl = self.ctrl_key;
        } else {
            modifiers.meta = self.ctrl_key;
        }
        modifiers.alt = self.alt_key;
        modifiers.shift = self.shift_key;
        modifiers
    }

    /// The binding this event would record, or `None` for bare keys and lone modifiers.
    ///
    /// Off Mac-like platforms a held Meta (Windows/Super) key yields `None`: no abstract
    /// modifier maps to it there, so any recorded binding would fire on a different chord.
    pub fn to_binding(&self, platform: &dyn PlatformResolver) -> Option<KeyBinding> {
        if self.is_modifier_only() {
            return None;
        }
        if self.meta_key && !platform.is_mac_like() {
            return None;
        }
        KeyBinding::new(self.modifiers(platform), normalize_key(&self.key)).ok()
    }
}

/// Whether `event` satisfies `binding` on `platform`.
///
/// All four physical modifier flags must equal the expected ones exactly, so `meta+1`
/// does not fire on `meta+shift+1`. Keys compare case-insensitively.
pub fn matches(event: &KeyEvent, binding: &KeyBinding, platform: &dyn PlatformResolver) -> bool {
    let Some(expected) = PhysicalModifiers::expected_for(binding.modifiers(), platform) else {
        return false;
    };
    event.meta_key == expected.meta_key
        && event.ctrl_key == expected.ctrl_key
        && event.alt_key == expected.alt_key
        && event.shift_key == expected.shift_key
        && normalize_key(&event.key) == binding.key()
}
