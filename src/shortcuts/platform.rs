//! Platform detection for modifier remapping and display.
//!
//! The only question the engine asks of the platform is whether it has a Mac-like
//! keyboard layout (distinct Command and Control keys). The answer comes from an
//! injected description string so tests never need to stub the environment.

/// Capability consulted for modifier remapping and display glyphs.
pub trait PlatformResolver: Send + Sync {
    fn is_mac_like(&self) -> bool;
}

/// Substring (matched case-insensitively) that marks a Mac-like platform description.
const MAC_SIGNATURE: &str = "mac";

/// Platform derived from a description string such as `"MacIntel"`, `"macos"` or `"Win32"`.
///
/// A missing or blank description is treated as Mac-like.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlatformInfo {
    description: Option<String>,
}

impl PlatformInfo {
    pub fn from_description(description: Option<&str>) -> Self {
        Self {
            description: description.map(str::to_string),
        }
    }

    /// The platform this process was compiled for.
    pub fn current() -> Self {
        Self::from_description(Some(std::env::consts::OS))
    }

    pub fn mac() -> Self {
        Self::from_description(Some("macos"))
    }

    pub fn other() -> Self {
        Self::from_description(Some("linux"))
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl PlatformResolver for PlatformInfo {
    fn is_mac_like(&self) -> bool {
        match self.description.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(desc) => desc.to_ascii_lowercase().contains(MAC_SIGNATURE),
        }
    }
}

impl PlatformResolver for bool {
    fn is_mac_like(&self) -> bool {
        *self
    }
}

/// Physical modifier flags a binding expects on this platform.
///
/// `None` means no physical key combination can satisfy the binding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhysicalModifiers {
    pub meta_key: bool,
    pub ctrl_key: bool,
    pub alt_key: bool,
    pub shift_key: bool,
}

impl PhysicalModifiers {
    /// Translate abstract modifiers into physical key flags.
    ///
    /// On Mac-like platforms `meta` is Command and `ctrl` is Control. Elsewhere both map
    /// to the Control key, so a binding requiring both can never be pressed.
    pub fn expected_for(
        modifiers: super::types::Modifiers,
        platform: &dyn PlatformResolver,
    ) -> Option<Self> {
        if platform.is_mac_like() {
            return Some(Self {
                meta_key: modifiers.meta,
                ctrl_key: modifiers.ctrl,
                alt_key: modifiers.alt,
                shift_key: modifiers.shift,
            });
        }
        if modifiers.meta && modifiers.ctrl {
            return None;
        }
        Some(Self {
            meta_key: false,
            ctrl_key: modifiers.meta || modifiers.ctrl,
            alt_key: modifiers.alt,
            shift_key: modifiers.shift,
        })
    }
}
