//! Keyboard shortcut engine.
//!
//! This module provides:
//! - A compiled-in registry of actions and default bindings
//! - Canonical binding serialization (`meta+shift+1`)
//! - Override resolution with a minimal override set
//! - Conflict detection over the resolved table
//! - Platform-aware matching and display formatting
//! - A handler dispatcher with per-action registration stacks
//! - Cache + durable persistence of user overrides
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use shortcut_kit::shortcuts::{ActionId, KeyEvent, PlatformInfo, ShortcutSession};
//!
//! let mut session = ShortcutSession::in_memory(Arc::new(PlatformInfo::current()));
//! let _reg = session.register(ActionId::NewTab, |_| println!("new tab"));
//!
//! session.set_override_str(ActionId::NewTab, "meta+alt+n")?;
//! session.handle_key_event(&KeyEvent::new("n").meta().alt());
//! println!("{}", session.display(ActionId::NewTab)); // ⌘⌥N on macOS
//! ```

mod conflicts;
mod dispatcher;
mod matcher;
mod persistence;
mod platform;
mod recorder;
mod registry;
mod resolver;
mod session;
mod types;

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;

#[cfg(test)]
#[path = "registry_tests.rs"]
mod registry_tests;

pub use types::{
    normalize_key, parse, parse_binding, serialize, KeyBinding, ModifierKey, Modifiers,
    ShortcutParseError,
};

pub use platform::{PhysicalModifiers, PlatformInfo, PlatformResolver};

pub use registry::{
    categories, default_binding, definition, definitions, ActionId, ShortcutCategory,
    ShortcutDefinition, UnknownActionId,
};

pub use resolver::{resolve, ResolvedTable, ShortcutOverrides};

pub use conflicts::{detect_conflicts, would_conflict, ConflictTable};

pub use matcher::{matches, EventTarget, KeyEvent};

pub use dispatcher::{ActionDispatcher, ActionHandler, Registration};

pub use recorder::{RecorderOutcome, RecorderState, ShortcutRecorder};

pub use persistence::{
    overrides_from_settings, overrides_from_value, overrides_to_value, DurableStore,
    JsonFileCache, JsonFileStore, MemoryCache, MemoryStore, OverrideCache, PersistenceError,
    SHORTCUTS_KEY,
};

pub use session::ShortcutSession;
