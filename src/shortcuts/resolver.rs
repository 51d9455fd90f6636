//! Override storage and resolution of the effective binding table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::registry::{self, ActionId};
use super::types::{self, KeyBinding};

/// User overrides, keyed by action id string, valued by canonical binding string.
///
/// Serializes as a flat JSON object: `{"switchTab1": "meta+shift+1"}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShortcutOverrides {
    overrides: BTreeMap<String, String>,
}

impl ShortcutOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a raw persisted map, dropping ids that aren't in the action set.
    ///
    /// Unknown ids usually come from a config written by an older action set.
    /// Values are kept verbatim; unparseable ones fall back to the default at resolution.
    pub fn from_raw(raw: BTreeMap<String, String>) -> Self {
        let overrides = raw
            .into_iter()
            .filter(|(id, _)| match id.parse::<ActionId>() {
                Ok(_) => true,
                Err(e) => {
                    debug!(error = %e, "Discarding override for unknown action");
                    false
                }
            })
            .collect();
        Self { overrides }
    }

    /// Record a binding for `id`, or drop the entry if it equals the default.
    ///
    /// Returns `true` if the stored set changed.
    pub fn set(&mut self, id: ActionId, binding: &KeyBinding) -> bool {
        let canonical = types::serialize(binding);
        if canonical == types::serialize(registry::default_binding(id)) {
            return self.overrides.remove(id.as_str()).is_some();
        }
        match self.overrides.insert(id.as_str().to_string(), canonical.clone()) {
            Some(previous) => previous != canonical,
            None => true,
        }
    }

    /// Remove the override for `id`. Returns `true` if one existed.
    pub fn remove(&mut self, id: ActionId) -> bool {
        self.overrides.remove(id.as_str()).is_some()
    }

    pub fn clear(&mut self) {
        self.overrides.clear();
    }

    pub fn get(&self, id: ActionId) -> Option<&str> {
        self.overrides.get(id.as_str()).map(String::as_str)
    }

    /// Whether `id` has a stored customization.
    pub fn has_override(&self, id: ActionId) -> bool {
        self.overrides.contains_key(id.as_str())
    }

    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.overrides
            .iter()
            .map(|(id, binding)| (id.as_str(), binding.as_str()))
    }

    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.overrides
    }
}

/// Effective binding for every action. Total over [`ActionId::ALL`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedTable {
    bindings: Vec<KeyBinding>,
}

impl ResolvedTable {
    pub fn get(&self, id: ActionId) -> &KeyBinding {
        &self.bindings[id.index()]
    }

    /// `(action, binding)` pairs in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (ActionId, &KeyBinding)> {
        ActionId::ALL.into_iter().zip(self.bindings.iter())
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Merge overrides over the defaults.
///
/// Overrides that fail to parse fall back to the default binding.
pub fn resolve(overrides: &ShortcutOverrides) -> ResolvedTable {
    let bindings = ActionId::ALL
        .into_iter()
        .map(|id| {
            overrides
                .get(id)
                .and_then(|raw| match types::parse(raw) {
                    Ok(binding) => Some(binding),
                    Err(e) => {
                        debug!(
                            action = %id,
                            binding = raw,
                            error = %e,
                            "Ignoring invalid override"
                        );
                        None
                    }
                })
                .unwrap_or_else(|| registry::default_binding(id).clone())
        })
        .collect();
    ResolvedTable { bindings }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shortcuts::types::parse;

    #[test]
    fn empty_overrides_resolve_to_defaults() {
        let table = resolve(&ShortcutOverrides::new());
        assert_eq!(table.len(), ActionId::COUNT);
        for (id, binding) in table.iter() {
            assert_eq!(binding, registry::default_binding(id), "{id}");
        }
    }

    #[test]
    fn valid_override_wins() {
        let mut overrides = ShortcutOverrides::new();
        overrides.set(ActionId::NewTab, &parse("meta+alt+n").unwrap());

        let table = resolve(&overrides);
        assert_eq!(table.get(ActionId::NewTab).to_canonical_string(), "meta+alt+n");
        assert_eq!(table.get(ActionId::CloseTab), registry::default_binding(ActionId::CloseTab));
    }

    #[test]
    fn invalid_override_falls_back_to_default() {
        let mut raw = BTreeMap::new();
        raw.insert("newTab".to_string(), "hyper+n".to_string());
        raw.insert("closeTab".to_string(), "w".to_string());
        let overrides = ShortcutOverrides::from_raw(raw);

        let table = resolve(&overrides);
        assert_eq!(table.get(ActionId::NewTab), registry::default_binding(ActionId::NewTab));
        assert_eq!(table.get(ActionId::CloseTab), registry::default_binding(ActionId::CloseTab));
    }

    #[test]
    fn setting_default_collapses_the_override() {
        let mut overrides = ShortcutOverrides::new();
        overrides.set(ActionId::ToggleSidebar, &parse("meta+shift+b").unwrap());
        assert!(overrides.has_override(ActionId::ToggleSidebar));

        let default = registry::default_binding(ActionId::ToggleSidebar).clone();
        assert!(overrides.set(ActionId::ToggleSidebar, &default));
        assert!(!overrides.has_override(ActionId::ToggleSidebar));
        assert!(overrides.is_empty());
        assert_eq!(resolve(&overrides).get(ActionId::ToggleSidebar), &default);
    }

    #[test]
    fn setting_default_without_override_is_a_no_op() {
        let mut overrides = ShortcutOverrides::new();
        let default = registry::default_binding(ActionId::FocusSearch).clone();
        assert!(!overrides.set(ActionId::FocusSearch, &default));
        assert!(overrides.is_empty());
    }

    #[test]
    fn set_reports_unchanged_value() {
        let mut overrides = ShortcutOverrides::new();
        let binding = parse("alt+shift+f").unwrap();
        assert!(overrides.set(ActionId::FocusSearch, &binding));
        assert!(!overrides.set(ActionId::FocusSearch, &binding));
    }

    #[test]
    fn unknown_ids_are_discarded_on_load() {
        let mut raw = BTreeMap::new();
        raw.insert("openLegacyPanel".to_string(), "meta+l".to_string());
        raw.insert("nextTab".to_string(), "ctrl+tab".to_string());

        let overrides = ShortcutOverrides::from_raw(raw);
        assert_eq!(overrides.len(), 1);
        assert_eq!(overrides.get(ActionId::NextTab), Some("ctrl+tab"));
    }

    #[test]
    fn serializes_as_flat_object() {
        let mut overrides = ShortcutOverrides::new();
        overrides.set(ActionId::SwitchTab1, &parse("shift+meta+1").unwrap());
        let json = serde_json::to_string(&overrides).unwrap();
        assert_eq!(json, r#"{"switchTab1":"meta+shift+1"}"#);
    }
}
