//! Conflict detection over a resolved table.
//!
//! A conflict is two or more actions whose effective bindings serialize identically.
//! Detection only reports; choosing a winner is left to the user.

use std::collections::BTreeMap;

use super::registry::ActionId;
use super::resolver::ResolvedTable;
use super::types::{self, KeyBinding};

/// Canonical binding string -> actions sharing it. Only groups of two or more.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConflictTable {
    groups: BTreeMap<String, Vec<ActionId>>,
}

impl ConflictTable {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of conflicting binding strings.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn get(&self, binding: &str) -> Option<&[ActionId]> {
        self.groups.get(binding).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ActionId])> {
        self.groups
            .iter()
            .map(|(binding, ids)| (binding.as_str(), ids.as_slice()))
    }

    /// Whether `id` shares its binding with any other action.
    pub fn contains(&self, id: ActionId) -> bool {
        self.groups.values().any(|ids| ids.contains(&id))
    }

    /// The other actions sharing a binding with `id`.
    pub fn conflicts_for(&self, id: ActionId) -> Vec<ActionId> {
        self.groups
            .values()
            .find(|ids| ids.contains(&id))
            .map(|ids| ids.iter().copied().filter(|other| *other != id).collect())
            .unwrap_or_default()
    }
}

/// Group actions by canonical binding and keep the shared ones.
///
/// Members of each group are listed in registry order.
pub fn detect_conflicts(resolved: &ResolvedTable) -> ConflictTable {
    let mut by_binding: BTreeMap<String, Vec<ActionId>> = BTreeMap::new();
    for (id, binding) in resolved.iter() {
        by_binding
            .entry(types::serialize(binding))
            .or_default()
            .push(id);
    }
    by_binding.retain(|_, ids| ids.len() > 1);
    ConflictTable { groups: by_binding }
}

/// Actions other than `id` that already resolve to `binding`.
///
/// Lets a recorder warn before a new binding is saved.
pub fn would_conflict(
    resolved: &ResolvedTable,
    id: ActionId,
    binding: &KeyBinding,
) -> Vec<ActionId> {
    let canonical = types::serialize(binding);
    resolved
        .iter()
        .filter(|(other, existing)| *other != id && types::serialize(existing) == canonical)
        .map(|(other, _)| other)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shortcuts::registry;
    use crate::shortcuts::resolver::{resolve, ShortcutOverrides};
    use crate::shortcuts::types::parse;

    #[test]
    fn defaults_have_no_conflicts() {
        let table = detect_conflicts(&resolve(&ShortcutOverrides::new()));
        assert!(table.is_empty(), "unexpected conflicts: {table:?}");
    }

    #[test]
    fn overriding_onto_another_default_creates_one_group() {
        let mut overrides = ShortcutOverrides::new();
        overrides.set(ActionId::NewTab, registry::default_binding(ActionId::SwitchTab1));

        let table = detect_conflicts(&resolve(&overrides));
        assert_eq!(table.len(), 1);
        assert_eq!(
            table.get("meta+1"),
            Some(&[ActionId::SwitchTab1, ActionId::NewTab][..])
        );
        assert!(table.contains(ActionId::NewTab));
        assert!(!table.contains(ActionId::CloseTab));
    }

    #[test]
    fn three_way_conflict_is_a_single_group() {
        let mut overrides = ShortcutOverrides::new();
        let shared = parse("alt+x").unwrap();
        overrides.set(ActionId::CloseTab, &shared);
        overrides.set(ActionId::FocusSearch, &shared);
        overrides.set(ActionId::ToggleKanban, &shared);

        let table = detect_conflicts(&resolve(&overrides));
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("alt+x").map(<[ActionId]>::len), Some(3));
        assert_eq!(
            table.conflicts_for(ActionId::FocusSearch),
            vec![ActionId::CloseTab, ActionId::ToggleKanban]
        );
    }

    #[test]
    fn moving_away_resolves_the_conflict() {
        let mut overrides = ShortcutOverrides::new();
        overrides.set(ActionId::NewTab, &parse("meta+1").unwrap());
        assert!(!detect_conflicts(&resolve(&overrides)).is_empty());

        overrides.remove(ActionId::NewTab);
        assert!(detect_conflicts(&resolve(&overrides)).is_empty());
    }

    #[test]
    fn would_conflict_ignores_the_action_itself() {
        let resolved = resolve(&ShortcutOverrides::new());
        let own = registry::default_binding(ActionId::CommandPalette);
        assert!(would_conflict(&resolved, ActionId::CommandPalette, own).is_empty());
        assert_eq!(
            would_conflict(&resolved, ActionId::FocusSearch, own),
            vec![ActionId::CommandPalette]
        );
    }
}
