//! Tests for the compiled-in action table.

use std::collections::HashSet;

use super::registry::*;
use super::types::serialize;

#[test]
fn table_is_ordered_like_action_ids() {
    assert_eq!(DEFINITIONS.len(), ActionId::ALL.len());
    for (index, id) in ActionId::ALL.into_iter().enumerate() {
        assert_eq!(DEFINITIONS[index].id, id);
        assert_eq!(id.index(), index);
        assert_eq!(definition(id).id, id);
    }
}

#[test]
fn every_default_has_a_modifier_and_lowercase_key() {
    for def in definitions() {
        let binding = &def.default_binding;
        assert!(binding.modifiers().any(), "{} has no modifier", def.id);
        assert_eq!(binding.key(), binding.key().to_lowercase(), "{}", def.id);
        assert!(!binding.key().is_empty(), "{}", def.id);
    }
}

#[test]
fn defaults_are_pairwise_distinct() {
    let mut seen = HashSet::new();
    for def in definitions() {
        assert!(
            seen.insert(serialize(&def.default_binding)),
            "duplicate default for {}",
            def.id
        );
    }
}

#[test]
fn id_strings_round_trip() {
    for id in ActionId::ALL {
        assert_eq!(id.as_str().parse::<ActionId>(), Ok(id));
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.as_str()));
    }
    assert_eq!(
        "openLegacyPanel".parse::<ActionId>(),
        Err(UnknownActionId("openLegacyPanel".to_string()))
    );
}

#[test]
fn switch_tab_lookup() {
    assert_eq!(ActionId::switch_tab(1), Some(ActionId::SwitchTab1));
    assert_eq!(ActionId::switch_tab(9), Some(ActionId::SwitchTab9));
    assert_eq!(ActionId::switch_tab(0), None);
    assert_eq!(ActionId::switch_tab(10), None);
    assert_eq!(serialize(default_binding(ActionId::SwitchTab4)), "meta+4");
}

#[test]
fn categories_cover_every_action_once() {
    let groups = categories();
    let total: usize = groups.iter().map(|(_, ids)| ids.len()).sum();
    assert_eq!(total, ActionId::COUNT);

    let mut seen = HashSet::new();
    for (category, ids) in &groups {
        for id in ids {
            assert!(seen.insert(*id));
            assert_eq!(definition(*id).category, *category);
        }
    }
    assert_eq!(groups[0].0, ShortcutCategory::Tabs);
}
