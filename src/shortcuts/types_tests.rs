//! Tests for binding parsing, serialization and display.

use super::platform::PlatformInfo;
use super::registry;
use super::types::*;

fn mods(keys: &[ModifierKey]) -> Modifiers {
    keys.iter().copied().collect()
}

#[test]
fn serialize_uses_canonical_modifier_order() {
    let binding = KeyBinding::new(
        mods(&[ModifierKey::Shift, ModifierKey::Alt, ModifierKey::Meta, ModifierKey::Ctrl]),
        "K",
    )
    .unwrap();
    assert_eq!(serialize(&binding), "meta+ctrl+alt+shift+k");
}

#[test]
fn parse_reorders_modifiers() {
    let binding = parse("shift+meta+1").unwrap();
    assert_eq!(binding.to_canonical_string(), "meta+shift+1");
    assert_eq!(binding, parse("meta+shift+1").unwrap());
}

#[test]
fn parse_is_case_insensitive() {
    let binding = parse("Meta+Shift+K").unwrap();
    assert_eq!(binding.key(), "k");
    assert!(binding.modifiers().meta);
    assert!(binding.modifiers().shift);
}

#[test]
fn default_bindings_round_trip() {
    for def in registry::definitions() {
        let encoded = serialize(&def.default_binding);
        assert_eq!(parse(&encoded).as_ref(), Ok(&def.default_binding), "{encoded}");
        assert_eq!(serialize(&parse(&encoded).unwrap()), encoded);
    }
}

#[test]
fn parse_rejects_bare_key() {
    assert_eq!(
        parse("k"),
        Err(ShortcutParseError::MissingModifier("k".to_string()))
    );
}

#[test]
fn parse_rejects_unknown_modifier() {
    assert_eq!(
        parse("hyper+k"),
        Err(ShortcutParseError::UnknownModifier("hyper".to_string()))
    );
    assert_eq!(
        parse("cmd+k"),
        Err(ShortcutParseError::UnknownModifier("cmd".to_string()))
    );
}

#[test]
fn parse_rejects_duplicate_modifier() {
    assert_eq!(
        parse("meta+meta+k"),
        Err(ShortcutParseError::DuplicateModifier("meta".to_string()))
    );
}

#[test]
fn parse_rejects_empty_and_dangling_input() {
    assert_eq!(parse(""), Err(ShortcutParseError::Empty));
    assert_eq!(parse("   "), Err(ShortcutParseError::Empty));
    assert_eq!(parse("meta+"), Err(ShortcutParseError::MissingKey));
    assert!(parse("meta++").is_err());
    assert!(parse("+k").is_err());
}

#[test]
fn parse_binding_is_lenient() {
    assert!(parse_binding("meta+k").is_some());
    assert!(parse_binding("nonsense").is_none());
    assert!(parse_binding("meta+shift").is_none());
}

#[test]
fn new_rejects_separator_in_key() {
    assert!(matches!(
        KeyBinding::new(Modifiers::META, "a+b"),
        Err(ShortcutParseError::InvalidKey(_))
    ));
    assert!(KeyBinding::new(Modifiers::NONE, "a").is_err());
}

#[test]
fn mac_display_uses_glyphs_without_separator() {
    let mac = PlatformInfo::mac();
    assert_eq!(parse("meta+1").unwrap().display_for(&mac), "⌘1");
    assert_eq!(
        parse("shift+alt+ctrl+meta+k").unwrap().display_for(&mac),
        "⌘⌃⌥⇧K"
    );
    assert_eq!(parse("meta+enter").unwrap().display_for(&mac), "⌘↵");
}

#[test]
fn other_display_uses_text_with_plus() {
    let pc = PlatformInfo::other();
    assert_eq!(parse("meta+1").unwrap().display_for(&pc), "Ctrl+1");
    assert_eq!(parse("meta+shift+k").unwrap().display_for(&pc), "Ctrl+Shift+K");
    assert_eq!(parse("alt+arrowup").unwrap().display_for(&pc), "Alt+Up");
}

#[test]
fn other_display_names_ctrl_once_for_meta_and_ctrl() {
    let pc = PlatformInfo::other();
    assert_eq!(parse("meta+ctrl+t").unwrap().display_for(&pc), "Ctrl+T");
    assert_eq!(parse("meta+ctrl+shift+t").unwrap().display_for(&pc), "Ctrl+Shift+T");
}

#[test]
fn serde_uses_canonical_string() {
    let binding = parse("shift+meta+p").unwrap();
    assert_eq!(serde_json::to_string(&binding).unwrap(), r#""meta+shift+p""#);

    let back: KeyBinding = serde_json::from_str(r#""Meta+Shift+P""#).unwrap();
    assert_eq!(back, binding);
    assert!(serde_json::from_str::<KeyBinding>(r#""p""#).is_err());
}

#[test]
fn static_and_owned_bindings_compare_equal() {
    let from_table = registry::default_binding(registry::ActionId::SwitchTab1);
    assert_eq!(from_table, &parse("meta+1").unwrap());
}

#[test]
fn normalize_key_maps_space() {
    assert_eq!(normalize_key(" "), "space");
    assert_eq!(normalize_key("ArrowUp"), "arrowup");
}
