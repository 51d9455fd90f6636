use super::*;
use crate::shortcuts::PlatformResolver;
use std::path::PathBuf;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.platform, None);
    assert_eq!(config.data_dir, None);
    assert_eq!(config.get_log_filter(), DEFAULT_LOG_FILTER);
    assert_eq!(config.get_data_dir(), default_data_dir());
}

#[test]
fn test_config_deserializes_camel_case() {
    let config: Config = serde_json::from_str(
        r#"{ "platform": "MacIntel", "dataDir": "/tmp/sk", "logFilter": "debug" }"#,
    )
    .unwrap();
    assert_eq!(config.platform.as_deref(), Some("MacIntel"));
    assert_eq!(config.get_data_dir(), PathBuf::from("/tmp/sk"));
    assert_eq!(config.get_log_filter(), "debug");
}

#[test]
fn test_config_ignores_unknown_fields() {
    let config: Config = serde_json::from_str(r#"{ "theme": "dark" }"#).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_config_serialization_skips_unset_fields() {
    let config = Config {
        log_filter: Some("warn".to_string()),
        ..Default::default()
    };
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(json, r#"{"logFilter":"warn"}"#);
}

#[test]
fn test_paths_derive_from_data_dir() {
    let config = Config {
        data_dir: Some("/var/lib/sk".to_string()),
        ..Default::default()
    };
    assert_eq!(
        config.get_settings_path(),
        PathBuf::from("/var/lib/sk/settings.json")
    );
    assert_eq!(
        config.get_cache_path(),
        PathBuf::from("/var/lib/sk/cache/shortcuts.json")
    );
    assert_eq!(config.get_log_dir(), PathBuf::from("/var/lib/sk/logs"));
}

#[test]
fn test_tilde_data_dir_is_expanded() {
    let config = Config {
        data_dir: Some("~/shortcuts".to_string()),
        ..Default::default()
    };
    assert!(!config.get_data_dir().to_string_lossy().starts_with('~'));
}

#[test]
fn test_blank_values_fall_back() {
    let config = Config {
        data_dir: Some("  ".to_string()),
        log_filter: Some(String::new()),
        ..Default::default()
    };
    assert_eq!(config.get_data_dir(), default_data_dir());
    assert_eq!(config.get_log_filter(), DEFAULT_LOG_FILTER);
}

#[test]
fn test_platform_override() {
    let mac = Config {
        platform: Some("MacIntel".to_string()),
        ..Default::default()
    };
    let linux = Config {
        platform: Some("Linux x86_64".to_string()),
        ..Default::default()
    };
    assert!(mac.get_platform().is_mac_like());
    assert!(!linux.get_platform().is_mac_like());
}

#[test]
fn test_load_config_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_config(&dir.path().join(CONFIG_FILE_NAME));
    assert_eq!(config, Config::default());
}

#[test]
fn test_load_config_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, r#"{ "platform": "Win32" }"#).unwrap();
    let config = load_config(&path);
    assert_eq!(config.platform.as_deref(), Some("Win32"));
}

#[test]
fn test_load_config_invalid_json_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, "{ not json").unwrap();
    assert_eq!(load_config(&path), Config::default());
}
