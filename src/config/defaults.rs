//! Default configuration values
//!
//! All constants used throughout the config module are defined here.

/// Directory under the user's home holding config, settings, cache and logs
pub const DEFAULT_CONFIG_DIR_NAME: &str = ".shortcut-kit";

/// Config file name inside the data directory
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Durable settings bag (shared with other app settings)
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Fast local override cache, relative to the data directory
pub const CACHE_FILE_PATH: &str = "cache/shortcuts.json";

/// Log directory, relative to the data directory
pub const LOG_DIR_NAME: &str = "logs";

/// Default tracing filter when neither config nor `RUST_LOG` set one
pub const DEFAULT_LOG_FILTER: &str = "info";
