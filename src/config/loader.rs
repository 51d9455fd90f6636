//! Configuration loading from file system
//!
//! Handles loading and parsing the config.json file.

use std::path::Path;

use tracing::{info, instrument, warn};

use super::types::Config;

/// Load configuration from `path`.
///
/// Returns `Config::default()` if the file is missing, unreadable, or not valid JSON.
#[instrument(name = "load_config", fields(path = %path.display()))]
pub fn load_config(path: &Path) -> Config {
    if !path.exists() {
        info!("Config file not found, using defaults");
        return Config::default();
    }

    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            warn!(error = %e, "Failed to read config file, using defaults");
            return Config::default();
        }
    };

    match serde_json::from_str::<Config>(&contents) {
        Ok(config) => {
            info!("Successfully loaded config");
            config
        }
        Err(e) => {
            warn!(
                error = %e,
                line = e.line(),
                column = e.column(),
                "Failed to parse config JSON, using defaults"
            );
            Config::default()
        }
    }
}
