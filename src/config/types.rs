//! Configuration type definitions
//!
//! Every field is optional in the file; accessors apply the defaults.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::defaults::*;
use crate::shortcuts::PlatformInfo;

/// Top-level configuration loaded from `config.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Platform description override (e.g. "MacIntel", "linux").
    /// When absent the host OS is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    /// Where settings, cache and logs live. `~` is expanded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,
    /// Default tracing filter directive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
}

// ============================================
// Accessors
// ============================================

impl Config {
    /// Resolved data directory, falling back to `~/.shortcut-kit`.
    pub fn get_data_dir(&self) -> PathBuf {
        match self.data_dir.as_deref().map(str::trim) {
            Some(dir) if !dir.is_empty() => PathBuf::from(shellexpand::tilde(dir).as_ref()),
            _ => default_data_dir(),
        }
    }

    pub fn get_settings_path(&self) -> PathBuf {
        self.get_data_dir().join(SETTINGS_FILE_NAME)
    }

    pub fn get_cache_path(&self) -> PathBuf {
        self.get_data_dir().join(CACHE_FILE_PATH)
    }

    pub fn get_log_dir(&self) -> PathBuf {
        self.get_data_dir().join(LOG_DIR_NAME)
    }

    pub fn get_log_filter(&self) -> &str {
        self.log_filter
            .as_deref()
            .filter(|f| !f.trim().is_empty())
            .unwrap_or(DEFAULT_LOG_FILTER)
    }

    /// Platform signal for display and matching. A configured description wins over the host OS.
    pub fn get_platform(&self) -> PlatformInfo {
        match &self.platform {
            Some(description) => PlatformInfo::from_description(Some(description.as_str())),
            None => PlatformInfo::current(),
        }
    }
}

/// `~/.shortcut-kit`, or a temp directory when there is no home.
pub fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(DEFAULT_CONFIG_DIR_NAME))
        .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_CONFIG_DIR_NAME))
}

/// `~/.shortcut-kit/config.json`
pub fn default_config_path() -> PathBuf {
    default_data_dir().join(CONFIG_FILE_NAME)
}
