//! Configuration module - CLI and engine settings
//!
//! This module provides functionality for:
//! - Loading configuration from ~/.shortcut-kit/config.json
//! - Default values for all settings
//! - Resolving data, cache, settings and log paths
//!
//! # Module Structure
//!
//! - `defaults` - All default constant values
//! - `types` - The `Config` struct and its accessors
//! - `loader` - File system loading and parsing

mod defaults;
mod loader;
mod types;

pub use defaults::{
    CACHE_FILE_PATH, CONFIG_FILE_NAME, DEFAULT_CONFIG_DIR_NAME, DEFAULT_LOG_FILTER, LOG_DIR_NAME,
    SETTINGS_FILE_NAME,
};

pub use types::{default_config_path, default_data_dir, Config};

pub use loader::load_config;

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
