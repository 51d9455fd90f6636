//! shortcut-kit - keyboard shortcut bindings with user overrides
//!
//! This library provides the shortcut engine (registry, resolution, conflicts,
//! matching, dispatch, persistence) plus the config, logging and CLI plumbing
//! around it.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod shortcuts;
