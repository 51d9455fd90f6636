//! Storage contracts for user shortcut overrides.
//!
//! Two backends cooperate:
//! - [`OverrideCache`] - fast, synchronous, read at startup so bindings are usable at once
//! - [`DurableStore`] - slower key-value settings bag, reconciled after startup
//!
//! The durable bag keeps overrides under [`SHORTCUTS_KEY`] as a flat object:
//! `{"switchTab1": "meta+shift+1"}`. Writes patch that one key; other keys survive.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use super::resolver::ShortcutOverrides;

/// Key under which overrides live in the durable settings bag.
pub const SHORTCUTS_KEY: &str = "shortcuts";

/// Error that can occur when loading/saving shortcut overrides.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("'{key}' is not a JSON object")]
    InvalidShape { key: String },
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Synchronous local cache of the override set.
pub trait OverrideCache: Send + Sync {
    /// `Ok(None)` when nothing has been cached yet.
    fn read(&self) -> Result<Option<ShortcutOverrides>, PersistenceError>;
    fn write(&mut self, overrides: &ShortcutOverrides) -> Result<(), PersistenceError>;
}

/// Asynchronous settings store holding an arbitrary key-value bag.
#[async_trait]
pub trait DurableStore: Send + Sync {
    async fn read(&self) -> Result<Map<String, Value>, PersistenceError>;
    /// Merge `value` under `key`, leaving unrelated keys untouched.
    async fn patch(&self, key: &str, value: Value) -> Result<(), PersistenceError>;
}

/// Extract the override set from a settings bag.
///
/// A missing key means no overrides. Non-string values and unknown ids are dropped.
pub fn overrides_from_settings(
    settings: &Map<String, Value>,
) -> Result<ShortcutOverrides, PersistenceError> {
    match settings.get(SHORTCUTS_KEY) {
        None | Some(Value::Null) => Ok(ShortcutOverrides::new()),
        Some(value) => overrides_from_value(value),
    }
}

pub fn overrides_from_value(value: &Value) -> Result<ShortcutOverrides, PersistenceError> {
    let object = value.as_object().ok_or_else(|| PersistenceError::InvalidShape {
        key: SHORTCUTS_KEY.to_string(),
    })?;
    let raw: BTreeMap<String, String> = object
        .iter()
        .filter_map(|(id, binding)| match binding.as_str() {
            Some(s) => Some((id.clone(), s.to_string())),
            None => {
                debug!(action = %id, "Skipping non-string shortcut value");
                None
            }
        })
        .collect();
    Ok(ShortcutOverrides::from_raw(raw))
}

pub fn overrides_to_value(overrides: &ShortcutOverrides) -> Value {
    Value::Object(
        overrides
            .iter()
            .map(|(id, binding)| (id.to_string(), Value::String(binding.to_string())))
            .collect(),
    )
}

/// Write `contents` to `path` through a temp file and rename.
fn write_atomic(path: &Path, contents: &str) -> Result<(), PersistenceError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, contents)?;
    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }
    Ok(())
}

// ============================================================================
// File-backed implementations
// ============================================================================

/// Override cache stored as a flat JSON object in its own file.
#[derive(Clone, Debug)]
pub struct JsonFileCache {
    path: PathBuf,
}

impl JsonFileCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OverrideCache for JsonFileCache {
    fn read(&self) -> Result<Option<ShortcutOverrides>, PersistenceError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        let value: Value = serde_json::from_str(&content)?;
        overrides_from_value(&value).map(Some)
    }

    fn write(&mut self, overrides: &ShortcutOverrides) -> Result<(), PersistenceError> {
        let content = serde_json::to_string_pretty(overrides)?;
        write_atomic(&self.path, &content)
    }
}

/// Durable settings bag stored as a JSON object file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles from concurrent patches.
    write_lock: tokio::sync::Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: tokio::sync::Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_bag(&self) -> Result<Map<String, Value>, PersistenceError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str::<Value>(&content)? {
            Value::Object(map) => Ok(map),
            _ => Err(PersistenceError::InvalidShape {
                key: self.path.display().to_string(),
            }),
        }
    }
}

#[async_trait]
impl DurableStore for JsonFileStore {
    async fn read(&self) -> Result<Map<String, Value>, PersistenceError> {
        self.read_bag().await
    }

    async fn patch(&self, key: &str, value: Value) -> Result<(), PersistenceError> {
        let _guard = self.write_lock.lock().await;
        let mut bag = self.read_bag().await?;
        bag.insert(key.to_string(), value);
        let content = serde_json::to_string_pretty(&Value::Object(bag))?;

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, content).await?;
        if let Err(e) = tokio::fs::rename(&tmp_path, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }
        debug!(path = %self.path.display(), key, "Patched settings file");
        Ok(())
    }
}

// ============================================================================
// In-memory implementations
// ============================================================================

/// Cache kept in memory only.
#[derive(Clone, Debug, Default)]
pub struct MemoryCache {
    value: Option<ShortcutOverrides>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_overrides(overrides: ShortcutOverrides) -> Self {
        Self {
            value: Some(overrides),
        }
    }
}

impl OverrideCache for MemoryCache {
    fn read(&self) -> Result<Option<ShortcutOverrides>, PersistenceError> {
        Ok(self.value.clone())
    }

    fn write(&mut self, overrides: &ShortcutOverrides) -> Result<(), PersistenceError> {
        self.value = Some(overrides.clone());
        Ok(())
    }
}

/// Settings bag kept in memory, with optional write-failure injection.
#[derive(Debug, Default)]
pub struct MemoryStore {
    bag: Mutex<Map<String, Value>>,
    fail_writes: Mutex<bool>,
    writes: Mutex<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bag(bag: Map<String, Value>) -> Self {
        Self {
            bag: Mutex::new(bag),
            ..Default::default()
        }
    }

    /// Make subsequent patches fail with [`PersistenceError::Unavailable`].
    pub fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.lock() = fail;
    }

    pub fn snapshot(&self) -> Map<String, Value> {
        self.bag.lock().clone()
    }

    /// Number of successful patches.
    pub fn write_count(&self) -> usize {
        *self.writes.lock()
    }
}

#[async_trait]
impl DurableStore for MemoryStore {
    async fn read(&self) -> Result<Map<String, Value>, PersistenceError> {
        Ok(self.bag.lock().clone())
    }

    async fn patch(&self, key: &str, value: Value) -> Result<(), PersistenceError> {
        if *self.fail_writes.lock() {
            return Err(PersistenceError::Unavailable("writes disabled".to_string()));
        }
        self.bag.lock().insert(key.to_string(), value);
        *self.writes.lock() += 1;
        Ok(())
    }
}
