//! Shortcut session: owns the override set, its persistence and the dispatcher.
//!
//! Startup reads the fast cache synchronously; [`ShortcutSession::reconcile`] later
//! replaces that value with the durable store's copy if they differ. Every mutation
//! writes the cache immediately and queues a durable write on a background task.
//! Durable write failures are logged and dropped.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::error::ResultExt;

use super::conflicts::{self, ConflictTable};
use super::dispatcher::{ActionDispatcher, Registration};
use super::matcher::KeyEvent;
use super::persistence::{
    overrides_from_settings, overrides_to_value, DurableStore, MemoryCache, MemoryStore,
    OverrideCache, SHORTCUTS_KEY,
};
use super::platform::PlatformResolver;
use super::registry::{self, ActionId};
use super::resolver::{resolve, ResolvedTable, ShortcutOverrides};
use super::types::{self, KeyBinding, ShortcutParseError};

enum WriteRequest {
    Patch(Value),
    Flush(oneshot::Sender<()>),
}

/// Background task applying durable writes in submission order.
struct PersistenceWriter {
    tx: mpsc::UnboundedSender<WriteRequest>,
}

impl PersistenceWriter {
    fn spawn(handle: &tokio::runtime::Handle, store: Arc<dyn DurableStore>) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<WriteRequest>();
        handle.spawn(async move {
            while let Some(request) = rx.recv().await {
                match request {
                    WriteRequest::Patch(value) => {
                        if let Err(e) = store.patch(SHORTCUTS_KEY, value).await {
                            warn!(error = %e, "Failed to persist shortcut overrides");
                        }
                    }
                    WriteRequest::Flush(done) => {
                        let _ = done.send(());
                    }
                }
            }
            debug!("Shortcut persistence writer stopped");
        });
        Self { tx }
    }
}

/// Live shortcut state for one UI instance.
pub struct ShortcutSession {
    overrides: ShortcutOverrides,
    platform: Arc<dyn PlatformResolver>,
    cache: Box<dyn OverrideCache>,
    store: Arc<dyn DurableStore>,
    writer: Option<PersistenceWriter>,
    dispatcher: ActionDispatcher,
    // Set by the first local mutation; the durable copy is stale from then on.
    locally_modified: bool,
}

impl ShortcutSession {
    /// Create a session, loading overrides from `cache`.
    ///
    /// Durable writes run on the tokio runtime current at construction; without one
    /// they are skipped and only the cache is updated.
    pub fn new(
        platform: Arc<dyn PlatformResolver>,
        cache: Box<dyn OverrideCache>,
        store: Arc<dyn DurableStore>,
    ) -> Self {
        let overrides = match cache.read() {
            Ok(Some(overrides)) => {
                debug!(count = overrides.len(), "Loaded shortcut overrides from cache");
                overrides
            }
            Ok(None) => ShortcutOverrides::new(),
            Err(e) => {
                warn!(error = %e, "Failed to read shortcut cache, using defaults");
                ShortcutOverrides::new()
            }
        };

        let writer = match tokio::runtime::Handle::try_current() {
            Ok(handle) => Some(PersistenceWriter::spawn(&handle, Arc::clone(&store))),
            Err(_) => {
                debug!("No async runtime, durable shortcut writes disabled");
                None
            }
        };

        Self {
            overrides,
            platform,
            cache,
            store,
            writer,
            dispatcher: ActionDispatcher::new(),
            locally_modified: false,
        }
    }

    /// Session backed by in-memory cache and store.
    pub fn in_memory(platform: Arc<dyn PlatformResolver>) -> Self {
        Self::new(
            platform,
            Box::new(MemoryCache::new()),
            Arc::new(MemoryStore::new()),
        )
    }

    /// Replace the cached overrides with the durable store's copy.
    ///
    /// Returns `true` if the override set changed. Identical values are left alone so
    /// the UI doesn't re-render for nothing. Once the session has been mutated locally
    /// the in-memory set wins and the durable copy is never applied.
    pub async fn reconcile(&mut self) -> bool {
        if self.locally_modified {
            debug!("Shortcuts changed locally, skipping reconcile");
            return false;
        }
        let settings = match self.store.read().await {
            Ok(settings) => settings,
            Err(e) => {
                warn!(error = %e, "Failed to read durable settings, keeping cached shortcuts");
                return false;
            }
        };
        let loaded = match overrides_from_settings(&settings) {
            Ok(loaded) => loaded,
            Err(e) => {
                warn!(error = %e, "Ignoring malformed shortcut settings");
                return false;
            }
        };
        if loaded == self.overrides {
            debug!("Durable shortcuts match cache, skipping reconcile");
            return false;
        }

        info!(count = loaded.len(), "Reconciled shortcut overrides from durable store");
        self.overrides = loaded;
        self.cache.write(&self.overrides).warn_on_err();
        true
    }

    pub fn platform(&self) -> &dyn PlatformResolver {
        self.platform.as_ref()
    }

    pub fn overrides(&self) -> &ShortcutOverrides {
        &self.overrides
    }

    /// Effective bindings, computed fresh from the current overrides.
    pub fn resolved(&self) -> ResolvedTable {
        resolve(&self.overrides)
    }

    pub fn conflicts(&self) -> ConflictTable {
        conflicts::detect_conflicts(&self.resolved())
    }

    pub fn binding(&self, id: ActionId) -> KeyBinding {
        self.resolved().get(id).clone()
    }

    /// Binding for `id` formatted for this session's platform.
    pub fn display(&self, id: ActionId) -> String {
        self.binding(id).display_for(self.platform())
    }

    pub fn is_customized(&self, id: ActionId) -> bool {
        self.overrides.has_override(id)
    }

    /// Actions other than `id` already bound to `binding`.
    pub fn would_conflict(&self, id: ActionId, binding: &KeyBinding) -> Vec<ActionId> {
        conflicts::would_conflict(&self.resolved(), id, binding)
    }

    /// Bind `id` to `binding`. Binding it back to its default removes the override.
    ///
    /// Returns `true` if anything changed.
    pub fn set_override(&mut self, id: ActionId, binding: &KeyBinding) -> bool {
        let changed = self.overrides.set(id, binding);
        if changed {
            info!(action = %id, binding = %binding, "Shortcut override set");
            self.persist();
        }
        changed
    }

    /// [`set_override`](Self::set_override) from a binding string.
    pub fn set_override_str(
        &mut self,
        id: ActionId,
        binding: &str,
    ) -> Result<bool, ShortcutParseError> {
        let binding = types::parse(binding)?;
        Ok(self.set_override(id, &binding))
    }

    /// Restore the default binding for `id`.
    pub fn reset(&mut self, id: ActionId) -> bool {
        let changed = self.overrides.remove(id);
        if changed {
            info!(action = %id, default = %registry::default_binding(id), "Shortcut reset");
            self.persist();
        }
        changed
    }

    pub fn reset_all(&mut self) -> bool {
        if self.overrides.is_empty() {
            return false;
        }
        self.overrides.clear();
        info!("All shortcuts reset to defaults");
        self.persist();
        true
    }

    pub fn dispatcher(&self) -> &ActionDispatcher {
        &self.dispatcher
    }

    pub fn register<F>(&self, id: ActionId, handler: F) -> Registration
    where
        F: Fn(ActionId) + Send + Sync + 'static,
    {
        self.dispatcher.register(id, handler)
    }

    /// Route a key event to the live handlers of matching actions.
    pub fn handle_key_event(&self, event: &KeyEvent) -> Vec<ActionId> {
        self.dispatcher
            .dispatch(event, &self.resolved(), self.platform.as_ref())
    }

    /// Wait until every queued durable write has been attempted.
    pub async fn flush(&self) {
        let Some(writer) = &self.writer else {
            return;
        };
        let (done_tx, done_rx) = oneshot::channel();
        if writer.tx.send(WriteRequest::Flush(done_tx)).is_ok() {
            let _ = done_rx.await;
        }
    }

    fn persist(&mut self) {
        self.locally_modified = true;
        self.cache.write(&self.overrides).warn_on_err();

        let Some(writer) = &self.writer else {
            warn!("Durable shortcut write skipped, no async runtime");
            return;
        };
        let value = overrides_to_value(&self.overrides);
        if writer.tx.send(WriteRequest::Patch(value)).is_err() {
            warn!("Shortcut persistence writer is gone, durable write dropped");
        }
    }
}

impl std::fmt::Debug for ShortcutSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShortcutSession")
            .field("overrides", &self.overrides)
            .field("mac_like", &self.platform.is_mac_like())
            .field("durable_writes", &self.writer.is_some())
            .field("locally_modified", &self.locally_modified)
            .finish()
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
