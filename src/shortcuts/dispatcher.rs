//! Routing matched key events to registered action handlers.
//!
//! Each action keeps a stack of handlers contributed by independently mounted UI
//! scopes. Only the top of the stack is live; dropping it re-exposes the one below.

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tracing::{debug, trace};

use super::matcher::{self, KeyEvent};
use super::platform::PlatformResolver;
use super::registry::ActionId;
use super::resolver::ResolvedTable;

/// Callback invoked when an action's binding is pressed.
pub type ActionHandler = Arc<dyn Fn(ActionId) + Send + Sync>;

struct HandlerEntry {
    token: u64,
    handler: ActionHandler,
}

#[derive(Default)]
struct HandlerStacks {
    stacks: HashMap<ActionId, Vec<HandlerEntry>>,
    next_token: u64,
}

impl HandlerStacks {
    fn live(&self, id: ActionId) -> Option<ActionHandler> {
        self.stacks
            .get(&id)
            .and_then(|stack| stack.last())
            .map(|entry| Arc::clone(&entry.handler))
    }

    fn remove(&mut self, id: ActionId, token: u64) -> bool {
        let Some(stack) = self.stacks.get_mut(&id) else {
            return false;
        };
        let before = stack.len();
        stack.retain(|entry| entry.token != token);
        let removed = stack.len() != before;
        if stack.is_empty() {
            self.stacks.remove(&id);
        }
        removed
    }
}

/// Handler registry and event router.
///
/// Cloning is cheap; clones share the same handler stacks.
#[derive(Clone, Default)]
pub struct ActionDispatcher {
    inner: Arc<Mutex<HandlerStacks>>,
}

impl ActionDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push `handler` on top of the stack for `id`.
    ///
    /// The returned [`Registration`] removes the handler when unregistered or dropped.
    pub fn register<F>(&self, id: ActionId, handler: F) -> Registration
    where
        F: Fn(ActionId) + Send + Sync + 'static,
    {
        let mut stacks = self.inner.lock();
        let token = stacks.next_token;
        stacks.next_token += 1;
        stacks.stacks.entry(id).or_default().push(HandlerEntry {
            token,
            handler: Arc::new(handler),
        });
        trace!(action = %id, token, "Registered shortcut handler");
        Registration {
            stacks: Arc::downgrade(&self.inner),
            id,
            token,
            released: false,
        }
    }

    /// The handler that would run for `id` right now.
    pub fn live_handler(&self, id: ActionId) -> Option<ActionHandler> {
        self.inner.lock().live(id)
    }

    pub fn has_handler(&self, id: ActionId) -> bool {
        self.inner.lock().stacks.contains_key(&id)
    }

    /// Number of stacked registrations for `id`.
    pub fn handler_count(&self, id: ActionId) -> usize {
        self.inner.lock().stacks.get(&id).map_or(0, Vec::len)
    }

    /// Invoke the live handler of every action whose binding matches `event`.
    ///
    /// Events aimed at text-editable targets are never dispatched. Returns the actions
    /// whose handlers ran; more than one only happens when bindings conflict.
    pub fn dispatch(
        &self,
        event: &KeyEvent,
        resolved: &ResolvedTable,
        platform: &dyn PlatformResolver,
    ) -> Vec<ActionId> {
        if event.target.is_text_editable() {
            trace!(key = %event.key, target = ?event.target, "Suppressed shortcut in text field");
            return Vec::new();
        }

        let matched: Vec<ActionId> = resolved
            .iter()
            .filter(|(_, binding)| matcher::matches(event, binding, platform))
            .map(|(id, _)| id)
            .collect();
        if matched.is_empty() {
            return Vec::new();
        }

        // Handlers run without the lock held so they may register or unregister.
        let to_run: Vec<(ActionId, ActionHandler)> = {
            let stacks = self.inner.lock();
            matched
                .iter()
                .filter_map(|id| stacks.live(*id).map(|handler| (*id, handler)))
                .collect()
        };

        let mut fired = Vec::with_capacity(to_run.len());
        for (id, handler) in to_run {
            debug!(action = %id, key = %event.key, "Dispatching shortcut");
            handler(id);
            fired.push(id);
        }
        fired
    }
}

impl std::fmt::Debug for ActionDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stacks = self.inner.lock();
        f.debug_struct("ActionDispatcher")
            .field("registered_actions", &stacks.stacks.len())
            .finish()
    }
}

/// Handle returned by [`ActionDispatcher::register`].
#[must_use = "dropping a Registration unregisters its handler"]
pub struct Registration {
    stacks: Weak<Mutex<HandlerStacks>>,
    id: ActionId,
    token: u64,
    released: bool,
}

impl Registration {
    pub fn action(&self) -> ActionId {
        self.id
    }

    /// Remove the handler from its stack.
    pub fn unregister(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        if let Some(stacks) = self.stacks.upgrade() {
            if stacks.lock().remove(self.id, self.token) {
                trace!(action = %self.id, token = self.token, "Unregistered shortcut handler");
            }
        }
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        self.release();
    }
}
