//! Interactive capture of a new binding for one action.
//!
//! ```text
//! Idle --start--> Recording --chord--> Pending --confirm--> (Saved) Idle
//!                     |                   |
//!                     +------Escape-------+--cancel/Escape--> (Cancelled) Idle
//! ```
//!
//! Lone modifier presses and bare keys keep the recorder listening. A new chord while
//! pending replaces the pending binding. Every capture reports the other actions that
//! already resolve to the captured binding.

use tracing::debug;

use super::matcher::KeyEvent;
use super::registry::ActionId;
use super::session::ShortcutSession;
use super::types::KeyBinding;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum RecorderState {
    #[default]
    Idle,
    Recording {
        action: ActionId,
    },
    Pending {
        action: ActionId,
        binding: KeyBinding,
        conflicts: Vec<ActionId>,
    },
}

/// Result of feeding the recorder an input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecorderOutcome {
    /// Not recording; the input was not consumed.
    Ignored,
    /// Still waiting for a usable chord.
    Listening,
    /// A chord was captured and awaits confirmation. `conflicts` lists the other
    /// actions already bound to it.
    Captured {
        binding: KeyBinding,
        conflicts: Vec<ActionId>,
    },
    /// Recording ended without changing anything.
    Cancelled(ActionId),
    /// The captured binding was applied.
    Saved { action: ActionId, binding: KeyBinding },
}

#[derive(Clone, Debug, Default)]
pub struct ShortcutRecorder {
    state: RecorderState,
}

impl ShortcutRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &RecorderState {
        &self.state
    }

    /// Whether key events should be routed here instead of the dispatcher.
    pub fn is_active(&self) -> bool {
        !matches!(self.state, RecorderState::Idle)
    }

    pub fn action(&self) -> Option<ActionId> {
        match &self.state {
            RecorderState::Idle => None,
            RecorderState::Recording { action } | RecorderState::Pending { action, .. } => {
                Some(*action)
            }
        }
    }

    pub fn pending(&self) -> Option<&KeyBinding> {
        match &self.state {
            RecorderState::Pending { binding, .. } => Some(binding),
            _ => None,
        }
    }

    /// Actions that would share the pending binding. Empty when nothing is pending.
    pub fn conflicts(&self) -> &[ActionId] {
        match &self.state {
            RecorderState::Pending { conflicts, .. } => conflicts.as_slice(),
            _ => &[],
        }
    }

    /// Begin listening for a binding for `action`. Any earlier capture is discarded.
    pub fn start(&mut self, action: ActionId) {
        debug!(action = %action, "Recording shortcut");
        self.state = RecorderState::Recording { action };
    }

    /// Feed a keydown. Captured chords are checked against `session`'s resolved table.
    pub fn handle_key(&mut self, event: &KeyEvent, session: &ShortcutSession) -> RecorderOutcome {
        let Some(action) = self.action() else {
            return RecorderOutcome::Ignored;
        };

        if event.is_escape() {
            return self.cancel();
        }
        if event.is_modifier_only() {
            return RecorderOutcome::Listening;
        }
        match event.to_binding(session.platform()) {
            Some(binding) => {
                let conflicts = session.would_conflict(action, &binding);
                debug!(
                    action = %action,
                    binding = %binding,
                    conflicts = conflicts.len(),
                    "Captured shortcut"
                );
                self.state = RecorderState::Pending {
                    action,
                    binding: binding.clone(),
                    conflicts: conflicts.clone(),
                };
                RecorderOutcome::Captured { binding, conflicts }
            }
            None => RecorderOutcome::Listening,
        }
    }

    /// Apply the pending binding to `session`.
    ///
    /// Only valid while pending; otherwise nothing happens and `Ignored` is returned.
    pub fn confirm(&mut self, session: &mut ShortcutSession) -> RecorderOutcome {
        match std::mem::take(&mut self.state) {
            RecorderState::Pending { action, binding, .. } => {
                session.set_override(action, &binding);
                RecorderOutcome::Saved { action, binding }
            }
            other => {
                self.state = other;
                RecorderOutcome::Ignored
            }
        }
    }

    pub fn cancel(&mut self) -> RecorderOutcome {
        match self.action() {
            Some(action) => {
                debug!(action = %action, "Shortcut recording cancelled");
                self.state = RecorderState::Idle;
                RecorderOutcome::Cancelled(action)
            }
            None => RecorderOutcome::Ignored,
        }
    }
}
