use thiserror::Error;
use tracing::{error, warn};

use crate::shortcuts::{PersistenceError, ShortcutParseError, UnknownActionId};

/// Error severity for UI display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,    // informational
    Warning, // recoverable
    Error,   // operation failed
}

/// Errors surfaced at the edges of the shortcut engine (CLI input, storage).
///
/// Inside the engine these are recovered locally: bad bindings fall back to defaults,
/// unknown ids are dropped, and persistence failures are logged.
#[derive(Error, Debug)]
pub enum ShortcutError {
    #[error("Invalid binding '{input}': {source}")]
    InvalidBinding {
        input: String,
        #[source]
        source: ShortcutParseError,
    },

    #[error(transparent)]
    UnknownAction(#[from] UnknownActionId),

    #[error("Persistence failed: {0}")]
    Persistence(#[from] PersistenceError),
}

impl ShortcutError {
    pub fn invalid_binding(input: impl Into<String>, source: ShortcutParseError) -> Self {
        Self::InvalidBinding {
            input: input.into(),
            source,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidBinding { .. } => ErrorSeverity::Warning,
            Self::UnknownAction(_) => ErrorSeverity::Info,
            Self::Persistence(_) => ErrorSeverity::Error,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidBinding { input, source } => {
                format!("'{}' is not a valid shortcut ({})", input, source)
            }
            Self::UnknownAction(e) => format!("No action named '{}'", e.0),
            Self::Persistence(_) => "Your shortcut change may not have been saved".to_string(),
        }
    }
}

/// Extension trait for silent error logging with caller location tracking.
/// Use when the operation is recoverable and user doesn't need to know.
///
/// # Examples
///
/// ```ignore
/// use shortcut_kit::error::ResultExt;
///
/// // Keep going if the cache can't be written
/// cache.write(&overrides).warn_on_err();
/// ```
pub trait ResultExt<T> {
    /// Log error with caller location and return None. Use for recoverable failures.
    fn log_err(self) -> Option<T>;
    /// Log as warning with caller location and return None. Use for expected failures.
    fn warn_on_err(self) -> Option<T>;
}

impl<T, E: std::fmt::Debug> ResultExt<T> for std::result::Result<T, E> {
    #[track_caller]
    fn log_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                let caller = std::panic::Location::caller();
                error!(
                    error = ?error,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation failed"
                );
                None
            }
        }
    }

    #[track_caller]
    fn warn_on_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                let caller = std::panic::Location::caller();
                warn!(
                    error = ?error,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation had warning"
                );
                None
            }
        }
    }
}
