//! Structured JSONL logging to a file plus human-readable stderr output.
//!
//! - **JSONL to file** (`<log dir>/shortcut-kit.jsonl`) - one JSON object per event
//! - **Compact to stderr** - for whoever is running the CLI
//!
//! # Usage
//!
//! ```rust,ignore
//! use shortcut_kit::logging;
//!
//! // Keep the guard alive for the duration of the program
//! let _guard = logging::init(&config.get_log_dir(), config.get_log_filter());
//! tracing::info!(action = "newTab", "Shortcut override set");
//! ```

use std::fs::{self, OpenOptions};
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

pub const LOG_FILE_NAME: &str = "shortcut-kit.jsonl";

/// Guard that must be kept alive for the duration of the program.
/// Dropping this guard will flush and close the log file.
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Initialize file + stderr logging.
///
/// `default_filter` applies when `RUST_LOG` is unset. If the log file can't be opened,
/// only the stderr layer receives events.
pub fn init(log_dir: &Path, default_filter: &str) -> LoggingGuard {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    let pretty_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(false)
        .with_level(true)
        .compact();

    let log_path = log_dir.join(LOG_FILE_NAME);
    let file = fs::create_dir_all(log_dir).and_then(|_| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
    });

    let (json_layer, file_guard, open_error) = match file {
        Ok(file) => {
            // Non-blocking so a slow disk never stalls key handling.
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file);
            let layer = fmt::layer()
                .json()
                .with_writer(non_blocking_file)
                .with_timer(fmt::time::UtcTime::rfc_3339())
                .with_target(true)
                .with_level(true)
                .with_thread_ids(false)
                .with_thread_names(false)
                .with_file(false)
                .with_line_number(false)
                .with_span_events(FmtSpan::NONE);
            (Some(layer), Some(guard), None)
        }
        Err(e) => (None, None, Some(e)),
    };

    // A subscriber may already be installed (tests, embedding hosts).
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(pretty_layer)
        .try_init();

    match open_error {
        Some(e) => tracing::warn!(
            error = %e,
            path = %log_path.display(),
            "Failed to open log file, logging to stderr only"
        ),
        None => tracing::debug!(
            event_type = "app_lifecycle",
            log_path = %log_path.display(),
            "Logging initialized"
        ),
    }

    LoggingGuard {
        _file_guard: file_guard,
    }
}
