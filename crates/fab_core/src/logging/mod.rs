//! Logging infrastructure for kicad-fab.
//!
//! This module provides:
//! - A global `tracing` subscriber writing to stderr
//! - An optional non-blocking file layer (log file inside the output directory)
//! - Message prefixes shared by the pipeline steps
//!
//! # Example
//!
//! ```no_run
//! use fab_core::logging::{init_tracing, LogLevel};
//!
//! let _guard = init_tracing(LogLevel::Info, None);
//! tracing::info!("Starting run");
//! ```

mod types;

use std::path::Path;

pub use types::{LogLevel, MessagePrefix};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the global tracing subscriber.
///
/// This sets up a subscriber that:
/// - Respects the RUST_LOG environment variable
/// - Falls back to the provided default level
/// - Outputs to stderr without timestamps
/// - Additionally writes to `log_file` (with timestamps) when given
///
/// Should be called once at startup. The returned guard must be held for
/// the life of the run; dropping it flushes the file writer.
pub fn init_tracing(default_level: LogLevel, log_file: Option<&Path>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.as_filter_str()));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    let (file_layer, guard) = match log_file.and_then(split_log_path) {
        Some((dir, name)) => {
            let appender = tracing_appender::rolling::never(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init();

    if let Err(e) = result {
        eprintln!("Warning: logging already initialized: {}", e);
    }

    guard
}

/// Initialize tracing for tests (only logs warnings and above).
#[cfg(test)]
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_test_writer()
        .try_init();
}

/// Split a log file path into (directory, file name).
fn split_log_path(path: &Path) -> Option<(&Path, &std::ffi::OsStr)> {
    let name = path.file_name()?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    Some((dir, name))
}
