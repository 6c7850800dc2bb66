//! Tracing subscriber initialization.
//!
//! The TUI owns stdout, so logs go to a file under ${VIGIL_HOME}/logs instead.
//! Monitor them with `tail -f` in a separate terminal.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use tracing_subscriber::EnvFilter;

use crate::config::paths;

/// Initializes file-based logging under the default logs directory.
pub fn init() -> Result<()> {
    init_at(&paths::logs_dir().join("vigil.log"))
}

/// Initializes file-based logging at a specific path.
///
/// Respects RUST_LOG, defaults to "info". Creates the log directory if it
/// doesn't exist.
pub fn init_at(log_path: &Path) -> Result<()> {
    let directory = log_path
        .parent()
        .ok_or_else(|| anyhow!("Log path has no parent directory: {}", log_path.display()))?;
    let file_name = log_path
        .file_name()
        .ok_or_else(|| anyhow!("Invalid log file path: {}", log_path.display()))?;

    std::fs::create_dir_all(directory)
        .with_context(|| format!("Failed to create log directory {}", directory.display()))?;

    let file_appender = tracing_appender::rolling::never(directory, file_name);
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(file_appender)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize tracing subscriber: {e}"))
}
