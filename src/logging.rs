//! Structured logging using the tracing crate.
//!
//! Configures a rolling file logger that writes to daily-rotated log files
//! under the XDG state directory. Does not output to the terminal, which the
//! interactive deck loop owns. Old log files are cleaned up, keeping the 7
//! most recent days.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::SystemTime;

use thiserror::Error;
use tracing_appender::rolling;
use tracing_subscriber::prelude::*;

/// Keep 7 days worth of logs
const MAX_LOG_FILES: usize = 7;

/// Global guard holder to keep the non-blocking appender alive for the
/// program lifetime.
static APPENDER_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// Errors from logging setup
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("could not determine home directory")]
    NoHomeDir,

    #[error("failed to create log directory: {0}")]
    CreateDir(String),

    #[error("logging already initialized")]
    AlreadyInitialized,
}

/// Initializes the logging system with file-based output.
///
/// Log level is controlled by the RUST_LOG environment variable (defaults to
/// "info").
pub fn init_logging() -> Result<(), LoggingError> {
    let log_dir = get_log_dir()?;

    if let Err(e) = cleanup_old_logs(&log_dir) {
        eprintln!("Warning: failed to clean up old logs: {}", e);
    }

    let file_appender = rolling::daily(&log_dir, "backspin.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    APPENDER_GUARD
        .set(guard)
        .map_err(|_| LoggingError::AlreadyInitialized)?;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_target(true)
                .with_level(true)
                .with_ansi(false),
        )
        .init();

    tracing::debug!("logging initialized, log dir: {}", log_dir.display());
    Ok(())
}

/// Determines the log directory, following the XDG Base Directory
/// Specification: XDG_STATE_HOME if set, otherwise ~/.local/state/backspin.
fn get_log_dir() -> Result<PathBuf, LoggingError> {
    let log_dir = if let Ok(xdg_state) = std::env::var("XDG_STATE_HOME") {
        PathBuf::from(xdg_state).join("backspin")
    } else {
        let home = dirs::home_dir().ok_or(LoggingError::NoHomeDir)?;
        home.join(".local/state/backspin")
    };

    fs::create_dir_all(&log_dir).map_err(|e| LoggingError::CreateDir(e.to_string()))?;

    Ok(log_dir)
}

/// Removes log files beyond the newest MAX_LOG_FILES, matching the
/// `backspin.log.YYYY-MM-DD` pattern.
fn cleanup_old_logs(log_dir: &Path) -> std::io::Result<()> {
    let mut dated: Vec<(PathBuf, SystemTime)> = Vec::new();
    for entry in fs::read_dir(log_dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !name.starts_with("backspin.log.") || name.matches('-').count() != 2 {
            continue;
        }
        if let Ok(modified) = fs::metadata(&path).and_then(|m| m.modified()) {
            dated.push((path, modified));
        }
    }

    // Newest first
    dated.sort_by(|a, b| b.1.cmp(&a.1));

    for (path, _) in dated.into_iter().skip(MAX_LOG_FILES) {
        if let Err(e) = fs::remove_file(&path) {
            tracing::warn!("failed to delete old log file {}: {}", path.display(), e);
        }
    }

    Ok(())
}
