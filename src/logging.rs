//! Session log file.
//!
//! [`init`] opens a timestamped file under the configuration's `logs/`
//! directory and installs a `tracing` subscriber writing to it. The returned
//! [`LogGuard`] marks the end of the session in the log when dropped.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::fs::ConfigPaths;

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_FILTER_ENV: &str = "TICKETSUM_LOG";

const DEFAULT_FILTER: &str = "ticketsum=info";

/// Keeps the session log open; logs the shutdown line on drop.
#[derive(Debug)]
pub struct LogGuard {
    path: PathBuf,
}

impl LogGuard {
    /// Path of the log file for this session.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for LogGuard {
    fn drop(&mut self) {
        tracing::info!("session ended");
    }
}

/// Log file name for a session started at `started`.
#[must_use]
pub fn log_file_name(started: DateTime<Local>) -> String {
    format!("ticketsum_{}.log", started.format("%Y-%m-%d_%H-%M-%S"))
}

/// Opens the session log and installs the global subscriber.
///
/// # Errors
///
/// Returns an error if the log directory or file cannot be created, or if a
/// global subscriber is already installed.
pub fn init(paths: &ConfigPaths) -> Result<LogGuard> {
    paths.ensure_logs_dir()?;
    let path = paths.logs_dir().join(log_file_name(Local::now()));
    let file = File::create(&path)
        .with_context(|| format!("Failed to create log file: {}", path.display()))?;

    let filter =
        EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .context("Failed to install log subscriber")?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "session started");
    Ok(LogGuard { path })
}
