//! File logging setup
//!
//! The TUI owns the terminal, so logs only go to `<data dir>/logs/crowdle.log`.
//! The filter comes from `CROWDLE_LOG`, then `RUST_LOG`, then `info`.

use anyhow::{Context, Result};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub const LOG_FILE_NAME: &str = "crowdle.log";

/// Install the global subscriber writing to `log_dir`
///
/// The returned guard flushes pending lines when dropped; keep it alive for
/// the whole program.
///
/// # Errors
/// Returns an error if the log directory cannot be created or a subscriber
/// is already installed.
pub fn init(log_dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE_NAME);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(file_layer)
        .try_init()
        .context("Failed to install log subscriber")?;

    tracing::info!("Logging to {}", log_dir.join(LOG_FILE_NAME).display());
    Ok(guard)
}

fn env_filter() -> EnvFilter {
    let directives = std::env::var("CROWDLE_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());

    EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("info"))
}
