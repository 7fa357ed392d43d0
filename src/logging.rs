//! # Logging
//!
//! File-based tracing setup. The TUI owns the terminal, so diagnostics go to
//! a daily-rolling log file instead of stderr; this is also the
//! operator-visible channel for responder failures.
//!
//! The filter defaults to `vibecode=info` and can be overridden with
//! `RUST_LOG`.

use std::path::PathBuf;

use directories::ProjectDirs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Keeps the non-blocking writer alive for the lifetime of the process.
pub struct LoggingGuard {
    _guard: WorkerGuard,
    log_dir: PathBuf,
}

impl LoggingGuard {
    /// Directory the rolling log files are written to.
    pub fn log_dir(&self) -> &std::path::Path {
        &self.log_dir
    }
}

fn resolve_log_dir() -> std::io::Result<PathBuf> {
    let dir = ProjectDirs::from("", "", "vibecode")
        .map(|dirs| dirs.cache_dir().join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("vibecode").join("logs"));
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Initialize tracing with a daily-rolling file appender.
///
/// Returns `None` if the log directory cannot be created or a subscriber is
/// already installed; the application keeps running without diagnostics.
pub fn init() -> Option<LoggingGuard> {
    let log_dir = resolve_log_dir().ok()?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "vibecode.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("vibecode=info"));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true),
    );

    if subscriber.try_init().is_err() {
        return None;
    }

    tracing::info!(log_dir = %log_dir.display(), "tracing initialized");

    Some(LoggingGuard {
        _guard: guard,
        log_dir,
    })
}
