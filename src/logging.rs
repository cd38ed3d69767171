//! Logging setup
//!
//! The terminal belongs to the UI, so log output goes to a daily rolling file
//! through a non-blocking writer. `RUST_LOG` takes precedence over the
//! configured filter.

use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE_PREFIX: &str = "sqlpane.log";

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Directory where log files are written
    pub log_dir: PathBuf,

    /// Filter used when `RUST_LOG` is unset
    pub default_filter: String,

    /// Whether to include file/line information
    pub include_location: bool,
}

impl LoggingConfig {
    pub fn new(log_dir: impl AsRef<Path>, default_filter: impl Into<String>) -> Self {
        Self {
            log_dir: log_dir.as_ref().to_path_buf(),
            default_filter: default_filter.into(),
            include_location: cfg!(debug_assertions),
        }
    }
}

/// Build the filter: `RUST_LOG` first, then the configured default, then `info`.
pub fn build_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize the global subscriber.
///
/// The returned guard flushes buffered lines when dropped, so the caller keeps
/// it alive until shutdown.
pub fn init(config: &LoggingConfig) -> anyhow::Result<WorkerGuard> {
    std::fs::create_dir_all(&config.log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_target(true)
        .with_file(config.include_location)
        .with_line_number(config.include_location)
        .with_ansi(false)
        .with_writer(non_blocking);

    tracing_subscriber::registry()
        .with(build_filter(&config.default_filter))
        .with(file_layer)
        .try_init()?;

    tracing::info!(
        log_dir = %config.log_dir.display(),
        filter = %config.default_filter,
        "Logging initialized"
    );

    Ok(guard)
}
