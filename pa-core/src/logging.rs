//! Structured logging setup using the `tracing` ecosystem.
//!
//! The client library only emits events; installing a subscriber is the
//! caller's choice. These helpers cover the common setups.

use std::path::Path;
use tracing_appender::rolling;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;
use crate::error::{PaError, PaResult};

/// Initialize the global tracing subscriber with the given settings.
///
/// Sets up:
/// - Console output (stderr)
/// - File output with daily rotation
/// - Configurable log level via the `level` parameter
///
/// # Arguments
/// * `level` - Log level or filter directive: "trace", "debug", "pa_api=debug", ...
/// * `log_dir` - Directory for log files
/// * `json_output` - If true, use JSON format for file output
pub fn init_logging(level: &str, log_dir: &Path, json_output: bool) -> PaResult<LogGuard> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = rolling::daily(log_dir, "purpleair.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact();

    let result = if json_output {
        let file_layer = fmt::layer()
            .with_writer(non_blocking)
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .with(file_layer)
            .try_init()
    } else {
        let file_layer = fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .with_file(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .with(file_layer)
            .try_init()
    };
    result.map_err(|e| PaError::Config(format!("failed to install subscriber: {e}")))?;

    tracing::info!("logging initialized at level={level}, dir={}", log_dir.display());

    Ok(LogGuard { _guard: guard })
}

/// Initialize logging from a [`LoggingConfig`].
///
/// Returns `None` when no directory is configured; console logging is set up
/// in that case.
pub fn init_from_config(config: &LoggingConfig) -> PaResult<Option<LogGuard>> {
    if config.directory.is_empty() {
        init_console_logging(&config.level);
        return Ok(None);
    }
    init_logging(&config.level, Path::new(&config.directory), config.json_output).map(Some)
}

/// Guard that keeps the non-blocking log writer alive.
/// Drop this to flush and close the log file.
pub struct LogGuard {
    _guard: tracing_appender::non_blocking::WorkerGuard,
}

/// Initialize a minimal console-only logger for testing or simple usage.
/// Subsequent calls are no-ops.
pub fn init_console_logging(level: &str) {
    let env_filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true).compact())
        .try_init();
}
