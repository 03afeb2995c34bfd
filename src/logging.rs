//! Logging setup for the dashboard binary.
//!
//! Console output goes to stderr so that stdout stays reserved for payloads.
//! When file logging is enabled, logs are also written to daily-rotating files
//! in the app data directory:
//!
//! - `laureate-dashboard.log`: everything passing the env filter
//! - `error.log`: warnings and errors only
//!
//! ```no_run
//! use laureate_dashboard::logging;
//!
//! logging::init(None).expect("Failed to initialize logging");
//! tracing::info!("Dashboard started");
//! ```

use crate::config::APP_DIR_NAME;
use anyhow::{Context as _, Result};
use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Layer as _, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _,
};

/// Platform log directory, created on demand.
///
/// - Windows: `%APPDATA%/laureate-dashboard/logs`
/// - macOS: `~/Library/Application Support/laureate-dashboard/logs`
/// - Linux: `~/.local/share/laureate-dashboard/logs`
///
/// # Errors
///
/// Returns error if the data directory is unknown or cannot be created.
pub fn get_log_dir(override_dir: Option<PathBuf>) -> Result<PathBuf> {
    let log_dir = match override_dir {
        Some(dir) => dir,
        None => dirs::data_dir()
            .context("Failed to determine data directory")?
            .join(APP_DIR_NAME)
            .join("logs"),
    };

    if !log_dir.exists() {
        std::fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;
    }
    Ok(log_dir)
}

fn env_filter() -> Result<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .context("Failed to create env filter")
}

/// Installs console and rotating-file logging.
///
/// # Errors
///
/// Returns error if the log directory or file appenders cannot be created, or
/// a global subscriber is already installed.
pub fn init(log_dir: Option<PathBuf>) -> Result<()> {
    let log_dir = get_log_dir(log_dir)?;

    let all_logs_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .max_log_files(10)
        .filename_prefix(APP_DIR_NAME)
        .filename_suffix("log")
        .build(&log_dir)
        .context("Failed to create all-logs file appender")?;

    let error_logs_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .max_log_files(10)
        .filename_prefix("error")
        .filename_suffix("log")
        .build(&log_dir)
        .context("Failed to create error-logs file appender")?;

    let console_layer = fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);

    let all_logs_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_ansi(false)
        .with_writer(all_logs_appender);

    let error_logs_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_ansi(false)
        .with_writer(error_logs_appender)
        .with_filter(EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter()?)
        .with(console_layer)
        .with(all_logs_layer)
        .with(error_logs_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::info!(log_dir = %log_dir.display(), "Logging initialized");
    Ok(())
}

/// Installs stderr-only logging.
///
/// # Errors
///
/// Returns error if a global subscriber is already installed.
pub fn init_console() -> Result<()> {
    tracing_subscriber::registry()
        .with(env_filter()?)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .try_init()
        .context("Failed to install tracing subscriber")
}
