//! Centralized error handling for the laureate dashboard.
//!
//! Errors fall into two propagation classes:
//!
//! - **Load-time** errors ([`DashboardError::DataLoad`], [`DashboardError::Config`])
//!   are unrecoverable. The binary reports them and exits before any view is served.
//! - **Per-selection** errors ([`DashboardError::InvalidCategory`]) are recovered at the
//!   [`ReactiveController`](crate::dashboard::controller::ReactiveController) boundary and
//!   never touch previously emitted view state.
//!
//! ```
//! use laureate_dashboard::error::DashboardError;
//!
//! fn describe(err: &DashboardError) -> &'static str {
//!     match err {
//!         DashboardError::DataLoad(_) => "fatal",
//!         DashboardError::InvalidCategory(_) => "recoverable",
//!         _ => "other",
//!     }
//! }
//! ```
//!
//! The `ResultExt` trait adds `.context()` to any `Result` whose error converts
//! into [`DashboardError`]:
//!
//! ```no_run
//! use laureate_dashboard::error::ResultExt as _;
//!
//! fn read_source() -> laureate_dashboard::error::Result<String> {
//!     std::fs::read_to_string("laureates.csv").context("Failed to read source")
//! }
//! ```

use std::fmt;

/// Main error type for dashboard operations.
#[derive(Debug)]
pub enum DashboardError {
    /// I/O errors (export files, config files)
    Io(std::io::Error),

    /// Source file missing, unparsable, missing a required column, or carrying a bad row
    DataLoad(String),

    /// Selection value outside the six known award categories
    InvalidCategory(String),

    /// Polars errors outside of loading (frame construction, CSV writing)
    DataProcessing(String),

    /// Configuration errors
    Config(String),

    /// Generic error with context
    Other(String),
}

impl fmt::Display for DashboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::DataLoad(msg) => write!(f, "Failed to load dataset: {msg}"),
            Self::InvalidCategory(value) => write!(f, "Invalid category: {value:?}"),
            Self::DataProcessing(msg) => write!(f, "Data processing error: {msg}"),
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for DashboardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl DashboardError {
    /// True for errors that must stop the process at startup.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::DataLoad(_) | Self::Config(_))
    }
}

impl From<std::io::Error> for DashboardError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<anyhow::Error> for DashboardError {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(format!("{err:#}"))
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(format!("JSON error: {err}"))
    }
}

impl From<polars::error::PolarsError> for DashboardError {
    fn from(err: polars::error::PolarsError) -> Self {
        Self::DataProcessing(err.to_string())
    }
}

/// Result type alias for dashboard operations.
pub type Result<T> = std::result::Result<T, DashboardError>;

/// Extension trait to add context to results.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> Result<T>;

    /// Add context using a closure (lazy evaluation).
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<DashboardError>,
{
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err: DashboardError = e.into();
            DashboardError::Other(format!("{}: {}", msg.into(), err))
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err: DashboardError = e.into();
            DashboardError::Other(format!("{}: {}", f(), err))
        })
    }
}
