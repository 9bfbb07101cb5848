//! Error types for the plan report engine.
//!
//! Only genuinely invalid requests are errors here: a bad configuration,
//! an unreadable plan file, or an unsupported report format. Unusual
//! values inside a change never surface as errors; the value formatter
//! degrades them to a best-effort string instead.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the plan report engine.
#[derive(Debug, Error)]
pub enum PlanReportError {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Plan ingestion errors.
    #[error("Plan ingestion error: {0}")]
    Ingest(#[from] IngestError),

    /// Report rendering errors.
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// IO errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file was not found.
    #[error("Configuration file not found: {path}")]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// The configuration file could not be parsed.
    #[error("Failed to parse configuration: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
        /// Optional source location.
        location: Option<String>,
    },

    /// Validation failed.
    #[error("Configuration validation failed: {message}")]
    ValidationError {
        /// Description of the validation error.
        message: String,
        /// Field that failed validation.
        field: Option<String>,
    },
}

/// Errors raised while reading a plan into the canonical change model.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The plan file was not found.
    #[error("Plan file not found: {path}")]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// The plan document is not valid JSON or does not match the plan schema.
    #[error("Failed to parse plan: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
        /// Optional source location.
        location: Option<String>,
    },

    /// The plan was produced by an unsupported schema version.
    #[error("Unsupported plan format version: {found} (expected 1.x)")]
    UnsupportedVersion {
        /// Version string found in the document.
        found: String,
    },

    /// A single change entry is structurally invalid.
    #[error("Invalid change for {address}: {message}")]
    InvalidChange {
        /// Address of the offending change.
        address: String,
        /// Description of the problem.
        message: String,
    },
}

/// Report rendering errors.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The requested report format is not one the renderer knows.
    #[error("Unsupported report format '{requested}' (expected one of: {})", .supported.join(", "))]
    UnsupportedFormat {
        /// The format name that was requested.
        requested: String,
        /// Every valid format name.
        supported: Vec<String>,
    },
}

/// Result type alias for plan report operations.
pub type Result<T> = std::result::Result<T, PlanReportError>;

impl PlanReportError {
    /// Returns true if the error was caused by the caller's request rather
    /// than by the environment (missing files, IO).
    #[must_use]
    pub const fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Self::Render(RenderError::UnsupportedFormat { .. })
                | Self::Config(ConfigError::ValidationError { .. })
        )
    }
}

impl ConfigError {
    /// Creates a validation error for a specific field.
    #[must_use]
    pub fn validation(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
            field: Some(field.into()),
        }
    }
}

impl IngestError {
    /// Creates an invalid-change error for a specific address.
    #[must_use]
    pub fn invalid_change(address: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidChange {
            address: address.into(),
            message: message.into(),
        }
    }
}

impl RenderError {
    /// Creates an unsupported-format error enumerating the valid formats.
    #[must_use]
    pub fn unsupported_format(requested: impl Into<String>, supported: &[&str]) -> Self {
        Self::UnsupportedFormat {
            requested: requested.into(),
            supported: supported.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}
