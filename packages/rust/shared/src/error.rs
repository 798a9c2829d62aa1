//! Error types for HotelScrub.
//!
//! Library crates use [`HotelScrubError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.
//!
//! Row-level data problems are deliberately NOT errors — a bad row is
//! skipped and counted under a [`crate::types::SkipReason`]. Only run-level
//! failures (unreadable input, schema mismatch, unwritable output) surface
//! through this type.

use std::path::PathBuf;

/// Top-level error type for all HotelScrub operations.
#[derive(Debug, thiserror::Error)]
pub enum HotelScrubError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Input schema error (missing or ambiguous required column, empty
    /// input). Always fatal — no partial output is produced.
    #[error("schema error: {message}")]
    Schema { message: String },

    /// CSV reader/writer failure that cannot be recovered per-row.
    #[error("csv error: {0}")]
    Csv(String),

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Data validation error (malformed cleaned file, invalid option value).
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, HotelScrubError>;

impl HotelScrubError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a schema error from any displayable message.
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<csv::Error> for HotelScrubError {
    fn from(e: csv::Error) -> Self {
        Self::Csv(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = HotelScrubError::schema("required column 'price' not found");
        assert_eq!(
            err.to_string(),
            "schema error: required column 'price' not found"
        );

        let err = HotelScrubError::validation("delimiter must be a single byte");
        assert!(err.to_string().contains("single byte"));
    }
}
