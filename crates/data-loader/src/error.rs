//! Error types for the data-loader crate.
//!
//! Loading a snapshot can fail (missing files, bad JSON, duplicate ids).
//! Normalizing individual listing fields never does: those degrade to
//! defaults instead, see [`crate::normalizer`].

use thiserror::Error;

/// Errors that can occur while loading or querying the platform snapshot
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// File contents were not valid JSON
    #[error("Invalid JSON in {file}: {source}")]
    JsonError {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    /// A record in a data file had the wrong shape
    #[error("Parse error in {file} at record {record}: {reason}")]
    ParseError {
        file: String,
        record: usize,
        reason: String,
    },

    /// A string could not be parsed as a record identifier
    #[error("Invalid identifier: {value}")]
    InvalidId { value: String },

    /// Data validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
