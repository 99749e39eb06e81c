//! Error types for priority table loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading a custom priority table.
#[derive(Debug, Error)]
pub enum PriorityError {
    /// Failed to read the table file.
    #[error("failed to read priority table {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV content.
    #[error("failed to parse priority table: {message}")]
    CsvParse { message: String },

    /// Failed to render a table as CSV.
    #[error("failed to write priority table: {message}")]
    CsvWrite { message: String },

    /// A band label that does not exist on the given axis.
    #[error("unknown {axis} band '{label}' on line {line}")]
    UnknownBand {
        axis: &'static str,
        label: String,
        line: u64,
    },

    /// A cell that is not H, M or L.
    #[error("invalid action priority '{value}' on line {line}")]
    InvalidPriority { value: String, line: u64 },

    /// The same band triple listed twice with different priorities.
    #[error("conflicting entries for bands {bands} on line {line}")]
    Conflict { bands: String, line: u64 },
}

/// Result type for priority table operations.
pub type Result<T> = std::result::Result<T, PriorityError>;
