//! Error types for worksheet ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Structural failures that abort a whole parse.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Workbook file not found.
    #[error("workbook not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Workbook Errors ===
    /// The source is empty.
    #[error("workbook is empty")]
    EmptySource,

    /// The container could not be opened as a spreadsheet.
    #[error("failed to open workbook: {message}")]
    WorkbookOpen { message: String },

    /// Delimited text could not be read.
    #[error("failed to read delimited text: {message}")]
    CsvParse { message: String },

    /// The requested sheet does not exist.
    #[error("sheet '{sheet}' not found (available: {})", available.join(", "))]
    SheetNotFound {
        sheet: String,
        available: Vec<String>,
    },

    /// The requested sheet index is past the last sheet.
    #[error("sheet index {index} out of range ({count} sheets)")]
    SheetIndexOutOfRange { index: usize, count: usize },

    /// Failed reading cells of a sheet.
    #[error("failed to read sheet '{sheet}': {message}")]
    SheetRead { sheet: String, message: String },

    // === Header Errors ===
    /// No header rows were requested.
    #[error("header row specification is empty")]
    EmptyHeaderSpec,

    /// A header row lies past the end of the sheet.
    #[error("header row {row} is past the end of sheet '{sheet}' ({height} rows)")]
    HeaderRowOutOfRange {
        sheet: String,
        row: usize,
        height: usize,
    },

    // === Template Errors ===
    /// No template with this id is registered.
    #[error("unknown template '{id}'")]
    UnknownTemplate { id: String },

    /// A template definition could not be deserialized.
    #[error("failed to parse template definitions: {message}")]
    TemplateParse { message: String },

    /// A template definition is inconsistent.
    #[error(transparent)]
    InvalidTemplate(#[from] fmea_model::ModelError),

    /// Automatic detection found no matching layout.
    #[error("no template matched the workbook layout")]
    NoTemplateMatched,

    // === Failure Effects List Errors ===
    /// The effects list does not have the severity column.
    #[error("failure effects sheet '{sheet}' has {found} columns, expected at least {expected}")]
    EffectsLayout {
        sheet: String,
        found: usize,
        expected: usize,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
