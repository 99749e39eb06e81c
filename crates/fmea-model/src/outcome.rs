//! The tagged result handed to callers of the parse boundary.

use std::fmt;

use serde::Serialize;

use crate::record::Record;

/// A recovered, non-fatal condition met while extracting records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParseWarning {
    /// Flattened header width differed from the physical column count.
    SchemaDrift { expected: usize, found: usize },
    /// No column could be bound; the field is populated with nulls/blanks.
    UnresolvedField { field: String },
    /// A rating or priority cell could not be coerced and was nulled.
    ValueCoercion {
        field: String,
        row_index: usize,
        value: String,
    },
    /// The band triple was absent from the priority table; "L" was used.
    PriorityLookupMiss {
        field: String,
        row_index: usize,
        bands: String,
    },
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SchemaDrift { expected, found } => write!(
                f,
                "header has {found} labels for {expected} columns (padded/truncated)"
            ),
            Self::UnresolvedField { field } => write!(f, "field '{field}' has no source column"),
            Self::ValueCoercion {
                field,
                row_index,
                value,
            } => write!(f, "row {row_index}: '{value}' is not a valid {field}"),
            Self::PriorityLookupMiss {
                field,
                row_index,
                bands,
            } => write!(
                f,
                "row {row_index}: no {field} entry for bands {bands}, defaulted to L"
            ),
        }
    }
}

/// Outcome of one parse invocation: the full record list or one error.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ParseOutcome {
    Success {
        /// Id of the template the records were extracted with.
        template: String,
        #[serde(rename = "data")]
        records: Vec<Record>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        warnings: Vec<ParseWarning>,
    },
    Error {
        message: String,
    },
}

impl ParseOutcome {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn records(&self) -> &[Record] {
        match self {
            Self::Success { records, .. } => records,
            Self::Error { .. } => &[],
        }
    }

    pub fn warnings(&self) -> &[ParseWarning] {
        match self {
            Self::Success { warnings, .. } => warnings,
            Self::Error { .. } => &[],
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error { message } => Some(message),
            Self::Success { .. } => None,
        }
    }
}
