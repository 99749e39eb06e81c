//! FMEA worksheet ingestion.
//!
//! Reads a spreadsheet (xlsx/xls/ods via calamine, or delimited text),
//! flattens its multi-row header, binds template fields to columns and
//! extracts one [`Record`](fmea_model::Record) per surviving row.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use fmea_ingest::{SheetSelector, WorkbookSource, parse};
//!
//! let outcome = parse(
//!     WorkbookSource::Path(Path::new("pfmea.xlsx")),
//!     &SheetSelector::name("00"),
//!     &[8, 9],
//! );
//! ```

mod effects;
mod error;
mod extract;
mod header;
mod mapping;
mod options;
mod parse;
mod sheet;
mod template;
mod workbook;

// === Error Types ===
pub use error::{IngestError, Result};

// === Parse Boundary ===
pub use options::{ParseOptions, TemplateChoice};
pub use parse::{Extraction, parse, parse_with_options, try_parse_with_options};

// === Workbook Reading ===
pub use sheet::RawSheet;
pub use workbook::{
    DEFAULT_DELIMITED_SHEET, SheetSelector, Workbook, WorkbookSource, cell_text, format_number,
};

// === Header, Mapping and Extraction ===
pub use extract::{
    Coerced, coerce_priority, coerce_rating, derive_priorities, extract_records, forward_fill,
};
pub use header::{FlattenedHeader, flatten_header, label_key, normalize_label, synthetic_label};
pub use mapping::{Binding, ColumnBindings, map_columns, resolve_source};

// === Templates ===
pub use template::{
    BUILTIN_TEMPLATES, Detection, FREE_RULE_SCORE, POSITIONAL_RULE_SCORE, TemplateRegistry,
    best_match, signature_score,
};

// === Failure Effects ===
pub use effects::{
    EFFECTS_SHEET, EffectsOutcome, FailureEffect, parse_failure_effects,
    try_parse_failure_effects,
};
