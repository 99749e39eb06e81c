//! FMEA extraction data model.
//!
//! Shared types for the extraction pipeline: validated ratings, the Action
//! Priority, extracted records, per-template field bindings and the tagged
//! parse outcome.

pub mod error;
pub mod fields;
pub mod outcome;
pub mod rating;
pub mod record;
pub mod template;

pub use error::{ModelError, Result};
pub use outcome::{ParseOutcome, ParseWarning};
pub use rating::{ActionPriority, Rating};
pub use record::{FieldValue, Record};
pub use template::{
    ColumnSource, DocumentKind, FieldKind, FieldSpec, FillStrategy, HeaderOptions, LabelMatch,
    PriorityRule, SignatureRule, TemplateSpec,
};
