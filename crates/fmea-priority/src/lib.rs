//! AIAG-VDA Action Priority classification.
//!
//! Severity, Occurrence and Detection ratings are banded and looked up in an
//! immutable [`PriorityTable`]. The standard table is static and safe to
//! share across threads; custom matrices load from CSV.

pub mod band;
pub mod classify;
pub mod descriptions;
pub mod error;
pub mod table;

pub use band::{BandTriple, DetectionBand, OccurrenceBand, SeverityBand};
pub use classify::{classify, classify_optional, classify_values};
pub use descriptions::{
    RatingAxis, detection_description, occurrence_description, severity_description,
};
pub use error::{PriorityError, Result};
pub use table::{Classification, FALLBACK_PRIORITY, PriorityTable};
