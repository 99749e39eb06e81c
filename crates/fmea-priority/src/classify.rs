//! Per-row classification helpers over the standard table.

use fmea_model::{ActionPriority, Rating};

use crate::table::{Classification, PriorityTable};

/// Action Priority of a validated triple under the AIAG-VDA table.
#[must_use]
pub fn classify(severity: Rating, occurrence: Rating, detection: Rating) -> ActionPriority {
    PriorityTable::standard()
        .classify(severity, occurrence, detection)
        .priority
}

/// Classifies when all three ratings are present; `None` otherwise.
///
/// A row with a missing or non-numeric rating never reaches the table, so
/// callers can tell "no priority" apart from a Low result.
pub fn classify_optional(
    table: &PriorityTable,
    severity: Option<Rating>,
    occurrence: Option<Rating>,
    detection: Option<Rating>,
) -> Option<Classification> {
    Some(table.classify(severity?, occurrence?, detection?))
}

/// Classifies raw integers, rejecting values outside 1-10.
pub fn classify_values(
    table: &PriorityTable,
    severity: i64,
    occurrence: i64,
    detection: i64,
) -> fmea_model::Result<Classification> {
    Ok(table.classify(
        Rating::try_from(severity)?,
        Rating::try_from(occurrence)?,
        Rating::try_from(detection)?,
    ))
}
