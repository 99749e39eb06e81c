//! Failure-effects list extraction.
//!
//! AIAG-VDA workbooks ship a `LIST` sheet pairing failure-effect
//! descriptions (column A) with a severity score (column H). The first row
//! holds headings.

use fmea_model::Rating;
use serde::Serialize;

use crate::error::{IngestError, Result};
use crate::extract::{Coerced, coerce_rating};
use crate::workbook::{SheetSelector, Workbook, WorkbookSource};

/// Default name of the failure-effects sheet.
pub const EFFECTS_SHEET: &str = "LIST";

const DESCRIPTION_COLUMN: usize = 0;
const SEVERITY_COLUMN: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureEffect {
    pub failure_effect: String,
    pub severity: Rating,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum EffectsOutcome {
    Success { data: Vec<FailureEffect> },
    Error { message: String },
}

/// Reads the failure-effects list, keeping rows with a valid severity.
pub fn try_parse_failure_effects(
    source: WorkbookSource<'_>,
    sheet: Option<&SheetSelector>,
) -> Result<Vec<FailureEffect>> {
    let default_sheet = SheetSelector::name(EFFECTS_SHEET);
    let selector = sheet.unwrap_or(&default_sheet);
    let mut workbook = Workbook::open(source)?;
    let raw = workbook.read_sheet(selector)?;
    if raw.height() == 0 {
        return Ok(Vec::new());
    }
    if raw.width() <= SEVERITY_COLUMN {
        return Err(IngestError::EffectsLayout {
            sheet: raw.name().to_string(),
            found: raw.width(),
            expected: SEVERITY_COLUMN + 1,
        });
    }

    let effects: Vec<FailureEffect> = (1..raw.height())
        .filter_map(|row| match coerce_rating(raw.cell(row, SEVERITY_COLUMN)) {
            Coerced::Valid(severity) => Some(FailureEffect {
                failure_effect: raw.cell(row, DESCRIPTION_COLUMN).trim().to_string(),
                severity,
            }),
            Coerced::Blank | Coerced::Invalid => None,
        })
        .collect();
    tracing::debug!(sheet = raw.name(), effects = effects.len(), "read failure effects");
    Ok(effects)
}

/// Reads the failure-effects list into a tagged outcome.
pub fn parse_failure_effects(
    source: WorkbookSource<'_>,
    sheet: Option<&SheetSelector>,
) -> EffectsOutcome {
    match try_parse_failure_effects(source, sheet) {
        Ok(data) => EffectsOutcome::Success { data },
        Err(err) => {
            tracing::error!(error = %err, "failure effects parse failed");
            EffectsOutcome::Error {
                message: err.to_string(),
            }
        }
    }
}
