//! The Action Priority lookup table.
//!
//! The table is a flat map keyed by [`BandTriple`]. The standard AIAG-VDA
//! matrix is built once and shared read-only; organisations with their own
//! matrix can load one from CSV. Lookups are total: a triple missing from
//! the table resolves to Low.

use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;
use std::sync::LazyLock;

use fmea_model::{ActionPriority, Rating};
use serde::{Deserialize, Serialize};

use crate::band::{BandTriple, DetectionBand, OccurrenceBand, SeverityBand};
use crate::error::{PriorityError, Result};

use ActionPriority::{High as H, Low as L, Medium as M};
use OccurrenceBand::{O1, O2To3, O4To5, O6To7, O8To10};
use SeverityBand::{S2To3, S4To6, S7To8, S9To10};

/// Priority returned for triples the table does not list.
pub const FALLBACK_PRIORITY: ActionPriority = ActionPriority::Low;

/// AIAG-VDA matrix rows. Detection columns follow [`DetectionBand::ALL`]:
/// 7-10, 5-6, 2-4, 1.
///
/// Severity 1 has no rows: it never raises priority, so every such triple
/// takes the fallback.
const AIAG_VDA_ROWS: [(SeverityBand, OccurrenceBand, [ActionPriority; 4]); 20] = [
    (S9To10, O8To10, [H, H, H, H]),
    (S9To10, O6To7, [H, H, H, H]),
    (S9To10, O4To5, [H, H, H, M]),
    (S9To10, O2To3, [H, M, L, L]),
    (S9To10, O1, [L, L, L, L]),
    (S7To8, O8To10, [H, H, H, H]),
    (S7To8, O6To7, [H, H, H, M]),
    (S7To8, O4To5, [H, M, M, M]),
    (S7To8, O2To3, [M, M, L, L]),
    (S7To8, O1, [L, L, L, L]),
    (S4To6, O8To10, [H, H, M, M]),
    (S4To6, O6To7, [M, M, M, L]),
    (S4To6, O4To5, [M, L, L, L]),
    (S4To6, O2To3, [L, L, L, L]),
    (S4To6, O1, [L, L, L, L]),
    (S2To3, O8To10, [M, M, L, L]),
    (S2To3, O6To7, [L, L, L, L]),
    (S2To3, O4To5, [L, L, L, L]),
    (S2To3, O2To3, [L, L, L, L]),
    (S2To3, O1, [L, L, L, L]),
];

static STANDARD: LazyLock<PriorityTable> = LazyLock::new(PriorityTable::aiag_vda);

/// Result of classifying one S/O/D triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub bands: BandTriple,
    pub priority: ActionPriority,
    /// True when the triple was absent and the fallback was used.
    pub fallback: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriorityTable {
    entries: HashMap<BandTriple, ActionPriority>,
}

#[derive(Debug, Deserialize, Serialize)]
struct TableRow {
    severity: String,
    occurrence: String,
    detection: String,
    ap: String,
}

impl PriorityTable {
    /// The shared AIAG-VDA table.
    pub fn standard() -> &'static PriorityTable {
        &STANDARD
    }

    fn aiag_vda() -> Self {
        let entries = AIAG_VDA_ROWS
            .iter()
            .flat_map(|(severity, occurrence, priorities)| {
                DetectionBand::ALL
                    .into_iter()
                    .zip(priorities.iter().copied())
                    .map(move |(detection, priority)| {
                        (
                            BandTriple {
                                severity: *severity,
                                occurrence: *occurrence,
                                detection,
                            },
                            priority,
                        )
                    })
            })
            .collect();
        Self { entries }
    }

    pub fn from_entries(entries: impl IntoIterator<Item = (BandTriple, ActionPriority)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, bands: BandTriple) -> Option<ActionPriority> {
        self.entries.get(&bands).copied()
    }

    /// Entries sorted by band triple, for display.
    pub fn sorted_entries(&self) -> Vec<(BandTriple, ActionPriority)> {
        let mut entries: Vec<_> = self.entries.iter().map(|(k, v)| (*k, *v)).collect();
        entries.sort_by(|a, b| b.0.cmp(&a.0));
        entries
    }

    /// Classifies a validated rating triple. Never fails.
    #[must_use]
    pub fn classify(
        &self,
        severity: Rating,
        occurrence: Rating,
        detection: Rating,
    ) -> Classification {
        let bands = BandTriple::of(severity, occurrence, detection);
        match self.get(bands) {
            Some(priority) => Classification {
                bands,
                priority,
                fallback: false,
            },
            None => {
                tracing::trace!(bands = %bands, "priority table miss, using fallback");
                Classification {
                    bands,
                    priority: FALLBACK_PRIORITY,
                    fallback: true,
                }
            }
        }
    }

    /// Loads a table from CSV with `severity,occurrence,detection,ap`
    /// columns holding band labels (`9-10`, `2-4`, ...) and `H`/`M`/`L`.
    /// Lines starting with `#` are comments.
    pub fn from_csv_str(content: &str) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .comment(Some(b'#'))
            .trim(csv::Trim::All)
            .from_reader(Cursor::new(content.as_bytes()));
        let headers = reader
            .headers()
            .map_err(|e| PriorityError::CsvParse {
                message: e.to_string(),
            })?
            .clone();

        let mut entries = HashMap::new();
        for result in reader.records() {
            let record = result.map_err(|e| PriorityError::CsvParse {
                message: e.to_string(),
            })?;
            let line = record.position().map_or(0, csv::Position::line);
            let row: TableRow =
                record
                    .deserialize(Some(&headers))
                    .map_err(|e| PriorityError::CsvParse {
                        message: e.to_string(),
                    })?;
            let bands = BandTriple {
                severity: SeverityBand::from_label(&row.severity).ok_or_else(|| {
                    PriorityError::UnknownBand {
                        axis: "severity",
                        label: row.severity.clone(),
                        line,
                    }
                })?,
                occurrence: OccurrenceBand::from_label(&row.occurrence).ok_or_else(|| {
                    PriorityError::UnknownBand {
                        axis: "occurrence",
                        label: row.occurrence.clone(),
                        line,
                    }
                })?,
                detection: DetectionBand::from_label(&row.detection).ok_or_else(|| {
                    PriorityError::UnknownBand {
                        axis: "detection",
                        label: row.detection.clone(),
                        line,
                    }
                })?,
            };
            let priority = ActionPriority::from_label(&row.ap).ok_or_else(|| {
                PriorityError::InvalidPriority {
                    value: row.ap.clone(),
                    line,
                }
            })?;
            if let Some(existing) = entries.insert(bands, priority)
                && existing != priority
            {
                return Err(PriorityError::Conflict {
                    bands: bands.to_string(),
                    line,
                });
            }
        }

        tracing::debug!(entries = entries.len(), "loaded custom priority table");
        Ok(Self { entries })
    }

    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| PriorityError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_csv_str(&content)
    }

    /// Renders the table in the CSV format accepted by [`Self::from_csv_str`].
    pub fn to_csv_string(&self) -> Result<String> {
        let write_error = |message: String| PriorityError::CsvWrite { message };
        let mut writer = csv::Writer::from_writer(Vec::new());
        for (bands, priority) in self.sorted_entries() {
            writer
                .serialize(TableRow {
                    severity: bands.severity.to_string(),
                    occurrence: bands.occurrence.to_string(),
                    detection: bands.detection.to_string(),
                    ap: priority.to_string(),
                })
                .map_err(|e| write_error(e.to_string()))?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| write_error(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| write_error(e.to_string()))
    }
}
