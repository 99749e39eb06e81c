//! In-memory worksheet grid.

use crate::error::{IngestError, Result};

/// A worksheet read into text cells, addressed by absolute 0-based row and
/// column numbers.
///
/// Rows keep their natural length; `width` is the longest row and counts as
/// the physical column count of the sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSheet {
    name: String,
    rows: Vec<Vec<String>>,
    width: usize,
}

impl RawSheet {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<String>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        Self {
            name: name.into(),
            rows,
            width,
        }
    }

    /// Builds a sheet from string slices, mostly for tests and fixtures.
    pub fn from_rows<R, S>(name: impl Into<String>, rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        Self::new(name, rows)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Physical column count.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, index: usize) -> Option<&[String]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Cell text, empty when outside the grid.
    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .map_or("", String::as_str)
    }

    /// Returns true when every cell of the row is blank.
    pub fn is_blank_row(&self, row: usize) -> bool {
        self.row(row)
            .is_none_or(|cells| cells.iter().all(|cell| cell.trim().is_empty()))
    }

    /// Resolves the header region, in the order given.
    pub fn header_region(&self, header_rows: &[usize]) -> Result<Vec<&[String]>> {
        if header_rows.is_empty() {
            return Err(IngestError::EmptyHeaderSpec);
        }
        header_rows
            .iter()
            .map(|&row| {
                self.row(row).ok_or_else(|| IngestError::HeaderRowOutOfRange {
                    sheet: self.name.clone(),
                    row,
                    height: self.height(),
                })
            })
            .collect()
    }
}
