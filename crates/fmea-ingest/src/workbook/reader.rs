//! Opening workbooks and reading sheets into [`RawSheet`] grids.

use std::borrow::Cow;
use std::io::Cursor;
use std::path::Path;

use calamine::{Data, Range, Reader, Sheets, open_workbook_auto_from_rs};

use super::cell::cell_text;
use super::source::{SheetSelector, WorkbookSource};
use crate::error::{IngestError, Result};
use crate::sheet::RawSheet;

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const OLE_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0];

/// Extensions always read as spreadsheet containers.
const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "xla", "ods"];

/// Sheet name given to delimited text read from a buffer.
pub const DEFAULT_DELIMITED_SHEET: &str = "Sheet1";

type SpreadsheetReader<'a> = Sheets<Cursor<Cow<'a, [u8]>>>;

enum Content<'a> {
    Spreadsheet(Box<SpreadsheetReader<'a>>),
    Delimited(RawSheet),
}

/// An opened workbook.
///
/// The source is read once on [`Workbook::open`]; sheets are decoded on
/// demand from that single buffer.
pub struct Workbook<'a> {
    content: Content<'a>,
    names: Vec<String>,
}

impl<'a> Workbook<'a> {
    pub fn open(source: WorkbookSource<'a>) -> Result<Self> {
        match source {
            WorkbookSource::Bytes(bytes) => {
                Self::from_bytes(Cow::Borrowed(bytes), DEFAULT_DELIMITED_SHEET, false)
            }
            WorkbookSource::Path(path) => {
                let bytes = read_file(path)?;
                let container = path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| {
                        WORKBOOK_EXTENSIONS
                            .iter()
                            .any(|known| ext.eq_ignore_ascii_case(known))
                    });
                let stem = path
                    .file_stem()
                    .and_then(|stem| stem.to_str())
                    .unwrap_or(DEFAULT_DELIMITED_SHEET);
                Self::from_bytes(Cow::Owned(bytes), stem, container)
            }
        }
    }

    fn from_bytes(bytes: Cow<'a, [u8]>, delimited_name: &str, container: bool) -> Result<Self> {
        if bytes.is_empty() {
            return Err(IngestError::EmptySource);
        }
        if container || is_container(&bytes) {
            let sheets = open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(|e| {
                IngestError::WorkbookOpen {
                    message: e.to_string(),
                }
            })?;
            let names = sheets.sheet_names();
            tracing::debug!(sheets = names.len(), "opened spreadsheet workbook");
            Ok(Self {
                content: Content::Spreadsheet(Box::new(sheets)),
                names,
            })
        } else {
            let sheet = read_delimited(&bytes, delimited_name)?;
            tracing::debug!(
                sheet = delimited_name,
                rows = sheet.height(),
                "read delimited text"
            );
            Ok(Self {
                names: vec![sheet.name().to_string()],
                content: Content::Delimited(sheet),
            })
        }
    }

    pub fn sheet_names(&self) -> &[String] {
        &self.names
    }

    /// Returns the actual name of the selected sheet.
    pub fn resolve(&self, selector: &SheetSelector) -> Result<String> {
        selector
            .resolve(&self.names)
            .map(str::to_string)
            .ok_or_else(|| match selector {
                SheetSelector::Index(index) => IngestError::SheetIndexOutOfRange {
                    index: *index,
                    count: self.names.len(),
                },
                SheetSelector::Name(name) => IngestError::SheetNotFound {
                    sheet: name.clone(),
                    available: self.names.clone(),
                },
            })
    }

    pub fn has_sheet(&self, selector: &SheetSelector) -> bool {
        selector.resolve(&self.names).is_some()
    }

    pub fn read_sheet(&mut self, selector: &SheetSelector) -> Result<RawSheet> {
        let name = self.resolve(selector)?;
        let sheet = match &mut self.content {
            Content::Delimited(sheet) => sheet.clone(),
            Content::Spreadsheet(sheets) => {
                let range =
                    sheets
                        .worksheet_range(&name)
                        .map_err(|e| IngestError::SheetRead {
                            sheet: name.clone(),
                            message: e.to_string(),
                        })?;
                RawSheet::new(name, absolute_rows(&range))
            }
        };
        tracing::debug!(
            sheet = sheet.name(),
            rows = sheet.height(),
            columns = sheet.width(),
            "read worksheet"
        );
        Ok(sheet)
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

fn is_container(bytes: &[u8]) -> bool {
    bytes.starts_with(ZIP_MAGIC) || bytes.starts_with(OLE_MAGIC)
}

/// Restores the rows and columns the range trimmed off its top-left corner,
/// so indices match worksheet row and column numbers.
fn absolute_rows(range: &Range<Data>) -> Vec<Vec<String>> {
    let Some((start_row, start_column)) = range.start() else {
        return Vec::new();
    };
    let mut rows = vec![Vec::new(); start_row as usize];
    for row in range.rows() {
        let mut cells = vec![String::new(); start_column as usize];
        cells.extend(row.iter().map(cell_text));
        rows.push(cells);
    }
    rows
}

/// Reads delimited text as a single sheet, decoding by BOM with UTF-8 as
/// the default. Empty lines become empty rows so row indices stay absolute.
fn read_delimited(bytes: &[u8], name: &str) -> Result<RawSheet> {
    let (text, encoding, had_errors) = encoding_rs::UTF_8.decode(bytes);
    if had_errors {
        tracing::warn!(
            encoding = encoding.name(),
            "replaced malformed byte sequences in delimited text"
        );
    }

    let input = text.as_bytes();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input);
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut record = csv::StringRecord::new();
    // Byte offsets: where the next read starts, and where the last record's
    // content ended (before its terminator).
    let mut start = 0;
    let mut content_end = 0;
    while reader
        .read_record(&mut record)
        .map_err(|e| IngestError::CsvParse {
            message: e.to_string(),
        })?
    {
        let end = usize::try_from(reader.position().byte())
            .unwrap_or(input.len())
            .min(input.len());
        let consumed = &input[start..end];
        let content_start = start + consumed.iter().take_while(|&&b| is_line_end(b)).count();
        let breaks = line_breaks(&input[content_end.min(content_start)..content_start]);
        // The first break after a record is that record's own terminator.
        let skipped = if rows.is_empty() {
            breaks
        } else {
            breaks.saturating_sub(1)
        };
        if skipped > 0 {
            tracing::trace!(row = rows.len(), skipped, "kept empty lines as blank rows");
        }
        rows.extend(std::iter::repeat_n(Vec::new(), skipped));
        rows.push(record.iter().map(str::to_string).collect());
        content_end = start + consumed.len()
            - consumed.iter().rev().take_while(|&&b| is_line_end(b)).count();
        start = end;
    }
    Ok(RawSheet::new(name, rows))
}

fn is_line_end(byte: u8) -> bool {
    matches!(byte, b'\r' | b'\n')
}

/// Counts line breaks, reading `\r\n` as one.
fn line_breaks(gap: &[u8]) -> usize {
    let mut count = 0;
    let mut bytes = gap.iter().peekable();
    while let Some(&byte) = bytes.next() {
        match byte {
            b'\r' => {
                bytes.next_if_eq(&&b'\n');
                count += 1;
            }
            b'\n' => count += 1,
            _ => {}
        }
    }
    count
}
