//! Workbook sources and sheet reading.

mod cell;
mod reader;
mod source;

pub use cell::{cell_text, format_number};
pub use reader::{DEFAULT_DELIMITED_SHEET, Workbook};
pub use source::{SheetSelector, WorkbookSource};
