//! Where a workbook comes from and which sheet to read.

use std::fmt;
use std::path::Path;

/// Spreadsheet input: an in-memory buffer or a file on disk.
#[derive(Debug, Clone, Copy)]
pub enum WorkbookSource<'a> {
    Bytes(&'a [u8]),
    Path(&'a Path),
}

impl<'a> From<&'a [u8]> for WorkbookSource<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::Bytes(bytes)
    }
}

impl<'a> From<&'a Path> for WorkbookSource<'a> {
    fn from(path: &'a Path) -> Self {
        Self::Path(path)
    }
}

impl fmt::Display for WorkbookSource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bytes(bytes) => write!(f, "<{} bytes>", bytes.len()),
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Target worksheet, by name or 0-based position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SheetSelector {
    Name(String),
    Index(usize),
}

impl SheetSelector {
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// Picks a sheet from the available names.
    ///
    /// Names match exactly first, then ignoring case and surrounding
    /// whitespace.
    pub fn resolve<'n>(&self, names: &'n [String]) -> Option<&'n str> {
        match self {
            Self::Index(index) => names.get(*index).map(String::as_str),
            Self::Name(wanted) => names
                .iter()
                .find(|name| *name == wanted)
                .or_else(|| {
                    let wanted = wanted.trim().to_lowercase();
                    names
                        .iter()
                        .find(|name| name.trim().to_lowercase() == wanted)
                })
                .map(String::as_str),
        }
    }
}

impl From<&str> for SheetSelector {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<usize> for SheetSelector {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl fmt::Display for SheetSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => write!(f, "{name}"),
            Self::Index(index) => write!(f, "#{index}"),
        }
    }
}
