//! Parse configuration.

use fmea_priority::PriorityTable;

use crate::template::TemplateRegistry;
use crate::workbook::SheetSelector;

/// Which template drives the extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TemplateChoice {
    /// Detect the layout from header signatures.
    #[default]
    Auto,
    /// Use the template with this id.
    Id(String),
}

/// Options for one parse invocation.
///
/// Unset sheet and header rows fall back to the template's own defaults.
/// Without a registry the built-in templates are used; without a priority
/// table the AIAG-VDA table is used.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    pub sheet: Option<SheetSelector>,
    pub header_rows: Option<Vec<usize>>,
    pub template: TemplateChoice,
    pub registry: Option<TemplateRegistry>,
    /// Fill blank priority fields from S/O/D.
    pub derive_priority: bool,
    pub priority_table: Option<PriorityTable>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            sheet: None,
            header_rows: None,
            template: TemplateChoice::Auto,
            registry: None,
            derive_priority: true,
            priority_table: None,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn sheet(mut self, sheet: impl Into<SheetSelector>) -> Self {
        self.sheet = Some(sheet.into());
        self
    }

    #[must_use]
    pub fn header_rows(mut self, rows: impl Into<Vec<usize>>) -> Self {
        self.header_rows = Some(rows.into());
        self
    }

    #[must_use]
    pub fn template(mut self, id: impl Into<String>) -> Self {
        self.template = TemplateChoice::Id(id.into());
        self
    }

    #[must_use]
    pub fn registry(mut self, registry: TemplateRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    #[must_use]
    pub fn derive_priority(mut self, enabled: bool) -> Self {
        self.derive_priority = enabled;
        self
    }

    #[must_use]
    pub fn priority_table(mut self, table: PriorityTable) -> Self {
        self.priority_table = Some(table);
        self
    }
}
