//! Per-template extraction configuration.
//!
//! A template describes one revision of a worksheet layout: where the
//! header sits, how each canonical field binds to a column, which fields
//! are forward-filled, which field anchors a real entry and which
//! priorities are derived from S/O/D triples. Templates are data, so a new
//! worksheet revision is a new template rather than new branching code.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::fields::ROW_INDEX;

/// How blank cells of a field are treated before row filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillStrategy {
    #[default]
    None,
    /// Inherit the nearest preceding non-blank value (merged cells).
    ForwardFill,
}

/// Value coercion applied to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    #[default]
    Text,
    Rating,
    Priority,
}

/// Comparison used for label bindings, applied to normalized text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelMatch {
    #[default]
    Exact,
    Contains,
}

/// Where a field's values come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnSource {
    /// Fixed 0-based worksheet column.
    Index(usize),
    /// Flattened header label.
    Label {
        text: String,
        #[serde(default, rename = "match")]
        mode: LabelMatch,
        /// Which match to take when the label repeats (0 = first).
        #[serde(default)]
        nth: usize,
    },
}

impl ColumnSource {
    pub fn label(text: impl Into<String>) -> Self {
        Self::Label {
            text: text.into(),
            mode: LabelMatch::Exact,
            nth: 0,
        }
    }

    pub fn label_containing(text: impl Into<String>) -> Self {
        Self::Label {
            text: text.into(),
            mode: LabelMatch::Contains,
            nth: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub source: ColumnSource,
    #[serde(default)]
    pub fill: FillStrategy,
    #[serde(default)]
    pub kind: FieldKind,
}

impl FieldSpec {
    pub fn text(name: impl Into<String>, source: ColumnSource) -> Self {
        Self {
            name: name.into(),
            source,
            fill: FillStrategy::None,
            kind: FieldKind::Text,
        }
    }

    pub fn rating(name: impl Into<String>, source: ColumnSource) -> Self {
        Self {
            kind: FieldKind::Rating,
            ..Self::text(name, source)
        }
    }

    pub fn priority(name: impl Into<String>, source: ColumnSource) -> Self {
        Self {
            kind: FieldKind::Priority,
            ..Self::text(name, source)
        }
    }

    #[must_use]
    pub fn forward_filled(mut self) -> Self {
        self.fill = FillStrategy::ForwardFill;
        self
    }
}

/// Header-cleaning conventions of a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderOptions {
    /// Header levels starting with one of these are treated as empty.
    pub placeholder_prefixes: Vec<String>,
    /// Header levels equal (case-insensitively) to one of these are empty.
    pub placeholder_values: Vec<String>,
    /// Carry upper header levels rightwards across blank (merged) cells.
    pub fill_merged_levels: bool,
}

impl Default for HeaderOptions {
    fn default() -> Self {
        Self {
            placeholder_prefixes: vec!["Unnamed".to_string()],
            placeholder_values: vec!["nan".to_string(), "none".to_string(), "null".to_string()],
            fill_merged_levels: false,
        }
    }
}

impl HeaderOptions {
    /// Returns true when a trimmed header level carries no label.
    pub fn is_placeholder(&self, level: &str) -> bool {
        level.is_empty()
            || self
                .placeholder_prefixes
                .iter()
                .any(|prefix| level.starts_with(prefix.as_str()))
            || self
                .placeholder_values
                .iter()
                .any(|value| level.eq_ignore_ascii_case(value))
    }
}

/// A flattened label fragment that identifies a template revision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureRule {
    /// Normalized text the label must contain.
    pub contains: String,
    /// Restrict the check to one column.
    #[serde(default)]
    pub column: Option<usize>,
}

/// Derives a priority field from a rating triple when it is blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityRule {
    pub target: String,
    pub severity: String,
    pub occurrence: String,
    pub detection: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Fmea,
    ControlPlan,
}

/// A versioned set of field bindings for one worksheet layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSpec {
    pub id: String,
    #[serde(default)]
    pub version: u32,
    pub document: DocumentKind,
    #[serde(default)]
    pub description: String,
    /// Default worksheet name.
    pub sheet: String,
    /// Default 0-based header rows.
    pub header_rows: Vec<usize>,
    #[serde(default)]
    pub header: HeaderOptions,
    #[serde(default)]
    pub signature: Vec<SignatureRule>,
    pub fields: Vec<FieldSpec>,
    /// Field that must be non-blank (after fill) for a row to survive.
    pub anchor: String,
    /// Anchor values that are header remnants rather than entries.
    #[serde(default)]
    pub anchor_rejects: Vec<String>,
    #[serde(default)]
    pub priority_rules: Vec<PriorityRule>,
}

impl TemplateSpec {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.name.as_str())
    }

    /// Checks internal consistency of the template.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| ModelError::InvalidTemplate {
            id: self.id.clone(),
            reason,
        };
        if self.id.trim().is_empty() {
            return Err(invalid("template id is empty".to_string()));
        }
        if self.header_rows.is_empty() {
            return Err(invalid("no header rows".to_string()));
        }
        if self.fields.is_empty() {
            return Err(invalid("no fields".to_string()));
        }
        let mut seen = BTreeSet::new();
        for field in &self.fields {
            if field.name == ROW_INDEX {
                return Err(invalid(format!("field name '{ROW_INDEX}' is reserved")));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(invalid(format!("duplicate field '{}'", field.name)));
            }
        }
        if self.field(&self.anchor).is_none() {
            return Err(invalid(format!("anchor '{}' is not a field", self.anchor)));
        }
        for rule in &self.priority_rules {
            self.expect_kind(&rule.target, FieldKind::Priority)
                .map_err(invalid)?;
            for input in [&rule.severity, &rule.occurrence, &rule.detection] {
                self.expect_kind(input, FieldKind::Rating).map_err(invalid)?;
            }
        }
        Ok(())
    }

    fn expect_kind(&self, name: &str, kind: FieldKind) -> std::result::Result<(), String> {
        match self.field(name) {
            Some(field) if field.kind == kind => Ok(()),
            Some(field) => Err(format!(
                "field '{name}' is {:?}, expected {kind:?}",
                field.kind
            )),
            None => Err(format!("priority rule references unknown field '{name}'")),
        }
    }
}
