//! Extracted record values.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::rating::{ActionPriority, Rating};

/// A single field value of an extracted record.
///
/// Free-text fields are never null (blank text is `Text("")`); ratings and
/// priorities are `Null` when the cell was blank, unparseable or unbound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Rating(Rating),
    Priority(ActionPriority),
    Null,
}

impl FieldValue {
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_rating(&self) -> Option<Rating> {
        match self {
            Self::Rating(rating) => Some(*rating),
            _ => None,
        }
    }

    pub fn as_priority(&self) -> Option<ActionPriority> {
        match self {
            Self::Priority(priority) => Some(*priority),
            _ => None,
        }
    }
}

/// One surviving data row, keyed by canonical field name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    /// 1-based worksheet row the record was read from.
    pub row_index: usize,
    #[serde(flatten)]
    pub fields: BTreeMap<String, FieldValue>,
}

impl Record {
    pub fn new(row_index: usize) -> Self {
        Self {
            row_index,
            fields: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, field: impl Into<String>, value: FieldValue) {
        self.fields.insert(field.into(), value);
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Text of a free-text field, or `""` when absent or not text.
    pub fn text(&self, field: &str) -> &str {
        self.get(field).and_then(FieldValue::as_text).unwrap_or("")
    }

    pub fn rating(&self, field: &str) -> Option<Rating> {
        self.get(field).and_then(FieldValue::as_rating)
    }

    pub fn priority(&self, field: &str) -> Option<ActionPriority> {
        self.get(field).and_then(FieldValue::as_priority)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
