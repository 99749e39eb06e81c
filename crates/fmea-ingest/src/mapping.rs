//! Field-to-column binding.
//!
//! Every field of a template gets a binding, even when no column supplies
//! it: an unresolved field reads as an all-blank column so downstream
//! records always carry the full field set.

use fmea_model::{ColumnSource, FieldSpec, LabelMatch, ParseWarning};

use crate::header::label_key;

/// Physical column bound to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    Column(usize),
    /// No source column; every value of the field is blank.
    Missing,
}

impl Binding {
    pub fn column(self) -> Option<usize> {
        match self {
            Self::Column(index) => Some(index),
            Self::Missing => None,
        }
    }
}

/// Bindings for all fields of a template, in template order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnBindings {
    entries: Vec<(String, Binding)>,
}

impl ColumnBindings {
    pub fn get(&self, field: &str) -> Binding {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map_or(Binding::Missing, |(_, binding)| *binding)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Binding)> {
        self.entries
            .iter()
            .map(|(name, binding)| (name.as_str(), *binding))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn missing(&self) -> impl Iterator<Item = &str> {
        self.iter()
            .filter(|(_, binding)| *binding == Binding::Missing)
            .map(|(name, _)| name)
    }

    pub fn resolved_count(&self) -> usize {
        self.len() - self.missing().count()
    }

    /// One warning per unresolved field.
    pub fn warnings(&self) -> Vec<ParseWarning> {
        self.missing()
            .map(|field| ParseWarning::UnresolvedField {
                field: field.to_string(),
            })
            .collect()
    }
}

/// Resolves one source against the flattened labels. `labels` has one entry
/// per physical column.
pub fn resolve_source(source: &ColumnSource, labels: &[String]) -> Binding {
    match source {
        ColumnSource::Index(index) if *index < labels.len() => Binding::Column(*index),
        ColumnSource::Index(_) => Binding::Missing,
        ColumnSource::Label { text, mode, nth } => {
            let wanted = label_key(text);
            if wanted.is_empty() {
                return Binding::Missing;
            }
            labels
                .iter()
                .enumerate()
                .filter(|(_, label)| {
                    let key = label_key(label);
                    match mode {
                        LabelMatch::Exact => key == wanted,
                        LabelMatch::Contains => key.contains(&wanted),
                    }
                })
                .nth(*nth)
                .map_or(Binding::Missing, |(index, _)| Binding::Column(index))
        }
    }
}

/// Binds every field to a column.
pub fn map_columns(fields: &[FieldSpec], labels: &[String]) -> ColumnBindings {
    let entries = fields
        .iter()
        .map(|field| {
            let binding = resolve_source(&field.source, labels);
            match binding {
                Binding::Column(column) => tracing::trace!(
                    field = %field.name,
                    column,
                    label = %labels[column],
                    "bound field"
                ),
                Binding::Missing => tracing::debug!(
                    field = %field.name,
                    source = ?field.source,
                    "field has no source column"
                ),
            }
            (field.name.clone(), binding)
        })
        .collect();
    ColumnBindings { entries }
}
