//! Table and JSON rendering of command results.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;

use fmea_ingest::TemplateRegistry;
use fmea_model::{ActionPriority, DocumentKind, FieldValue, ParseWarning, Rating, Record, fields};
use fmea_priority::{Classification, RatingAxis};

/// Columns shown for FMEA records in table output.
pub const FMEA_SUMMARY_FIELDS: &[&str] = &[
    fields::PROCESS_STEP,
    fields::FAILURE_MODE,
    fields::FAILURE_CAUSE,
    fields::SEVERITY,
    fields::OCCURRENCE,
    fields::DETECTION,
    fields::AP,
];

/// Columns shown for Control Plan records in table output.
pub const CONTROL_PLAN_SUMMARY_FIELDS: &[&str] = &[
    fields::PROCESS_NAME,
    fields::PRODUCT_CHARACTERISTIC,
    fields::PROCESS_CHARACTERISTIC,
    fields::CONTROL_METHOD,
    fields::REACTION_PLAN,
];

pub fn summary_fields(document: DocumentKind) -> &'static [&'static str] {
    match document {
        DocumentKind::Fmea => FMEA_SUMMARY_FIELDS,
        DocumentKind::ControlPlan => CONTROL_PLAN_SUMMARY_FIELDS,
    }
}

pub fn document_label(document: DocumentKind) -> &'static str {
    match document {
        DocumentKind::Fmea => "PFMEA",
        DocumentKind::ControlPlan => "Control Plan",
    }
}

pub fn to_json<T: Serialize>(value: &T, compact: bool) -> serde_json::Result<String> {
    if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    }
}

pub fn records_table(records: &[Record], columns: &[&str]) -> Table {
    let mut table = Table::new();
    let mut header = vec![header_cell("Row")];
    header.extend(columns.iter().map(|column| header_cell(column)));
    table.set_header(header);
    apply_table_style(&mut table, 160);
    align_column(&mut table, 0, CellAlignment::Right);
    for record in records {
        let mut row = vec![Cell::new(record.row_index).fg(Color::DarkGrey)];
        row.extend(
            columns
                .iter()
                .map(|column| value_cell(record.get(column).unwrap_or(&FieldValue::Null))),
        );
        table.add_row(row);
    }
    table
}

pub fn warnings_table(warnings: &[ParseWarning]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Kind"), header_cell("Detail")]);
    apply_table_style(&mut table, 120);
    for warning in warnings {
        table.add_row(vec![
            Cell::new(warning_kind(warning)).fg(Color::Yellow),
            Cell::new(warning.to_string()),
        ]);
    }
    table
}

fn warning_kind(warning: &ParseWarning) -> &'static str {
    match warning {
        ParseWarning::SchemaDrift { .. } => "schema drift",
        ParseWarning::UnresolvedField { .. } => "unresolved field",
        ParseWarning::ValueCoercion { .. } => "value coercion",
        ParseWarning::PriorityLookupMiss { .. } => "priority fallback",
    }
}

pub fn classification_table(
    severity: Rating,
    occurrence: Rating,
    detection: Rating,
    classification: &Classification,
) -> Table {
    let bands = classification.bands;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Axis"),
        header_cell("Rating"),
        header_cell("Band"),
        header_cell("Guidance"),
    ]);
    apply_table_style(&mut table, 140);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Center);
    let rows = [
        (RatingAxis::Severity, severity, bands.severity.label()),
        (RatingAxis::Occurrence, occurrence, bands.occurrence.label()),
        (RatingAxis::Detection, detection, bands.detection.label()),
    ];
    for (axis, rating, band) in rows {
        table.add_row(vec![
            Cell::new(axis).add_attribute(Attribute::Bold),
            Cell::new(rating),
            Cell::new(band),
            Cell::new(axis.describe(rating)),
        ]);
    }
    table
}

pub fn templates_table(registry: &TemplateRegistry) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("ID"),
        header_cell("Version"),
        header_cell("Document"),
        header_cell("Sheet"),
        header_cell("Header Rows"),
        header_cell("Fields"),
        header_cell("Detection"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table, 165);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);
    for template in registry.templates() {
        let header_rows = template
            .header_rows
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let detection = if template.signature.is_empty() {
            dim_cell("explicit only")
        } else {
            Cell::new(format!("{} rules", template.signature.len()))
        };
        table.add_row(vec![
            Cell::new(&template.id)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(template.version),
            Cell::new(document_label(template.document)),
            Cell::new(&template.sheet),
            Cell::new(header_rows),
            Cell::new(template.fields.len()),
            detection,
            Cell::new(&template.description),
        ]);
    }
    table
}

pub fn ratings_table() -> Table {
    let mut table = Table::new();
    let mut header = vec![header_cell("Rating")];
    header.extend(RatingAxis::ALL.into_iter().map(|axis| header_cell(&axis.to_string())));
    table.set_header(header);
    apply_table_style(&mut table, 180);
    align_column(&mut table, 0, CellAlignment::Right);
    for rating in Rating::all().rev() {
        let mut row = vec![Cell::new(rating).add_attribute(Attribute::Bold)];
        row.extend(RatingAxis::ALL.into_iter().map(|axis| Cell::new(axis.describe(rating))));
        table.add_row(row);
    }
    table
}

pub fn priority_cell(priority: ActionPriority) -> Cell {
    let cell = Cell::new(priority.code()).add_attribute(Attribute::Bold);
    match priority {
        ActionPriority::High => cell.fg(Color::Red),
        ActionPriority::Medium => cell.fg(Color::Yellow),
        ActionPriority::Low => cell.fg(Color::Green),
    }
}

fn value_cell(value: &FieldValue) -> Cell {
    match value {
        FieldValue::Text(text) if text.is_empty() => dim_cell("-"),
        FieldValue::Text(text) => Cell::new(text),
        FieldValue::Rating(rating) => Cell::new(rating),
        FieldValue::Priority(priority) => priority_cell(*priority),
        FieldValue::Null => dim_cell("-"),
    }
}

fn apply_table_style(table: &mut Table, width: u16) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(width);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
