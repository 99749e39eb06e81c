//! Record extraction from a mapped worksheet.
//!
//! Works column-wise: each field's values are pulled from its bound column,
//! hierarchical fields are forward-filled, then rows are filtered on the
//! template's anchor field and coerced into typed [`Record`]s.

use fmea_model::{
    ActionPriority, FieldKind, FieldValue, FillStrategy, ParseWarning, PriorityRule, Rating,
    Record, TemplateSpec,
};
use fmea_priority::{PriorityTable, classify_optional};

use crate::mapping::{Binding, ColumnBindings};
use crate::sheet::RawSheet;

/// Result of coercing one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coerced<T> {
    Blank,
    Valid(T),
    Invalid,
}

fn to_ascii(c: char) -> char {
    match c {
        '０'..='９' => {
            char::from_u32(u32::from(c) - u32::from('０') + u32::from('0')).unwrap_or(c)
        }
        '．' => '.',
        _ => c,
    }
}

/// Reads a 1-10 rating from cell text.
///
/// Accepts surrounding whitespace, integral decimals such as `2.0` and
/// full-width digits. Anything else, or a number outside 1-10, is invalid.
pub fn coerce_rating(raw: &str) -> Coerced<Rating> {
    let text: String = raw.trim().chars().map(to_ascii).collect();
    if text.is_empty() {
        return Coerced::Blank;
    }
    let value = text.parse::<i64>().ok().or_else(|| {
        text.parse::<f64>()
            .ok()
            .filter(|value| value.is_finite() && value.fract() == 0.0)
            .map(|value| value as i64)
    });
    match value.and_then(|value| Rating::try_from(value).ok()) {
        Some(rating) => Coerced::Valid(rating),
        None => Coerced::Invalid,
    }
}

pub fn coerce_priority(raw: &str) -> Coerced<ActionPriority> {
    let text = raw.trim();
    if text.is_empty() {
        return Coerced::Blank;
    }
    ActionPriority::from_label(text).map_or(Coerced::Invalid, Coerced::Valid)
}

/// Replaces blank values with the nearest preceding non-blank value.
///
/// Leading blanks stay blank. Applying the fill twice gives the same result
/// as applying it once.
pub fn forward_fill(values: &[String]) -> Vec<String> {
    values
        .iter()
        .scan(None::<&String>, |last, value| {
            if !value.trim().is_empty() {
                *last = Some(value);
            }
            Some(last.map_or_else(|| value.clone(), Clone::clone))
        })
        .collect()
}

/// Values of one field across the retained data rows.
fn field_column(
    sheet: &RawSheet,
    rows: &[usize],
    binding: Binding,
    fill: FillStrategy,
) -> Vec<String> {
    let raw: Vec<String> = match binding {
        Binding::Column(column) => rows
            .iter()
            .map(|&row| sheet.cell(row, column).trim().to_string())
            .collect(),
        Binding::Missing => vec![String::new(); rows.len()],
    };
    match fill {
        FillStrategy::ForwardFill => forward_fill(&raw),
        FillStrategy::None => raw,
    }
}

fn coerce_value(
    kind: FieldKind,
    field: &str,
    raw: &str,
    row_index: usize,
    warnings: &mut Vec<ParseWarning>,
) -> FieldValue {
    let coerced = match kind {
        FieldKind::Text => return FieldValue::Text(raw.to_string()),
        FieldKind::Rating => match coerce_rating(raw) {
            Coerced::Valid(rating) => Coerced::Valid(FieldValue::Rating(rating)),
            Coerced::Blank => Coerced::Blank,
            Coerced::Invalid => Coerced::Invalid,
        },
        FieldKind::Priority => match coerce_priority(raw) {
            Coerced::Valid(priority) => Coerced::Valid(FieldValue::Priority(priority)),
            Coerced::Blank => Coerced::Blank,
            Coerced::Invalid => Coerced::Invalid,
        },
    };
    match coerced {
        Coerced::Valid(value) => value,
        Coerced::Blank => FieldValue::Null,
        Coerced::Invalid => {
            tracing::trace!(row = row_index, field, value = raw, "nulled invalid value");
            warnings.push(ParseWarning::ValueCoercion {
                field: field.to_string(),
                row_index,
                value: raw.to_string(),
            });
            FieldValue::Null
        }
    }
}

/// Fills null priority fields from their S/O/D triple.
///
/// Rows with any rating missing are left null.
pub fn derive_priorities(
    record: &mut Record,
    rules: &[PriorityRule],
    table: &PriorityTable,
    warnings: &mut Vec<ParseWarning>,
) {
    for rule in rules {
        if !record.get(&rule.target).is_some_and(FieldValue::is_null) {
            continue;
        }
        let Some(classification) = classify_optional(
            table,
            record.rating(&rule.severity),
            record.rating(&rule.occurrence),
            record.rating(&rule.detection),
        ) else {
            continue;
        };
        if classification.fallback {
            warnings.push(ParseWarning::PriorityLookupMiss {
                field: rule.target.clone(),
                row_index: record.row_index,
                bands: classification.bands.to_string(),
            });
        }
        record.insert(
            rule.target.clone(),
            FieldValue::Priority(classification.priority),
        );
    }
}

/// Builds records from the rows after the header.
///
/// `data_start` is the first 0-based data row. Entirely blank rows are
/// skipped; a row survives when its anchor field is non-blank after fill
/// and is not one of the template's anchor rejects. Priorities are derived
/// when `table` is given.
pub fn extract_records(
    sheet: &RawSheet,
    data_start: usize,
    template: &TemplateSpec,
    bindings: &ColumnBindings,
    table: Option<&PriorityTable>,
) -> (Vec<Record>, Vec<ParseWarning>) {
    let rows: Vec<usize> = (data_start..sheet.height())
        .filter(|&row| !sheet.is_blank_row(row))
        .collect();
    let columns: Vec<Vec<String>> = template
        .fields
        .iter()
        .map(|field| field_column(sheet, &rows, bindings.get(&field.name), field.fill))
        .collect();
    let anchor = template
        .fields
        .iter()
        .position(|field| field.name == template.anchor);

    let mut records = Vec::new();
    let mut warnings = Vec::new();
    for (position, &row) in rows.iter().enumerate() {
        let anchor_value = anchor.map_or("", |field| columns[field][position].as_str());
        if anchor_value.is_empty()
            || template
                .anchor_rejects
                .iter()
                .any(|reject| reject.eq_ignore_ascii_case(anchor_value))
        {
            tracing::trace!(row = row + 1, anchor = anchor_value, "skipped row");
            continue;
        }

        let mut record = Record::new(row + 1);
        for (field, column) in template.fields.iter().zip(&columns) {
            let value = coerce_value(
                field.kind,
                &field.name,
                &column[position],
                record.row_index,
                &mut warnings,
            );
            record.insert(field.name.clone(), value);
        }
        if let Some(table) = table {
            derive_priorities(&mut record, &template.priority_rules, table, &mut warnings);
        }
        records.push(record);
    }

    tracing::debug!(
        template = %template.id,
        candidates = rows.len(),
        records = records.len(),
        warnings = warnings.len(),
        "extracted records"
    );
    (records, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fmea_model::{ColumnSource, DocumentKind, FieldSpec, HeaderOptions};
    use proptest::prelude::*;

    use crate::mapping::map_columns;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| (*value).to_string()).collect()
    }

    fn template() -> TemplateSpec {
        TemplateSpec {
            id: "test".to_string(),
            version: 1,
            document: DocumentKind::Fmea,
            description: String::new(),
            sheet: "Sheet1".to_string(),
            header_rows: vec![0],
            header: HeaderOptions::default(),
            signature: Vec::new(),
            fields: vec![
                FieldSpec::text("process_step", ColumnSource::Index(0)).forward_filled(),
                FieldSpec::text("failure_mode", ColumnSource::Index(1)),
                FieldSpec::rating("severity", ColumnSource::Index(2)),
                FieldSpec::rating("occurrence", ColumnSource::Index(3)),
                FieldSpec::rating("detection", ColumnSource::Index(4)),
                FieldSpec::priority("ap", ColumnSource::Index(5)),
                FieldSpec::text("remarks", ColumnSource::Index(9)),
            ],
            anchor: "failure_mode".to_string(),
            anchor_rejects: strings(&["Failure Mode"]),
            priority_rules: vec![PriorityRule {
                target: "ap".to_string(),
                severity: "severity".to_string(),
                occurrence: "occurrence".to_string(),
                detection: "detection".to_string(),
            }],
        }
    }

    fn run(rows: Vec<Vec<&str>>, derive: bool) -> (Vec<Record>, Vec<ParseWarning>) {
        let sheet = RawSheet::from_rows("Sheet1", rows);
        let template = template();
        let labels = strings(&["a", "b", "c", "d", "e", "f"]);
        let bindings = map_columns(&template.fields, &labels);
        let table = derive.then(PriorityTable::standard);
        extract_records(&sheet, 1, &template, &bindings, table)
    }

    #[test]
    fn forward_fill_carries_last_value() {
        let filled = forward_fill(&strings(&["", "Mount", "", " ", "Bond", ""]));
        assert_eq!(filled, strings(&["", "Mount", "Mount", "Mount", "Bond", "Bond"]));
    }

    #[test]
    fn rating_coercion() {
        assert_eq!(coerce_rating(" 7 "), Coerced::Valid(Rating::new(7).unwrap()));
        assert_eq!(coerce_rating("2.0"), Coerced::Valid(Rating::new(2).unwrap()));
        assert_eq!(coerce_rating("１０"), Coerced::Valid(Rating::new(10).unwrap()));
        assert_eq!(coerce_rating(""), Coerced::Blank);
        assert_eq!(coerce_rating("2.5"), Coerced::Invalid);
        assert_eq!(coerce_rating("11"), Coerced::Invalid);
        assert_eq!(coerce_rating("0"), Coerced::Invalid);
        assert_eq!(coerce_rating("high"), Coerced::Invalid);
        assert_eq!(coerce_rating("NaN"), Coerced::Invalid);
    }

    #[test]
    fn priority_coercion() {
        assert_eq!(coerce_priority("h"), Coerced::Valid(ActionPriority::High));
        assert_eq!(coerce_priority("Medium"), Coerced::Valid(ActionPriority::Medium));
        assert_eq!(coerce_priority("低"), Coerced::Valid(ActionPriority::Low));
        assert_eq!(coerce_priority("  "), Coerced::Blank);
        assert_eq!(coerce_priority("?"), Coerced::Invalid);
    }

    #[test]
    fn rows_are_filled_filtered_and_coerced() {
        let (records, warnings) = run(
            vec![
                vec!["Step", "Failure Mode", "S", "O", "D", "AP"],
                vec!["Die bond", "Wrong part", "2", "3", "6", ""],
                vec!["", "Missing die", "9", "x", "2", "H"],
                vec!["", "", "5", "5", "5", ""],
                vec!["", "", "", "", "", ""],
                vec!["", "Failure Mode", "", "", "", ""],
            ],
            true,
        );
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.row_index, 2);
        assert_eq!(first.text("process_step"), "Die bond");
        assert_eq!(first.priority("ap"), Some(ActionPriority::Low));
        assert_eq!(first.text("remarks"), "");

        let second = &records[1];
        assert_eq!(second.row_index, 3);
        assert_eq!(second.text("process_step"), "Die bond");
        assert_eq!(second.rating("occurrence"), None);
        assert_eq!(second.get("occurrence"), Some(&FieldValue::Null));
        assert_eq!(second.priority("ap"), Some(ActionPriority::High));

        assert_eq!(
            warnings,
            [ParseWarning::ValueCoercion {
                field: "occurrence".to_string(),
                row_index: 3,
                value: "x".to_string(),
            }]
        );
    }

    #[test]
    fn derivation_can_be_disabled() {
        let (records, _) = run(
            vec![
                vec!["Step", "Failure Mode", "S", "O", "D", "AP"],
                vec!["Die bond", "Wrong part", "2", "3", "6", ""],
            ],
            false,
        );
        assert_eq!(records[0].get("ap"), Some(&FieldValue::Null));
    }

    #[test]
    fn minimal_severity_derivation_reports_lookup_miss() {
        let (records, warnings) = run(
            vec![
                vec!["Step", "Failure Mode", "S", "O", "D", "AP"],
                vec!["Die bond", "Wrong part", "1", "9", "9", "n/a"],
            ],
            true,
        );
        assert_eq!(records[0].priority("ap"), Some(ActionPriority::Low));
        assert!(matches!(warnings[0], ParseWarning::ValueCoercion { .. }));
        assert_eq!(
            warnings[1],
            ParseWarning::PriorityLookupMiss {
                field: "ap".to_string(),
                row_index: 2,
                bands: "1/8-10/7-10".to_string(),
            }
        );
    }

    #[test]
    fn recorded_priority_is_kept() {
        let (records, _) = run(
            vec![
                vec!["Step", "Failure Mode", "S", "O", "D", "AP"],
                vec!["Die bond", "Wrong part", "2", "3", "6", "H"],
            ],
            true,
        );
        assert_eq!(records[0].priority("ap"), Some(ActionPriority::High));
    }

    proptest! {
        #[test]
        fn forward_fill_is_idempotent(values in prop::collection::vec("[ ab]{0,2}", 0..20)) {
            let once = forward_fill(&values);
            prop_assert_eq!(forward_fill(&once), once);
        }

        #[test]
        fn coerced_ratings_stay_in_range(raw in ".{0,6}") {
            if let Coerced::Valid(rating) = coerce_rating(&raw) {
                prop_assert!((1..=10).contains(&rating.get()));
            }
        }

        #[test]
        fn blank_anchor_rows_are_excluded(
            anchors in prop::collection::vec(prop_oneof![Just(""), Just("Wrong part")], 0..15),
        ) {
            let mut rows = vec![vec!["Step", "Failure Mode"]];
            rows.extend(anchors.iter().map(|anchor| vec!["Die bond", *anchor]));
            let (records, _) = run(rows, false);
            let expected = anchors.iter().filter(|anchor| !anchor.is_empty()).count();
            prop_assert_eq!(records.len(), expected);
            for record in &records {
                prop_assert_eq!(record.text("failure_mode"), "Wrong part");
            }
        }
    }
}
