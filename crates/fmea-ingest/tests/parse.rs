//! End-to-end parsing of worksheet fixtures written as delimited text.

use std::io::Write;
use std::path::Path;

use fmea_ingest::{
    IngestError, ParseOptions, SheetSelector, TemplateRegistry, WorkbookSource, parse,
    parse_with_options, try_parse_with_options,
};
use fmea_model::{ActionPriority, FieldValue, ParseOutcome, ParseWarning, fields};

const FMEA_WIDTH: usize = 33;

fn csv_cell(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn to_csv(rows: &[Vec<String>]) -> Vec<u8> {
    let mut out = String::new();
    for row in rows {
        let cells: Vec<String> = row.iter().map(|cell| csv_cell(cell)).collect();
        out.push_str(&cells.join(","));
        out.push('\n');
    }
    out.into_bytes()
}

fn row(width: usize, cells: &[(usize, &str)]) -> Vec<String> {
    let mut row = vec![String::new(); width];
    for (column, value) in cells {
        row[*column] = (*value).to_string();
    }
    row
}

/// AIAG-VDA PFMEA sheet: metadata rows 0-7, header rows 8-9, data from 10.
fn pfmea_rows() -> Vec<Vec<String>> {
    let mut rows = vec![row(FMEA_WIDTH, &[(1, "PFMEA"), (3, "Eutectic DB 1610")])];
    rows.extend((1..8).map(|_| row(FMEA_WIDTH, &[])));
    rows.push(row(
        FMEA_WIDTH,
        &[
            (3, "Structure Analysis"),
            (6, "Function Analysis"),
            (9, "Failure Analysis"),
            (13, "Risk Analysis"),
            (20, "Optimization"),
        ],
    ));
    rows.push(row(
        FMEA_WIDTH,
        &[
            (1, "Issue #"),
            (2, "History / Change Authorization"),
            (3, "1. Process Item"),
            (4, "2. Process Step"),
            (5, "3. Process Work Element"),
            (6, "1. Function of the Process Item"),
            (7, "2. Function of the Process Step and Product Characteristic"),
            (8, "3. Function of the Process Work Element and Process Characteristic"),
            (9, "1. Failure Effects (FE)"),
            (10, "Severity (S) of FE"),
            (11, "2. Failure Mode (FM)"),
            (12, "3. Failure Cause (FC)"),
            (13, "Current Prevention Controls (PC) of FC"),
            (14, "Occurance (O) of FC"),
            (15, "Current Detection Controls (DC) of FC or FM"),
            (16, "Detection (D) of FC/ FM"),
            (17, "PFMEA AP"),
            (18, "Special Characteristics"),
            (19, "Filter Code"),
            (20, "Prevention Action"),
            (21, "Detection Action"),
            (22, "Responsible Person's Name"),
            (23, "Target Completion Date"),
            (24, "Status"),
            (25, "Action Taken with Pointer to Evidence"),
            (26, "Completion Date"),
            (27, "Severity (S)"),
            (28, "Occurance (O) of FC"),
            (29, "Detection (D)"),
            (30, "PFMEA AP"),
            (31, "Special Characteristics"),
            (32, "Remarks"),
        ],
    ));
    rows.push(row(
        FMEA_WIDTH,
        &[
            (1, "1"),
            (3, "Eutectic DB 1610"),
            (4, "Before work"),
            (5, "Men"),
            (9, "Customer complaint"),
            (10, "2"),
            (11, "Wrong Products"),
            (12, "Work order not confirmed"),
            (14, "3"),
            (16, "6"),
            (17, "L"),
            (27, "2"),
            (28, "2"),
            (29, "2"),
        ],
    ));
    rows.push(row(
        FMEA_WIDTH,
        &[
            (5, "Machine"),
            (10, "7"),
            (11, "Die crack"),
            (14, "4"),
            (16, "5"),
        ],
    ));
    rows.push(row(FMEA_WIDTH, &[(12, "Orphan cause")]));
    rows.push(row(
        FMEA_WIDTH,
        &[(10, "high"), (11, "Void"), (14, "2"), (16, "2")],
    ));
    rows.push(row(FMEA_WIDTH, &[]));
    rows
}

/// Control Plan sheet: header rows 6-8 with merged group headings.
fn control_plan_rows() -> Vec<Vec<String>> {
    const WIDTH: usize = 13;
    let mut rows = vec![row(WIDTH, &[(0, "Control Plan")])];
    rows.extend((1..6).map(|_| row(WIDTH, &[])));
    rows.push(row(
        WIDTH,
        &[
            (0, "Part/Process Number"),
            (1, "Process Name\nOperation Description"),
            (2, "Machine, Device, Jig Tools for Mfg."),
            (3, "Characteristics"),
            (6, "Special Char. Class"),
            (7, "Methods"),
            (12, "Reaction Plan"),
        ],
    ));
    rows.push(row(
        WIDTH,
        &[
            (3, "No."),
            (4, "Product"),
            (5, "Process"),
            (7, "Product/ Process Specification / Tolerance"),
            (8, "Evaluation Measurement Technique"),
            (9, "Sample"),
            (11, "Control Method"),
        ],
    ));
    rows.push(row(WIDTH, &[(9, "Size"), (10, "Freq.")]));
    rows.push(row(
        WIDTH,
        &[
            (0, "10"),
            (1, "Die attach"),
            (2, "Bonder"),
            (3, "1"),
            (4, "Bond strength"),
            (7, ">= 5N"),
            (8, "Pull test"),
            (9, "5 pcs"),
            (10, "Per lot"),
            (11, "SPC"),
            (12, "Hold lot"),
        ],
    ));
    rows.push(row(
        WIDTH,
        &[
            (3, "2"),
            (5, "Temperature"),
            (7, "320C"),
            (8, "Thermocouple"),
            (9, "1"),
            (10, "Per shift"),
            (11, "Check sheet"),
            (12, "Adjust"),
        ],
    ));
    rows.push(row(WIDTH, &[(4, "Product")]));
    rows.push(row(WIDTH, &[]));
    rows
}

fn first_sheet() -> SheetSelector {
    SheetSelector::Index(0)
}

#[test]
fn positional_template_is_detected_and_extracts_records() {
    let bytes = to_csv(&pfmea_rows());
    let outcome = parse(WorkbookSource::Bytes(&bytes), &first_sheet(), &[8, 9]);

    let ParseOutcome::Success {
        template,
        records,
        warnings,
    } = outcome
    else {
        panic!("expected success, got {outcome:?}");
    };
    assert_eq!(template, "pfmea-aiag-vda-r1");
    assert_eq!(records.len(), 3);

    let first = &records[0];
    assert_eq!(first.row_index, 11);
    assert_eq!(first.len(), fields::FMEA_FIELDS.len());
    assert_eq!(first.text(fields::ISSUE_NO), "1");
    assert_eq!(first.text(fields::FAILURE_MODE), "Wrong Products");
    assert_eq!(first.rating(fields::SEVERITY).map(|r| r.get()), Some(2));
    assert_eq!(first.rating(fields::OCCURRENCE).map(|r| r.get()), Some(3));
    assert_eq!(first.rating(fields::DETECTION).map(|r| r.get()), Some(6));
    assert_eq!(first.priority(fields::AP), Some(ActionPriority::Low));
    assert_eq!(first.priority(fields::AP_OPT), Some(ActionPriority::Low));
    assert_eq!(
        first
            .get(fields::OCCURRENCE_OPT)
            .and_then(FieldValue::as_rating)
            .map(|r| r.get()),
        Some(2)
    );
    assert_eq!(first.text(fields::REMARKS), "");

    let second = &records[1];
    assert_eq!(second.row_index, 12);
    assert_eq!(second.text(fields::PROCESS_ITEM), "Eutectic DB 1610");
    assert_eq!(second.text(fields::PROCESS_STEP), "Before work");
    assert_eq!(second.text(fields::PROCESS_WORK_ELEMENT), "Machine");
    assert_eq!(second.priority(fields::AP), Some(ActionPriority::Medium));
    assert_eq!(second.get(fields::AP_OPT), Some(&FieldValue::Null));

    let third = &records[2];
    assert_eq!(third.row_index, 14);
    assert_eq!(third.get(fields::SEVERITY), Some(&FieldValue::Null));
    assert_eq!(third.get(fields::AP), Some(&FieldValue::Null));

    assert_eq!(
        warnings,
        [ParseWarning::ValueCoercion {
            field: fields::SEVERITY.to_string(),
            row_index: 14,
            value: "high".to_string(),
        }]
    );
}

#[test]
fn shifted_columns_use_label_template() {
    let mut rows = pfmea_rows();
    for row in &mut rows {
        row.insert(2, String::new());
    }
    let bytes = to_csv(&rows);
    let outcome = parse(WorkbookSource::Bytes(&bytes), &first_sheet(), &[8, 9]);

    let ParseOutcome::Success {
        template,
        records,
        warnings,
    } = outcome
    else {
        panic!("expected success, got {outcome:?}");
    };
    assert_eq!(template, "pfmea-aiag-vda-r2");
    assert!(warnings.iter().all(|w| matches!(w, ParseWarning::ValueCoercion { .. })));
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].text(fields::FAILURE_MODE), "Wrong Products");
    assert_eq!(records[0].rating(fields::DETECTION).map(|r| r.get()), Some(6));
    assert_eq!(records[0].rating(fields::DETECTION_OPT).map(|r| r.get()), Some(2));
    assert_eq!(records[1].text(fields::PROCESS_ITEM), "Eutectic DB 1610");
}

#[test]
fn control_plan_with_merged_headings() {
    let bytes = to_csv(&control_plan_rows());
    let outcome = parse(WorkbookSource::Bytes(&bytes), &first_sheet(), &[6, 7, 8]);
    assert!(outcome.is_success(), "{outcome:?}");
    assert!(outcome.warnings().is_empty(), "{:?}", outcome.warnings());

    let records = outcome.records();
    assert_eq!(records.len(), 2);
    insta::assert_json_snapshot!(records[0], @r#"
    {
      "row_index": 10,
      "control_method": "SPC",
      "equipment": "Bonder",
      "evaluation_technique": "Pull test",
      "process_characteristic": "",
      "process_name": "Die attach",
      "product_characteristic": "Bond strength",
      "reaction_plan": "Hold lot",
      "sample_freq": "Per lot",
      "sample_size": "5 pcs",
      "spec_tolerance": ">= 5N",
      "special_character_class": ""
    }
    "#);
    assert_eq!(records[1].row_index, 11);
    assert_eq!(records[1].text(fields::PRODUCT_CHARACTERISTIC), "Bond strength");
    assert_eq!(records[1].text(fields::PROCESS_CHARACTERISTIC), "Temperature");
    assert_eq!(records[1].text(fields::PROCESS_NAME), "Die attach");
}

#[test]
fn explicit_template_uses_its_default_header_rows() {
    let bytes = to_csv(&pfmea_rows());
    let options = ParseOptions::new()
        .sheet(first_sheet())
        .template("pfmea-aiag-vda-r1");
    let extraction = try_parse_with_options(WorkbookSource::Bytes(&bytes), &options).unwrap();
    assert_eq!(extraction.template, "pfmea-aiag-vda-r1");
    assert_eq!(extraction.labels.len(), FMEA_WIDTH);
    assert_eq!(extraction.labels[0], "column_0");
    assert_eq!(extraction.labels[10], "Severity (S) of FE");
    assert_eq!(extraction.records.len(), 3);
}

#[test]
fn derivation_disabled_leaves_blank_priority_null() {
    let bytes = to_csv(&pfmea_rows());
    let options = ParseOptions::new()
        .sheet(first_sheet())
        .header_rows([8, 9])
        .derive_priority(false);
    let outcome = parse_with_options(WorkbookSource::Bytes(&bytes), &options);
    assert_eq!(outcome.records()[1].get(fields::AP), Some(&FieldValue::Null));
}

#[test]
fn unmatched_header_falls_back_to_default_layout() {
    let outcome = parse(
        WorkbookSource::Bytes(b"a,b\nx,y\n"),
        &first_sheet(),
        &[0],
    );
    let ParseOutcome::Success {
        template,
        records,
        warnings,
    } = outcome
    else {
        panic!("expected success, got {outcome:?}");
    };
    assert_eq!(template, "pfmea-aiag-vda-r1");
    assert!(records.is_empty());
    assert!(warnings.contains(&ParseWarning::UnresolvedField {
        field: fields::FAILURE_MODE.to_string()
    }));
}

#[test]
fn schema_drift_is_reported() {
    let bytes = b"Failure Mode (FM),PFMEA AP\nWrong part,L,extra\n";
    let outcome = parse(WorkbookSource::Bytes(bytes), &first_sheet(), &[0]);
    assert!(outcome.warnings().contains(&ParseWarning::SchemaDrift {
        expected: 3,
        found: 2
    }));
}

#[test]
fn missing_sheet_is_a_single_error() {
    let bytes = to_csv(&pfmea_rows());
    let outcome = parse(
        WorkbookSource::Bytes(&bytes),
        &SheetSelector::name("Missing"),
        &[8, 9],
    );
    assert!(!outcome.is_success());
    assert!(outcome.records().is_empty());
    let message = outcome.error_message().unwrap_or_default();
    assert!(message.contains("sheet 'Missing' not found"), "{message}");

    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["status"], "error");
}

#[test]
fn structural_failures_become_error_outcomes() {
    let corrupt = parse(
        WorkbookSource::Bytes(b"PK\x03\x04corrupt"),
        &first_sheet(),
        &[0],
    );
    assert!(!corrupt.is_success());

    let missing = parse(
        WorkbookSource::Path(Path::new("/nonexistent/pfmea.xlsx")),
        &first_sheet(),
        &[0],
    );
    assert!(missing.error_message().is_some_and(|m| m.contains("not found")));

    let bytes = to_csv(&pfmea_rows());
    let past_end = parse(WorkbookSource::Bytes(&bytes), &first_sheet(), &[99]);
    assert!(!past_end.is_success());

    let empty_header = parse(WorkbookSource::Bytes(&bytes), &first_sheet(), &[]);
    assert_eq!(
        empty_header.error_message(),
        Some("header row specification is empty")
    );
}

#[test]
fn auto_detection_without_sheet_needs_a_known_sheet() {
    let bytes = to_csv(&pfmea_rows());
    let err = try_parse_with_options(WorkbookSource::Bytes(&bytes), &ParseOptions::new())
        .unwrap_err();
    assert!(matches!(err, IngestError::NoTemplateMatched));
}

#[test]
fn path_source_names_sheet_after_file() {
    let mut file = tempfile::Builder::new()
        .prefix("00")
        .suffix(".csv")
        .tempfile()
        .unwrap();
    file.write_all(&to_csv(&pfmea_rows())).unwrap();
    file.flush().unwrap();

    let options = ParseOptions::new().sheet(first_sheet()).header_rows([8, 9]);
    let extraction = try_parse_with_options(WorkbookSource::Path(file.path()), &options).unwrap();
    let stem = file.path().file_stem().and_then(|s| s.to_str()).unwrap();
    assert_eq!(extraction.sheet, stem);
    assert_eq!(extraction.records.len(), 3);
}

#[test]
fn user_templates_replace_builtins() {
    let mut registry = TemplateRegistry::builtin().unwrap();
    registry
        .extend(
            TemplateRegistry::from_json_str(
                r#"[{
                    "id": "minimal",
                    "document": "fmea",
                    "sheet": "Sheet1",
                    "header_rows": [0],
                    "fields": [
                        {"name": "failure_mode", "source": {"label": {"text": "FM"}}},
                        {"name": "severity", "source": {"index": 1}, "kind": "rating"}
                    ],
                    "anchor": "failure_mode"
                }]"#,
            )
            .unwrap(),
        )
        .unwrap();
    let options = ParseOptions::new().template("minimal").registry(registry);
    let extraction =
        try_parse_with_options(WorkbookSource::Bytes(b"FM,S\nCrack,9\n,\n"), &options).unwrap();
    assert_eq!(extraction.records.len(), 1);
    assert_eq!(extraction.records[0].len(), 2);
    assert_eq!(
        extraction.records[0].rating("severity").map(|r| r.get()),
        Some(9)
    );
}

#[test]
fn empty_lines_do_not_shift_header_rows() {
    let registry = TemplateRegistry::from_json_str(
        r#"[{
            "id": "titled",
            "document": "fmea",
            "sheet": "Sheet1",
            "header_rows": [2],
            "fields": [
                {"name": "process_step", "source": {"label": {"text": "Step"}}},
                {"name": "failure_mode", "source": {"label": {"text": "Failure Mode (FM)"}}}
            ],
            "anchor": "failure_mode"
        }]"#,
    )
    .unwrap();
    let options = ParseOptions::new().template("titled").registry(registry);
    let extraction = try_parse_with_options(
        WorkbookSource::Bytes(b"Title\n\nStep,Failure Mode (FM),PFMEA AP\nA,wrong,\n"),
        &options,
    )
    .unwrap();
    assert_eq!(extraction.labels[1], "Failure Mode (FM)");
    assert_eq!(extraction.records.len(), 1);
    assert_eq!(extraction.records[0].row_index, 4);
    assert_eq!(extraction.records[0].text(fields::FAILURE_MODE), "wrong");
    assert!(extraction.warnings.is_empty(), "{:?}", extraction.warnings);
}
