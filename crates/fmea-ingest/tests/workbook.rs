//! Spreadsheet workbooks whose used range does not start at A1.

use fmea_ingest::{
    ParseOptions, SheetSelector, TemplateRegistry, Workbook, WorkbookSource,
    try_parse_with_options,
};
use fmea_model::{FieldValue, fields};
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook as XlsxWorkbook};

/// Header at C3, one entry at C4; rows 1-2 and columns A-B are unused.
fn offset_workbook() -> Vec<u8> {
    let mut workbook = XlsxWorkbook::new();
    let date = Format::new().set_num_format("yyyy-mm-dd");
    let sheet = workbook.add_worksheet();
    sheet.set_name("PFMEA").unwrap();
    for (column, label) in [
        (2, "Step"),
        (3, "Failure Mode (FM)"),
        (4, "Severity (S) of FE"),
        (5, "Target Completion Date"),
    ] {
        sheet.write_string(2, column, label).unwrap();
    }
    sheet.write_string(3, 2, "Die attach").unwrap();
    sheet.write_string(3, 3, "Crack").unwrap();
    sheet.write_number(3, 4, 8).unwrap();
    sheet
        .write_datetime_with_format(3, 5, &ExcelDateTime::from_ymd(2024, 3, 15).unwrap(), &date)
        .unwrap();
    workbook.save_to_buffer().unwrap()
}

fn positional_registry() -> TemplateRegistry {
    TemplateRegistry::from_json_str(
        r#"[{
            "id": "offset",
            "document": "fmea",
            "sheet": "PFMEA",
            "header_rows": [2],
            "fields": [
                {"name": "process_step", "source": {"index": 2}},
                {"name": "failure_mode", "source": {"index": 3}},
                {"name": "severity", "source": {"index": 4}, "kind": "rating"},
                {"name": "target_completion_date", "source": {"index": 5}}
            ],
            "anchor": "failure_mode"
        }]"#,
    )
    .unwrap()
}

#[test]
fn trimmed_rows_and_columns_are_restored() {
    let bytes = offset_workbook();
    let mut workbook = Workbook::open(WorkbookSource::Bytes(&bytes)).unwrap();
    assert_eq!(workbook.sheet_names(), ["PFMEA"]);

    let sheet = workbook.read_sheet(&SheetSelector::name("pfmea")).unwrap();
    assert_eq!(sheet.height(), 4);
    assert_eq!(sheet.width(), 6);
    assert!(sheet.is_blank_row(0));
    assert_eq!(sheet.cell(2, 0), "");
    assert_eq!(sheet.cell(2, 2), "Step");
    assert_eq!(sheet.cell(3, 4), "8");
    assert_eq!(sheet.cell(3, 5), "2024-03-15");
}

#[test]
fn positional_fields_bind_to_absolute_columns() {
    let bytes = offset_workbook();
    let options = ParseOptions::new()
        .template("offset")
        .registry(positional_registry());
    let extraction = try_parse_with_options(WorkbookSource::Bytes(&bytes), &options).unwrap();

    assert_eq!(extraction.sheet, "PFMEA");
    assert_eq!(extraction.labels[0], "column_0");
    assert_eq!(extraction.labels[2], "Step");
    assert_eq!(extraction.records.len(), 1);

    let record = &extraction.records[0];
    assert_eq!(record.row_index, 4);
    assert_eq!(record.text(fields::PROCESS_STEP), "Die attach");
    assert_eq!(record.text(fields::FAILURE_MODE), "Crack");
    assert_eq!(record.rating(fields::SEVERITY).map(|r| r.get()), Some(8));
    assert_eq!(
        record.get(fields::TARGET_COMPLETION_DATE),
        Some(&FieldValue::Text("2024-03-15".to_string()))
    );
}
