//! Excel import/export and end-to-end batch tests over real .xlsx bytes

use rulesheet_forge::batch::{expand_upload, process_batch, Upload};
use rulesheet_forge::core::RuleVariantExpander;
use rulesheet_forge::excel::{import_file, ExcelExporter, ExcelImporter};
use rulesheet_forge::types::{CellValue, Placement, Workbook, Worksheet};
use rulesheet_forge::ForgeError;
use tempfile::TempDir;

// ═══════════════════════════════════════════════════════════════════════════
// FIXTURES
// ═══════════════════════════════════════════════════════════════════════════

fn header(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn rules_workbook(order: &[&str]) -> Workbook {
    let mut wb = Workbook::new();
    for name in order {
        let sheet = if *name == "Rules-Header" {
            let mut sheet = Worksheet::new(
                "Rules-Header",
                header(&["Action", "Variant Type", "Ruleset ShortName", "Other"]),
            );
            sheet.add_row(vec![
                CellValue::text("KEEP"),
                CellValue::text("GX"),
                CellValue::text("R1"),
                CellValue::text("X"),
            ]);
            sheet.add_row(vec![
                CellValue::text("UPDATE"),
                CellValue::text("GY"),
                CellValue::text("R2"),
                CellValue::Int(42),
            ]);
            sheet
        } else {
            let mut sheet = Worksheet::new(*name, header(&["Name", "Enabled"]));
            sheet.add_row(vec![CellValue::text(format!("{}-1", name)), CellValue::Bool(true)]);
            sheet
        };
        wb.add_sheet(sheet);
    }
    wb
}

fn to_bytes(wb: &Workbook) -> Vec<u8> {
    ExcelExporter::new(wb).to_bytes().unwrap()
}

/// Cell display strings, which compare equal across int/float storage
fn rows_as_text(sheet: &Worksheet) -> Vec<Vec<String>> {
    sheet
        .rows
        .iter()
        .map(|row| row.iter().map(|c| c.to_string()).collect())
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════════
// IMPORT / EXPORT
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_sheet_order_survives_round_trip() {
    let wb = rules_workbook(&["Intro", "PCRF", "Rules-Header", "Rules-Alias"]);
    let read = ExcelImporter::new(&to_bytes(&wb)).import().unwrap();
    assert_eq!(read.sheet_names(), wb.sheet_names());
}

#[test]
fn test_values_survive_round_trip() {
    let wb = rules_workbook(&["Rules-Header", "PCRF"]);
    let read = ExcelImporter::new(&to_bytes(&wb)).import().unwrap();

    for sheet in &wb.sheets {
        let back = read.sheet(&sheet.name).unwrap();
        assert_eq!(back.header, sheet.header);
        assert_eq!(rows_as_text(back), rows_as_text(sheet));
    }
}

#[test]
fn test_datetime_cells_survive_round_trip() {
    let mut wb = Workbook::new();
    let mut sheet = Worksheet::new("Dates", header(&["When"]));
    sheet.add_row(vec![CellValue::DateTime(45123.25)]);
    wb.add_sheet(sheet);

    let read = ExcelImporter::new(&to_bytes(&wb)).import().unwrap();
    let cell = read.sheet("Dates").unwrap().cell(0, "When").cloned();

    match cell {
        Some(CellValue::DateTime(serial)) => assert!((serial - 45123.25).abs() < 1e-9),
        other => panic!("Expected DateTime cell, got {:?}", other),
    }
}

#[test]
fn test_blank_cells_and_leading_blank_column_keep_positions() {
    let mut wb = Workbook::new();
    let mut sheet = Worksheet::new("Sparse", header(&["", "B", "C"]));
    sheet.add_row(vec![CellValue::Empty, CellValue::Empty, CellValue::text("c1")]);
    sheet.add_row(vec![CellValue::Empty, CellValue::text("b2"), CellValue::Empty]);
    wb.add_sheet(sheet);

    let read = ExcelImporter::new(&to_bytes(&wb)).import().unwrap();
    let back = read.sheet("Sparse").unwrap();

    assert_eq!(back.header, header(&["", "B", "C"]));
    assert_eq!(back.cell(0, "C"), Some(&CellValue::text("c1")));
    assert_eq!(back.cell(1, "B"), Some(&CellValue::text("b2")));
    assert_eq!(back.cell(1, "C"), Some(&CellValue::Empty));
}

#[test]
fn test_header_below_blank_first_row_is_found() {
    // Empty header leaves row 1 blank; the real header lands in row 2
    let mut wb = Workbook::new();
    let mut sheet = Worksheet::new("Rules-Header", Vec::new());
    sheet.add_row(vec![CellValue::text("Action"), CellValue::text("Variant Type")]);
    sheet.add_row(vec![CellValue::text("KEEP"), CellValue::text("GX")]);
    wb.add_sheet(sheet);

    let file = expand_upload(
        &Upload::new("blank-top.xlsx", to_bytes(&wb)),
        &RuleVariantExpander::default(),
    )
    .unwrap();
    assert_eq!(
        file.report.columns_rewritten,
        vec!["Variant Type".to_string(), "Action".to_string()]
    );

    let out = ExcelImporter::new(&file.bytes).import().unwrap();
    let rules = out.sheet("Rules-Header").unwrap();
    assert_eq!(rules.header, header(&["Action", "Variant Type"]));
    assert_eq!(
        rows_as_text(rules),
        vec![vec!["KEEP", "GX"], vec!["INSERT", "GF"]]
    );
}

#[test]
fn test_import_file_reads_from_disk() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("rules.xlsx");
    ExcelExporter::new(&rules_workbook(&["Rules-Header"]))
        .export(&path)
        .unwrap();

    let wb = import_file(&path).unwrap();
    assert_eq!(wb.sheet("Rules-Header").unwrap().row_count(), 2);
}

#[test]
fn test_import_file_missing_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let result = import_file(temp_dir.path().join("nope.xlsx"));
    assert!(matches!(result, Err(ForgeError::Io(_))));
}

// ═══════════════════════════════════════════════════════════════════════════
// END-TO-END OVER BYTES
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_expand_upload_anchored() {
    let bytes = to_bytes(&rules_workbook(&["PCRF", "Rules-Header", "Rules-Alias"]));
    let upload = Upload::new("rules.xlsx", bytes);

    let file = expand_upload(&upload, &RuleVariantExpander::new(Placement::Anchored)).unwrap();
    assert_eq!(file.filename, "rules.xlsx");

    let out = ExcelImporter::new(&file.bytes).import().unwrap();
    assert_eq!(
        out.sheet_names(),
        vec!["Rules-Header", "PCRF", "Rules-Alias"]
    );

    let rules = out.sheet("Rules-Header").unwrap();
    let text = rows_as_text(rules);
    assert_eq!(text.len(), 4);
    assert_eq!(text[0], vec!["KEEP", "GX", "R1", "X"]);
    assert_eq!(text[1], vec!["UPDATE", "GY", "R2", "42"]);
    assert_eq!(text[2], vec!["INSERT", "GF", "", "X"]);
    assert_eq!(text[3], vec!["INSERT", "GF", "", "42"]);
}

#[test]
fn test_expand_upload_leading_renames_file() {
    let bytes = to_bytes(&rules_workbook(&["PCRF", "Rules-Header"]));
    let upload = Upload::new("rules.xlsx", bytes);

    let file = expand_upload(&upload, &RuleVariantExpander::new(Placement::Leading)).unwrap();
    assert_eq!(file.filename, "rules_GIFT.xlsx");

    let out = ExcelImporter::new(&file.bytes).import().unwrap();
    assert_eq!(out.sheet_names(), vec!["Rules-Header", "PCRF"]);
}

#[test]
fn test_batch_isolates_failures_per_file() {
    let uploads = vec![
        Upload::new("first.xlsx", to_bytes(&rules_workbook(&["Rules-Header"]))),
        Upload::new("no-rules.xlsx", to_bytes(&rules_workbook(&["PCRF"]))),
        Upload::new("broken.xlsx", b"definitely not a workbook".to_vec()),
        Upload::new("notes.csv", b"a,b".to_vec()),
        Upload::new("last.xlsx", to_bytes(&rules_workbook(&["Rules-Header", "PCRF"]))),
    ];

    let outcomes = process_batch(uploads, Placement::Anchored);

    assert_eq!(outcomes.len(), 5);
    assert!(outcomes[0].is_success());
    assert!(matches!(
        outcomes[1].result,
        Err(ForgeError::MissingSheet { .. })
    ));
    assert!(matches!(outcomes[2].result, Err(ForgeError::Workbook(_))));
    assert!(matches!(
        outcomes[3].result,
        Err(ForgeError::UnsupportedFile(_))
    ));
    assert!(outcomes[4].is_success());

    let sources: Vec<&str> = outcomes.iter().map(|o| o.source.as_str()).collect();
    assert_eq!(
        sources,
        vec!["first.xlsx", "no-rules.xlsx", "broken.xlsx", "notes.csv", "last.xlsx"]
    );
}

#[test]
fn test_missing_sheet_error_names_uploaded_file() {
    let outcomes = process_batch(
        vec![Upload::new("Q3 rules.xlsx", to_bytes(&rules_workbook(&["PCRF"])))],
        Placement::Leading,
    );

    let err = outcomes[0].result.as_ref().unwrap_err();
    assert_eq!(
        err.to_string(),
        "Sheet 'Rules-Header' not found in Q3 rules.xlsx"
    );
}
