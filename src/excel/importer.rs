//! Excel importer implementation - .xlsx bytes → Workbook

use crate::error::{ForgeError, ForgeResult};
use crate::types::{CellValue, Workbook, Worksheet};
use calamine::{Data, Range, Reader, Xlsx};
use std::io::Cursor;
use std::path::Path;

/// Reads every worksheet of an .xlsx workbook, in workbook order
pub struct ExcelImporter<'a> {
    bytes: &'a [u8],
}

impl<'a> ExcelImporter<'a> {
    /// Create an importer over in-memory workbook bytes
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// Import the workbook.
    ///
    /// The first used row is the header and every following row up to the
    /// last used row is data. Leading blank rows are skipped; columns are
    /// addressed from column A so leading blank columns keep their position.
    pub fn import(&self) -> ForgeResult<Workbook> {
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(self.bytes))
            .map_err(|e| ForgeError::Workbook(format!("Failed to open Excel file: {}", e)))?;

        let mut result = Workbook::new();

        for sheet_name in workbook.sheet_names() {
            let range = workbook.worksheet_range(&sheet_name).map_err(|e| {
                ForgeError::Workbook(format!("Failed to read sheet '{}': {}", sheet_name, e))
            })?;
            result.add_sheet(self.process_sheet(&sheet_name, &range));
        }

        Ok(result)
    }

    /// Convert one calamine range to a worksheet
    fn process_sheet(&self, sheet_name: &str, range: &Range<Data>) -> Worksheet {
        let (Some((first_row, _)), Some((last_row, last_col))) = (range.start(), range.end())
        else {
            // No used cells at all
            return Worksheet::new(sheet_name, Vec::new());
        };

        let cell_at = |row: u32, col: u32| -> CellValue {
            range
                .get_value((row, col))
                .map(convert_cell)
                .unwrap_or_default()
        };

        // Header is the first used row; blank rows above it are dropped
        let header: Vec<String> = (0..=last_col)
            .map(|col| cell_at(first_row, col).to_string())
            .collect();
        let mut sheet = Worksheet::new(sheet_name, header);

        for row in first_row + 1..=last_row {
            sheet.add_row((0..=last_col).map(|col| cell_at(row, col)).collect());
        }

        sheet
    }
}

/// Import workbook bytes read from disk
pub fn import_file<P: AsRef<Path>>(path: P) -> ForgeResult<Workbook> {
    let bytes = std::fs::read(path.as_ref())?;
    ExcelImporter::new(&bytes).import()
}

/// Map a calamine cell onto the crate's cell model
fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::String(s.clone()),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::DateTime(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::Error(e.to_string()),
    }
}
