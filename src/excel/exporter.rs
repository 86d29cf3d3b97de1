//! Excel exporter implementation - Workbook → .xlsx bytes

use crate::error::{ForgeError, ForgeResult};
use crate::types::{CellValue, Workbook, Worksheet};
use rust_xlsxwriter::{Format, Workbook as XlsxWorkbook, Worksheet as XlsxWorksheet};
use std::path::Path;

/// Number format for date/time cells
const DATETIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// Serializes a workbook with one worksheet per sheet, in workbook order
pub struct ExcelExporter<'a> {
    workbook: &'a Workbook,
    datetime_format: Format,
}

impl<'a> ExcelExporter<'a> {
    /// Create a new Excel exporter
    pub fn new(workbook: &'a Workbook) -> Self {
        Self {
            workbook,
            datetime_format: Format::new().set_num_format(DATETIME_FORMAT),
        }
    }

    /// Serialize the workbook into an in-memory .xlsx buffer
    pub fn to_bytes(&self) -> ForgeResult<Vec<u8>> {
        let mut output = self.build()?;
        output
            .save_to_buffer()
            .map_err(|e| ForgeError::Export(format!("Failed to serialize workbook: {}", e)))
    }

    /// Save the workbook to an .xlsx file
    pub fn export(&self, output_path: &Path) -> ForgeResult<()> {
        let mut output = self.build()?;
        output
            .save(output_path)
            .map_err(|e| ForgeError::Export(format!("Failed to save Excel file: {}", e)))
    }

    fn build(&self) -> ForgeResult<XlsxWorkbook> {
        let mut output = XlsxWorkbook::new();
        for sheet in &self.workbook.sheets {
            self.export_sheet(&mut output, sheet)?;
        }
        Ok(output)
    }

    /// Export a single sheet: header in row 0, data from row 1
    fn export_sheet(&self, output: &mut XlsxWorkbook, sheet: &Worksheet) -> ForgeResult<()> {
        let worksheet = output.add_worksheet();
        worksheet
            .set_name(&sheet.name)
            .map_err(|e| ForgeError::Export(format!("Failed to set worksheet name: {}", e)))?;

        for (col_idx, name) in sheet.header.iter().enumerate() {
            if name.is_empty() {
                continue;
            }
            worksheet
                .write_string(0, column_index(col_idx)?, name)
                .map_err(|e| ForgeError::Export(format!("Failed to write header: {}", e)))?;
        }

        for (row_idx, row) in sheet.rows.iter().enumerate() {
            let excel_row = u32::try_from(row_idx + 1).map_err(|_| {
                ForgeError::Export(format!("Sheet '{}' has too many rows", sheet.name))
            })?;
            for (col_idx, cell) in row.iter().enumerate() {
                self.write_cell(worksheet, excel_row, column_index(col_idx)?, cell)?;
            }
        }

        Ok(())
    }

    fn write_cell(
        &self,
        worksheet: &mut XlsxWorksheet,
        row: u32,
        col: u16,
        cell: &CellValue,
    ) -> ForgeResult<()> {
        let written = match cell {
            CellValue::Empty => return Ok(()),
            CellValue::String(s) => worksheet.write_string(row, col, s),
            // xlsx numbers are doubles; exact only up to 2^53
            CellValue::Int(i) => worksheet.write_number(row, col, *i as f64),
            CellValue::Float(n) => worksheet.write_number(row, col, *n),
            CellValue::Bool(b) => worksheet.write_boolean(row, col, *b),
            CellValue::DateTime(serial) => {
                worksheet.write_number_with_format(row, col, *serial, &self.datetime_format)
            }
            // Error values cannot be written directly; keep their text
            CellValue::Error(e) => worksheet.write_string(row, col, e),
        };

        written
            .map(|_| ())
            .map_err(|e| ForgeError::Export(format!("Failed to write cell ({}, {}): {}", row, col, e)))
    }
}

fn column_index(idx: usize) -> ForgeResult<u16> {
    u16::try_from(idx).map_err(|_| ForgeError::Export(format!("Column {} is out of range", idx)))
}
