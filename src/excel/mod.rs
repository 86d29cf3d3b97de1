//! Excel import/export module
//!
//! - Import: .xlsx bytes → Workbook (calamine)
//! - Export: Workbook → .xlsx bytes (rust_xlsxwriter)

mod exporter;
mod importer;

pub use exporter::ExcelExporter;
pub use importer::{import_file, ExcelImporter};

/// Content type declared for .xlsx downloads
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
