//! Batch processing over uploaded workbooks
//!
//! Takes explicit input values and returns explicit results, one per file.
//! A failure only affects its own file; the rest of the batch still runs.

use crate::core::RuleVariantExpander;
use crate::error::{ForgeError, ForgeResult};
use crate::excel::{ExcelExporter, ExcelImporter};
use crate::types::{ExpansionReport, Placement};
use tracing::{info, warn};

/// An uploaded workbook
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }
}

/// A workbook ready to be offered for download
#[derive(Debug, Clone)]
pub struct ExpandedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub report: ExpansionReport,
}

/// Result for one file of a batch
#[derive(Debug)]
pub struct BatchOutcome {
    /// Name of the uploaded file
    pub source: String,
    pub result: ForgeResult<ExpandedFile>,
}

impl BatchOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Whether a filename carries the accepted `.xlsx` extension
pub fn is_xlsx(filename: &str) -> bool {
    std::path::Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx"))
}

/// Expand a single uploaded workbook
pub fn expand_upload(upload: &Upload, expander: &RuleVariantExpander) -> ForgeResult<ExpandedFile> {
    if !is_xlsx(&upload.filename) {
        return Err(ForgeError::UnsupportedFile(upload.filename.clone()));
    }

    let workbook = ExcelImporter::new(&upload.bytes).import()?;
    let expansion = expander.expand(&upload.filename, &workbook)?;
    let bytes = ExcelExporter::new(&expansion.workbook).to_bytes()?;

    Ok(ExpandedFile {
        filename: expander.output_filename(&upload.filename),
        bytes,
        report: expansion.report,
    })
}

/// Expand every upload in order, isolating failures per file
pub fn process_batch(uploads: Vec<Upload>, placement: Placement) -> Vec<BatchOutcome> {
    let expander = RuleVariantExpander::new(placement);

    uploads
        .into_iter()
        .map(|upload| {
            let result = expand_upload(&upload, &expander);
            match &result {
                Ok(file) => info!(
                    source = %upload.filename,
                    output = %file.filename,
                    original_rows = file.report.original_rows,
                    expanded_rows = file.report.expanded_rows,
                    "expanded workbook"
                ),
                Err(e) => warn!(
                    source = %upload.filename,
                    kind = e.kind(),
                    error = %e,
                    "workbook rejected"
                ),
            }
            BatchOutcome {
                source: upload.filename,
                result,
            }
        })
        .collect()
}
