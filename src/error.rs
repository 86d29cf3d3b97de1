use thiserror::Error;

pub type ForgeResult<T> = Result<T, ForgeError>;

#[derive(Error, Debug)]
pub enum ForgeError {
    #[error("Sheet '{sheet}' not found in {workbook}")]
    MissingSheet { workbook: String, sheet: String },

    #[error("Unsupported file '{0}': only .xlsx workbooks are accepted")]
    UnsupportedFile(String),

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Upload error: {0}")]
    Upload(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ForgeError {
    /// Short machine-readable kind, used in API payloads
    pub fn kind(&self) -> &'static str {
        match self {
            ForgeError::MissingSheet { .. } => "missing_sheet",
            ForgeError::UnsupportedFile(_) => "unsupported_file",
            ForgeError::Workbook(_) => "workbook",
            ForgeError::Export(_) => "export",
            ForgeError::Upload(_) => "upload",
            ForgeError::Validation(_) => "validation",
            ForgeError::Io(_) => "io",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_sheet_message_names_file_and_sheet() {
        let err = ForgeError::MissingSheet {
            workbook: "rules.xlsx".to_string(),
            sheet: "Rules-Header".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Sheet 'Rules-Header' not found in rules.xlsx"
        );
        assert_eq!(err.kind(), "missing_sheet");
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ForgeError = io.into();
        assert_eq!(err.kind(), "io");
        assert!(err.to_string().contains("gone"));
    }
}
