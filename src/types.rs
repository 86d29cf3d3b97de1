use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

//==============================================================================
// Cell Values
//==============================================================================

/// A single untyped spreadsheet cell, carried through verbatim
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Blank cell
    #[default]
    Empty,
    /// Text
    String(String),
    /// Whole number. Written to xlsx as a double, so values beyond
    /// 2^53 lose precision; the xlsx reader yields `Float` for numbers.
    Int(i64),
    /// Floating point number
    Float(f64),
    /// Boolean
    Bool(bool),
    /// Date/time stored as an Excel serial number
    DateTime(f64),
    /// Cell error such as `#N/A`
    Error(String),
}

impl CellValue {
    /// Shorthand for a text cell
    pub fn text(s: impl Into<String>) -> Self {
        CellValue::String(s.into())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Get the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Empty => "Empty",
            CellValue::String(_) => "String",
            CellValue::Int(_) => "Int",
            CellValue::Float(_) => "Float",
            CellValue::Bool(_) => "Bool",
            CellValue::DateTime(_) => "DateTime",
            CellValue::Error(_) => "Error",
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::String(s) => write!(f, "{}", s),
            CellValue::Int(i) => write!(f, "{}", i),
            CellValue::Float(n) => write!(f, "{}", n),
            CellValue::Bool(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            CellValue::DateTime(serial) => write!(f, "{}", serial),
            CellValue::Error(e) => write!(f, "{}", e),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Float(n)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

//==============================================================================
// Worksheets and Workbooks
//==============================================================================

/// A named table: header row plus data rows aligned to it by position
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Worksheet {
    pub name: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Worksheet {
    pub fn new(name: impl Into<String>, header: Vec<String>) -> Self {
        Self {
            name: name.into(),
            header,
            rows: Vec::new(),
        }
    }

    /// Append a data row
    pub fn add_row(&mut self, row: Vec<CellValue>) {
        self.rows.push(row);
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Position of a column in the header, if present
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.header.iter().position(|name| name == column)
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.column_index(column).is_some()
    }

    /// Read a row as a column-name → cell mapping.
    ///
    /// Cells past the end of a short row read as `Empty`.
    pub fn cell(&self, row: usize, column: &str) -> Option<&CellValue> {
        const BLANK: &CellValue = &CellValue::Empty;
        let idx = self.column_index(column)?;
        let row = self.rows.get(row)?;
        Some(row.get(idx).unwrap_or(BLANK))
    }
}

/// An ordered sequence of named worksheets
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Workbook {
    pub sheets: Vec<Worksheet>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sheet(&mut self, sheet: Worksheet) {
        self.sheets.push(sheet);
    }

    pub fn sheet(&self, name: &str) -> Option<&Worksheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    /// Sheet names in workbook order
    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|s| s.name.clone()).collect()
    }
}

//==============================================================================
// Expansion Options and Results
//==============================================================================

/// Where the expanded Rules-Header sheet lands in the output workbook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    /// Keep the sheet next to its PCRF / Rules-Alias neighbours and keep the filename
    #[default]
    Anchored,
    /// Write the sheet first and add the `_GIFT` filename suffix
    Leading,
}

impl Placement {
    pub fn as_str(&self) -> &'static str {
        match self {
            Placement::Anchored => "anchored",
            Placement::Leading => "leading",
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Placement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "anchored" | "a" => Ok(Placement::Anchored),
            "leading" | "b" => Ok(Placement::Leading),
            other => Err(format!(
                "unknown placement '{}' (expected 'anchored' or 'leading')",
                other
            )),
        }
    }
}

/// Summary of one workbook expansion
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ExpansionReport {
    pub original_rows: usize,
    pub expanded_rows: usize,
    /// Which of the overwritten columns were present in the header
    pub columns_rewritten: Vec<String>,
    pub sheet_order: Vec<String>,
}
