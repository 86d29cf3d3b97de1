//! Rulesheet Forge - Rules-Header variant expander for .xlsx workbooks
//!
//! Duplicates every row of the `Rules-Header` worksheet. The copies get
//! `Ruleset ShortName` cleared, `Variant Type` set to `GF` and `Action` set
//! to `INSERT`. All other worksheets are copied through unchanged.
//!
//! # Features
//!
//! - Anchored placement: the expanded sheet keeps its place next to
//!   `PCRF` / `Rules-Alias` and the filename is kept
//! - Leading placement: the expanded sheet goes first and the file is
//!   renamed to `<name>_GIFT.xlsx`
//! - Batch processing with per-file error isolation
//! - Upload form and JSON API (`rulesheet-server`), CLI (`rulesheet`)
//!
//! # Example
//!
//! ```no_run
//! use rulesheet_forge::batch::{process_batch, Upload};
//! use rulesheet_forge::types::Placement;
//!
//! let bytes = std::fs::read("rules.xlsx")?;
//! for outcome in process_batch(vec![Upload::new("rules.xlsx", bytes)], Placement::Anchored) {
//!     match outcome.result {
//!         Ok(file) => std::fs::write(&file.filename, &file.bytes)?,
//!         Err(e) => eprintln!("{}", e),
//!     }
//! }
//! # Ok::<(), std::io::Error>(())
//! ```

pub mod api;
pub mod batch;
pub mod cli;
pub mod core;
pub mod error;
pub mod excel;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{ForgeError, ForgeResult};
pub use types::{CellValue, ExpansionReport, Placement, Workbook, Worksheet};
