//! Core expansion logic: row duplication and output sheet ordering

pub mod expander;
pub mod ordering;

pub use expander::{Expansion, RuleVariantExpander, VARIANT_OVERRIDES};
pub use ordering::{plan_sheet_order, SheetAnchors, AFTER_ANCHOR, BEFORE_ANCHOR, TARGET_SHEET};
