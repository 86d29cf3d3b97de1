//! Rules-Header variant expansion
//!
//! Doubles the rows of the Rules-Header sheet: the original rows are kept
//! as-is and a copy of each is appended with the variant columns rewritten.

use crate::core::ordering::SheetAnchors;
use crate::error::{ForgeError, ForgeResult};
use crate::types::{CellValue, ExpansionReport, Placement, Workbook, Worksheet};
use tracing::debug;

/// Column overwrites applied to every duplicated row
pub const VARIANT_OVERRIDES: [(&str, &str); 3] = [
    ("Ruleset ShortName", ""),
    ("Variant Type", "GF"),
    ("Action", "INSERT"),
];

/// Suffix inserted before `.xlsx` for leading placement
pub const GIFT_SUFFIX: &str = "_GIFT";

const XLSX_EXTENSION: &str = ".xlsx";

/// Output of a successful expansion
#[derive(Debug, Clone, PartialEq)]
pub struct Expansion {
    pub workbook: Workbook,
    pub report: ExpansionReport,
}

/// Expands the Rules-Header sheet of a workbook into original + variant rows
#[derive(Debug, Clone, Default)]
pub struct RuleVariantExpander {
    placement: Placement,
    anchors: SheetAnchors,
}

impl RuleVariantExpander {
    pub fn new(placement: Placement) -> Self {
        Self {
            placement,
            anchors: SheetAnchors::default(),
        }
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Expand `workbook`, returning a new workbook.
    ///
    /// The input is never modified. The operation is not idempotent: feeding
    /// the output back in doubles the Rules-Header rows again.
    pub fn expand(&self, workbook_name: &str, workbook: &Workbook) -> ForgeResult<Expansion> {
        let target = workbook
            .sheet(&self.anchors.target)
            .ok_or_else(|| ForgeError::MissingSheet {
                workbook: workbook_name.to_string(),
                sheet: self.anchors.target.clone(),
            })?;

        let (expanded, columns_rewritten) = self.expand_sheet(target);

        let sheet_order = self.anchors.plan(&workbook.sheet_names(), self.placement);
        debug!(
            workbook = workbook_name,
            placement = %self.placement,
            order = ?sheet_order,
            "planned sheet order"
        );

        let mut output = Workbook::new();
        for name in &sheet_order {
            if *name == self.anchors.target {
                output.add_sheet(expanded.clone());
            } else if let Some(sheet) = workbook.sheet(name) {
                output.add_sheet(sheet.clone());
            }
        }

        let report = ExpansionReport {
            original_rows: target.row_count(),
            expanded_rows: expanded.row_count(),
            columns_rewritten,
            sheet_order,
        };

        Ok(Expansion {
            workbook: output,
            report,
        })
    }

    /// Build the expanded sheet: original rows followed by rewritten copies.
    ///
    /// Overrides only apply to columns present in the header; the names of
    /// the columns that were rewritten are returned alongside the sheet.
    pub fn expand_sheet(&self, sheet: &Worksheet) -> (Worksheet, Vec<String>) {
        let overrides: Vec<(usize, &str, &str)> = VARIANT_OVERRIDES
            .iter()
            .filter_map(|(column, value)| {
                sheet
                    .column_index(column)
                    .map(|idx| (idx, *column, *value))
            })
            .collect();

        let mut expanded = Worksheet::new(sheet.name.clone(), sheet.header.clone());
        expanded.rows.reserve(sheet.row_count() * 2);
        expanded.rows.extend(sheet.rows.iter().cloned());

        for row in &sheet.rows {
            let mut variant = row.clone();
            for (idx, _, value) in &overrides {
                if variant.len() <= *idx {
                    variant.resize(*idx + 1, CellValue::Empty);
                }
                variant[*idx] = CellValue::text(*value);
            }
            expanded.add_row(variant);
        }

        let columns_rewritten = overrides
            .iter()
            .map(|(_, column, _)| column.to_string())
            .collect();

        (expanded, columns_rewritten)
    }

    /// Download name for an expanded workbook.
    ///
    /// Anchored placement keeps the name; leading placement turns
    /// `rules.xlsx` into `rules_GIFT.xlsx`.
    pub fn output_filename(&self, original: &str) -> String {
        match self.placement {
            Placement::Anchored => original.to_string(),
            Placement::Leading => gift_filename(original),
        }
    }
}

fn gift_filename(original: &str) -> String {
    let split = original.len().saturating_sub(XLSX_EXTENSION.len());
    match (original.get(..split), original.get(split..)) {
        (Some(stem), Some(ext)) if ext.eq_ignore_ascii_case(XLSX_EXTENSION) => {
            format!("{}{}{}", stem, GIFT_SUFFIX, XLSX_EXTENSION)
        }
        _ => format!("{}{}{}", original, GIFT_SUFFIX, XLSX_EXTENSION),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn header(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn row(cells: &[&str]) -> Vec<CellValue> {
        cells.iter().map(|s| CellValue::text(*s)).collect()
    }

    #[test]
    fn test_worked_example() {
        let mut sheet = Worksheet::new(
            "Rules-Header",
            header(&["Action", "Variant Type", "Ruleset ShortName", "Other"]),
        );
        sheet.add_row(row(&["KEEP", "GX", "R1", "X"]));

        let (expanded, rewritten) = RuleVariantExpander::default().expand_sheet(&sheet);

        assert_eq!(expanded.header, sheet.header);
        assert_eq!(
            expanded.rows,
            vec![row(&["KEEP", "GX", "R1", "X"]), row(&["INSERT", "GF", "", "X"])]
        );
        assert_eq!(rewritten, vec!["Ruleset ShortName", "Variant Type", "Action"]);
    }

    #[test]
    fn test_unknown_columns_are_not_added() {
        let mut sheet = Worksheet::new("Rules-Header", header(&["Action", "Note"]));
        sheet.add_row(row(&["KEEP", "n"]));

        let (expanded, rewritten) = RuleVariantExpander::default().expand_sheet(&sheet);

        assert_eq!(expanded.header, header(&["Action", "Note"]));
        assert_eq!(expanded.rows[1], row(&["INSERT", "n"]));
        assert_eq!(rewritten, vec!["Action"]);
    }

    #[test]
    fn test_short_row_is_padded_for_override() {
        let mut sheet = Worksheet::new("Rules-Header", header(&["Note", "Action"]));
        sheet.add_row(vec![CellValue::Int(3)]);

        let (expanded, _) = RuleVariantExpander::default().expand_sheet(&sheet);

        assert_eq!(expanded.rows[0], vec![CellValue::Int(3)]);
        assert_eq!(
            expanded.rows[1],
            vec![CellValue::Int(3), CellValue::text("INSERT")]
        );
    }

    #[test]
    fn test_missing_target_sheet() {
        let mut wb = Workbook::new();
        wb.add_sheet(Worksheet::new("PCRF", header(&["A"])));

        let err = RuleVariantExpander::default()
            .expand("book.xlsx", &wb)
            .unwrap_err();

        match err {
            ForgeError::MissingSheet { workbook, sheet } => {
                assert_eq!(workbook, "book.xlsx");
                assert_eq!(sheet, "Rules-Header");
            }
            other => panic!("Expected MissingSheet, got {:?}", other),
        }
    }

    #[test]
    fn test_output_filename() {
        let anchored = RuleVariantExpander::new(Placement::Anchored);
        let leading = RuleVariantExpander::new(Placement::Leading);

        assert_eq!(anchored.output_filename("rules.xlsx"), "rules.xlsx");
        assert_eq!(leading.output_filename("rules.xlsx"), "rules_GIFT.xlsx");
        assert_eq!(leading.output_filename("RULES.XLSX"), "RULES_GIFT.xlsx");
        assert_eq!(leading.output_filename("rules"), "rules_GIFT.xlsx");
    }
}
