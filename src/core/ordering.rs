//! Output sheet ordering
//!
//! Decides where the expanded Rules-Header sheet lands relative to its
//! neighbours. Pure over sheet names so it can be tested without any
//! spreadsheet I/O.

use crate::types::Placement;

/// Sheet the expander operates on
pub const TARGET_SHEET: &str = "Rules-Header";

/// The target is written immediately before this sheet
pub const BEFORE_ANCHOR: &str = "PCRF";

/// The target is written immediately after this sheet
pub const AFTER_ANCHOR: &str = "Rules-Alias";

/// Target sheet name plus the two anchors used for placement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetAnchors {
    pub target: String,
    pub before: String,
    pub after: String,
}

impl Default for SheetAnchors {
    fn default() -> Self {
        Self {
            target: TARGET_SHEET.to_string(),
            before: BEFORE_ANCHOR.to_string(),
            after: AFTER_ANCHOR.to_string(),
        }
    }
}

impl SheetAnchors {
    /// Build the output sheet order from the input order.
    ///
    /// The target appears exactly once in the result, whether or not it was
    /// present in `names`. Every other name keeps its relative order.
    pub fn plan<S: AsRef<str>>(&self, names: &[S], placement: Placement) -> Vec<String> {
        match placement {
            Placement::Anchored => self.plan_anchored(names),
            Placement::Leading => self.plan_leading(names),
        }
    }

    fn plan_anchored<S: AsRef<str>>(&self, names: &[S]) -> Vec<String> {
        let mut order: Vec<String> = Vec::with_capacity(names.len() + 1);
        let mut placed = false;

        for name in names.iter().map(AsRef::as_ref) {
            if name == self.target {
                continue;
            }

            if name == self.after {
                order.push(name.to_string());
                if !placed {
                    order.push(self.target.clone());
                    placed = true;
                }
            } else if name == self.before && !placed {
                order.push(self.target.clone());
                order.push(name.to_string());
                placed = true;
            } else {
                order.push(name.to_string());
            }
        }

        // Neither anchor present
        if !placed {
            order.push(self.target.clone());
        }

        order
    }

    fn plan_leading<S: AsRef<str>>(&self, names: &[S]) -> Vec<String> {
        std::iter::once(self.target.clone())
            .chain(
                names
                    .iter()
                    .map(AsRef::as_ref)
                    .filter(|name| *name != self.target)
                    .map(str::to_string),
            )
            .collect()
    }
}

/// Plan with the fixed Rules-Header / PCRF / Rules-Alias names
pub fn plan_sheet_order<S: AsRef<str>>(names: &[S], placement: Placement) -> Vec<String> {
    SheetAnchors::default().plan(names, placement)
}
