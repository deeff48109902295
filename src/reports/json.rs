//! JSON report generator for programmatic integration.

use super::ReportError;
use crate::alerts::LifeLimitAlert;
use crate::diff::TreeDiff;
use crate::import::ImportOutcome;
use crate::swap::SwapOutcome;
use serde::Serialize;

/// JSON reporter. Pretty-prints by default; compact on request.
pub struct JsonReporter {
    pretty: bool,
}

impl JsonReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    #[must_use]
    pub const fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }

    fn serialize<T: Serialize>(&self, value: &T) -> Result<String, ReportError> {
        let out = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(out)
    }

    pub fn import_report(
        &self,
        outcome: &ImportOutcome,
        diff: &TreeDiff,
    ) -> Result<String, ReportError> {
        #[derive(Serialize)]
        struct ImportReport<'a> {
            rows_read: usize,
            rows_used: usize,
            rows_skipped: usize,
            warnings: &'a [crate::import::ImportWarning],
            diff: &'a TreeDiff,
        }

        self.serialize(&ImportReport {
            rows_read: outcome.rows_read,
            rows_used: outcome.rows_used,
            rows_skipped: outcome.rows_skipped(),
            warnings: &outcome.warnings,
            diff,
        })
    }

    pub fn swap_report(&self, outcome: &SwapOutcome) -> Result<String, ReportError> {
        self.serialize(outcome)
    }

    pub fn alerts_report(&self, alerts: &[LifeLimitAlert]) -> Result<String, ReportError> {
        self.serialize(&alerts)
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::TreeDiffer;
    use crate::model::{Component, ProductTree};

    #[test]
    fn diff_report_is_valid_json() {
        let old = ProductTree::default();
        let new = ProductTree::new(vec![Component::leaf(1, "Blade", "BL-1", "SN-B", 0.0, 100.0)]);
        let diff = TreeDiffer::new().diff(&old, &new);

        let outcome = crate::import::ImportOutcome {
            tree: new,
            warnings: Vec::new(),
            rows_read: 1,
            rows_used: 1,
        };
        let report = JsonReporter::new().import_report(&outcome, &diff).unwrap();
        let value: serde_json::Value = serde_json::from_str(&report).unwrap();
        assert_eq!(value["diff"]["summary"]["added"], 1);
        assert_eq!(value["rows_skipped"], 0);
    }
}
