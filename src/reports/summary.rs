//! Compact human-readable summaries for shell output.

use super::ReportError;
use crate::alerts::LifeLimitAlert;
use crate::diff::TreeDiff;
use crate::import::ImportOutcome;
use crate::swap::SwapOutcome;
use std::fmt::Write as _;

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

/// Summary reporter for shell output.
pub struct SummaryReporter {
    colored: bool,
}

impl SummaryReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output.
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    /// Change summary shown after an import: counts plus every recorded
    /// row warning.
    pub fn import_report(
        &self,
        outcome: &ImportOutcome,
        diff: &TreeDiff,
    ) -> Result<String, ReportError> {
        let mut out = String::new();

        writeln!(out, "{}", self.color("Build Report Import", "bold"))?;
        writeln!(out, "{}", self.color(&"─".repeat(40), "dim"))?;
        writeln!(
            out,
            "{}  {} read, {} used, {} skipped",
            self.color("Rows:", "cyan"),
            outcome.rows_read,
            outcome.rows_used,
            outcome.rows_skipped()
        )?;
        writeln!(
            out,
            "{}  {} / {} / {} (added/updated/removed), {} unchanged",
            self.color("Changes:", "cyan"),
            self.color(&format!("+{}", diff.summary.added), "green"),
            self.color(&format!("~{}", diff.summary.updated), "yellow"),
            self.color(&format!("-{}", diff.summary.removed), "red"),
            diff.summary.unchanged
        )?;

        if !outcome.warnings.is_empty() {
            writeln!(out)?;
            writeln!(out, "{}", self.color("Warnings:", "yellow"))?;
            for warning in &outcome.warnings {
                writeln!(out, "  {warning}")?;
            }
        }

        Ok(out)
    }

    /// Success message naming the specific parts exchanged.
    pub fn swap_report(&self, outcome: &SwapOutcome) -> Result<String, ReportError> {
        let mut out = String::new();
        writeln!(
            out,
            "{} engine {}: installed {} ({}), removed {} ({})",
            self.color("Swap complete.", "bold"),
            outcome.engine_id,
            self.color(&outcome.installed_serial, "green"),
            outcome.installed_description,
            self.color(&outcome.removed_serial, "red"),
            outcome.removed_description
        )?;
        if outcome.removed_subtree_size > 1 {
            writeln!(
                out,
                "{}",
                self.color(
                    &format!(
                        "{} node(s) left the tree with the removed assembly",
                        outcome.removed_subtree_size
                    ),
                    "dim"
                )
            )?;
        }
        Ok(out)
    }

    /// Ranked alert listing, most urgent first.
    pub fn alerts_report(
        &self,
        alerts: &[LifeLimitAlert],
        threshold: f64,
    ) -> Result<String, ReportError> {
        let mut out = String::new();

        writeln!(out, "{}", self.color("Life-Limit Alerts", "bold"))?;
        writeln!(out, "{}", self.color(&"─".repeat(40), "dim"))?;
        writeln!(
            out,
            "{}  below {threshold} h remaining",
            self.color("Threshold:", "cyan")
        )?;
        writeln!(out)?;

        if alerts.is_empty() {
            writeln!(out, "No components inside the alert threshold.")?;
            return Ok(out);
        }

        for alert in alerts {
            let severity_color = match alert.severity {
                crate::alerts::AlertSeverity::Overdue => "red",
                crate::alerts::AlertSeverity::Critical => "yellow",
                crate::alerts::AlertSeverity::Watch => "cyan",
            };
            writeln!(
                out,
                "{:<10} {} {} on {} — {:.1} h remaining ({:.1}/{:.1})",
                self.color(&alert.severity.to_string(), severity_color),
                alert.description,
                self.color(&alert.serial_number, "bold"),
                alert.engine_name,
                alert.remaining,
                alert.current_hours,
                alert.life_limit
            )?;
        }

        Ok(out)
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::TreeDiffer;
    use crate::import::{ImportMode, TreeBuilder};
    use crate::model::ProductTree;

    fn outcome() -> ImportOutcome {
        use crate::import::BuildReportRow;
        let rows = vec![
            BuildReportRow {
                sheet_row: 2,
                alt_assy_name: "-".into(),
                alt_assy_part_number: "-".into(),
                alt_assy_serial_number: "-".into(),
                part_name: "Blade".into(),
                part_number: "BL-1".into(),
                part_serial_number: "SN-B".into(),
                operating_hours: "10".into(),
                life_limit: "100".into(),
            },
            BuildReportRow {
                sheet_row: 3,
                alt_assy_name: "-".into(),
                alt_assy_part_number: "-".into(),
                alt_assy_serial_number: "-".into(),
                part_name: "Blade".into(),
                part_number: "BL-2".into(),
                part_serial_number: "SN-B".into(),
                operating_hours: "10".into(),
                life_limit: "100".into(),
            },
        ];
        TreeBuilder::new(ImportMode::SkipAndReport).build(rows).unwrap()
    }

    #[test]
    fn import_report_carries_counts_and_warnings() {
        let outcome = outcome();
        let diff = TreeDiffer::new().diff(&ProductTree::default(), &outcome.tree);
        let report = SummaryReporter::new()
            .no_color()
            .import_report(&outcome, &diff)
            .unwrap();

        assert!(report.contains("2 read, 1 used, 1 skipped"));
        assert!(report.contains("+1"));
        assert!(report.contains("row 3"));
    }
}
