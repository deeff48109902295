//! Diff command handler.

use super::{exit_codes, open_store, OutputFormat};
use crate::config::AppConfig;
use crate::diff::TreeDiffer;
use crate::import::{import_build_report, ImportMode};
use crate::reports::{JsonReporter, SummaryReporter};
use crate::store::FleetStore;
use anyhow::Result;
use std::path::Path;

/// Run the diff command: compare an engine's persisted tree against a
/// build report without persisting anything.
pub fn run_diff(
    config: &AppConfig,
    engine_id: u64,
    report_path: &Path,
    mode: Option<ImportMode>,
    format: OutputFormat,
) -> Result<i32> {
    let store = open_store(config)?;
    let engine = store.load_engine(engine_id)?;

    let mode = mode.unwrap_or(config.import.mode);
    let outcome = import_build_report(report_path, mode)?;
    let diff = TreeDiffer::new().diff(&engine.components, &outcome.tree);

    let report = match format {
        OutputFormat::Summary => SummaryReporter::new().import_report(&outcome, &diff)?,
        OutputFormat::Json => JsonReporter::new().import_report(&outcome, &diff)?,
    };
    println!("{report}");

    if diff.has_changes() {
        Ok(exit_codes::FINDINGS)
    } else {
        Ok(exit_codes::SUCCESS)
    }
}
