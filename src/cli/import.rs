//! Import command handler.

use super::{exit_codes, open_store, OutputFormat};
use crate::config::AppConfig;
use crate::diff::TreeDiffer;
use crate::import::{import_build_report, ImportMode};
use crate::model::{ActivityRecord, ImportActivity};
use crate::reports::{JsonReporter, SummaryReporter};
use crate::store::FleetStore;
use anyhow::Result;
use chrono::Utc;
use std::path::Path;

/// Run the import command: rebuild an engine's tree from a build report.
///
/// The candidate tree fully replaces the persisted one; the diff against
/// the prior tree is informational and shown to the operator.
pub fn run_import(
    config: &AppConfig,
    engine_id: u64,
    report_path: &Path,
    mode: Option<ImportMode>,
    performed_by: &str,
    dry_run: bool,
    format: OutputFormat,
) -> Result<i32> {
    let store = open_store(config)?;
    let mut engine = store.load_engine(engine_id)?;

    let mode = mode.unwrap_or(config.import.mode);
    let outcome = import_build_report(report_path, mode)?;

    tracing::info!(
        engine_id,
        rows_used = outcome.rows_used,
        rows_skipped = outcome.rows_skipped(),
        "build report parsed"
    );

    let diff = TreeDiffer::new().diff(&engine.components, &outcome.tree);

    if !dry_run {
        engine.components = outcome.tree.clone();
        engine.record_activity(ActivityRecord::Import(ImportActivity {
            engine_id,
            added: diff.summary.added,
            updated: diff.summary.updated,
            removed: diff.summary.removed,
            rows_skipped: outcome.rows_skipped(),
            performed_by: performed_by.to_string(),
            timestamp: Utc::now(),
        }));
        store.save_engine(engine)?;
    }

    let report = match format {
        OutputFormat::Summary => SummaryReporter::new().import_report(&outcome, &diff)?,
        OutputFormat::Json => JsonReporter::new().import_report(&outcome, &diff)?,
    };
    println!("{report}");

    if dry_run {
        tracing::info!("dry run: nothing persisted");
    }
    Ok(exit_codes::SUCCESS)
}
