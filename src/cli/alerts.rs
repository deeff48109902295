//! Alerts command handler.

use super::{exit_codes, open_store, OutputFormat};
use crate::alerts::LifeLimitEvaluator;
use crate::config::AppConfig;
use crate::reports::{JsonReporter, SummaryReporter};
use crate::store::FleetStore;
use anyhow::Result;

/// Run the alerts command: rank life-limited parts across the fleet, or
/// one engine when a filter is given.
pub fn run_alerts(
    config: &AppConfig,
    engine_filter: Option<u64>,
    threshold: Option<f64>,
    format: OutputFormat,
) -> Result<i32> {
    let store = open_store(config)?;
    let engines = match engine_filter {
        Some(id) => vec![store.load_engine(id)?],
        None => store.list_engines()?,
    };

    let evaluator = LifeLimitEvaluator::new(threshold.unwrap_or(config.alerts.threshold));
    let alerts = evaluator.evaluate_fleet(&engines)?;

    let report = match format {
        OutputFormat::Summary => {
            SummaryReporter::new().alerts_report(&alerts, evaluator.threshold())?
        }
        OutputFormat::Json => JsonReporter::new().alerts_report(&alerts)?,
    };
    println!("{report}");

    if alerts.is_empty() {
        Ok(exit_codes::SUCCESS)
    } else {
        Ok(exit_codes::FINDINGS)
    }
}
