//! Swap command handler.

use super::{exit_codes, open_store, OutputFormat};
use crate::config::AppConfig;
use crate::reports::{JsonReporter, SummaryReporter};
use crate::swap::{SwapReconciler, SwapRequest};
use anyhow::Result;

/// Run the swap command: exchange one installed component for one
/// warehouse item.
pub fn run_swap(config: &AppConfig, request: &SwapRequest, format: OutputFormat) -> Result<i32> {
    let store = open_store(config)?;
    let outcome = SwapReconciler::new(&store)
        .with_return_location(config.swap.return_location.clone())
        .swap(request)?;

    let report = match format {
        OutputFormat::Summary => SummaryReporter::new().swap_report(&outcome)?,
        OutputFormat::Json => JsonReporter::new().swap_report(&outcome)?,
    };
    println!("{report}");

    Ok(exit_codes::SUCCESS)
}
