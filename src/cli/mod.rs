//! CLI command handlers.
//!
//! This module provides testable command handlers invoked by main.rs.
//! Each handler implements the business logic for one subcommand and
//! returns the process exit code; main.rs owns argument parsing and
//! process exit.

mod admin;
mod alerts;
mod diff;
mod import;
mod swap;
mod view;

pub use admin::{run_engine_add, run_engine_list, run_inventory_add, run_inventory_list};
pub use alerts::run_alerts;
pub use diff::run_diff;
pub use import::run_import;
pub use swap::run_swap;
pub use view::run_view;

use crate::config::AppConfig;
use crate::store::JsonFileStore;
use anyhow::Result;
use clap::ValueEnum;

/// Exit codes for scripting and CI integration.
pub mod exit_codes {
    /// Success; for `diff` and `alerts`, additionally "nothing to report".
    pub const SUCCESS: i32 = 0;
    /// Changes detected / alerts present.
    pub const FINDINGS: i32 = 1;
    /// An error occurred.
    pub const ERROR: i32 = 3;
}

/// Output format selector shared by the handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Compact human-readable summary.
    #[default]
    Summary,
    /// Pretty-printed JSON.
    Json,
}

/// Open the fleet snapshot named by the config.
pub(crate) fn open_store(config: &AppConfig) -> Result<JsonFileStore> {
    Ok(JsonFileStore::open(&config.store.path)?)
}
