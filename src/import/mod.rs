//! Build report import.
//!
//! Turns an externally authored spreadsheet extract (the "Build Report")
//! into a validated [`ProductTree`](crate::model::ProductTree). Import is
//! deliberately tolerant of operator-entered data: rows that cannot be used
//! are dropped with a recorded warning rather than failing the whole file,
//! unless strict mode is selected.
//!
//! ## Input shape
//!
//! Row 1 is the header (text not validated), data starts at row 2. Eight
//! columns, order significant:
//!
//! | # | Column |
//! |---|--------------------------|
//! | 1 | assembly name            |
//! | 2 | assembly part number     |
//! | 3 | assembly serial number   |
//! | 4 | part name                |
//! | 5 | part number              |
//! | 6 | part serial number       |
//! | 7 | operating hours          |
//! | 8 | life limit               |
//!
//! Blank or placeholder (`-`, `N/A`) assembly columns mark a standalone
//! leaf part appended directly at the tree root.

mod builder;
mod csv;
mod row;

pub use builder::{ImportOutcome, ImportWarning, SerialSet, TreeBuilder, WarningReason};
pub use row::BuildReportRow;
pub use self::csv::{read_build_report, read_build_report_from_reader};

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How duplicate-serial and malformed rows are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportMode {
    /// Drop bad rows, keep going, report every skip in the outcome.
    #[default]
    SkipAndReport,
    /// Any bad row rejects the whole file; the operator fixes the
    /// spreadsheet and re-uploads.
    Strict,
}

impl std::str::FromStr for ImportMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "skip" | "skip-and-report" => Ok(Self::SkipAndReport),
            "strict" => Ok(Self::Strict),
            other => Err(format!(
                "unknown import mode '{other}' (expected 'skip' or 'strict')"
            )),
        }
    }
}

/// Read and build in one step: the common entry point for callers holding
/// a build report file on disk.
pub fn import_build_report(path: &Path, mode: ImportMode) -> Result<ImportOutcome> {
    let rows = read_build_report(path)?;
    TreeBuilder::new(mode).build(rows)
}
