//! Report generation for import, diff, swap and alert results.
//!
//! Two formats: a compact human-readable summary for terminal usage, and
//! JSON for programmatic integration. Heavier rendering (PDF/XLSX exports,
//! dashboards) belongs to external collaborators and is out of scope.

mod json;
mod summary;

pub use json::JsonReporter;
pub use summary::SummaryReporter;

use thiserror::Error;

/// Errors that can occur during report generation.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Format error: {0}")]
    FormatError(#[from] std::fmt::Error),
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}
