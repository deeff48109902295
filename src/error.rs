//! Unified error types for fleetbom.
//!
//! This module provides the error hierarchy for the library, with rich
//! context for debugging and user-friendly messages. Warnings that
//! accompany a *successful* partial import live in [`crate::import`] and
//! are not errors.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for fleetbom operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum FleetError {
    /// Errors during build report import
    #[error("Failed to import build report: {context}")]
    Import {
        context: String,
        #[source]
        source: ImportErrorKind,
    },

    /// A referenced entity could not be resolved
    #[error("Not found: {0}")]
    NotFound(#[from] NotFoundKind),

    /// The fleet-wide serial partition would be violated
    #[error("Conflict: {0}")]
    Conflict(#[from] ConflictKind),

    /// Errors in the persistence layer
    #[error("Store operation failed: {context}")]
    Store {
        context: String,
        #[source]
        source: StoreErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Tree validation errors (duplicate node ids, malformed structure)
    #[error("Tree validation failed: {0}")]
    Validation(String),
}

/// Specific import error kinds.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ImportErrorKind {
    #[error("build report contains no data rows")]
    EmptyReport,

    #[error("no usable rows remain after validation ({skipped} skipped)")]
    NoUsableRows { skipped: usize },

    #[error("strict mode: {rejected} row(s) rejected, first at sheet row {first_row}")]
    RowsRejected { rejected: usize, first_row: usize },

    #[error("CSV read error at sheet row {row}: {message}")]
    Csv { row: usize, message: String },
}

/// Entities that can fail to resolve during a swap.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum NotFoundKind {
    #[error("engine {0} does not exist")]
    Engine(u64),

    #[error("component {component_id} is not installed on engine {engine_id}")]
    TreeNode { engine_id: u64, component_id: u64 },

    #[error("inventory item {0} does not exist")]
    InventoryItem(u64),
}

/// Fleet-consistency conflicts. Checked before any mutation.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ConflictKind {
    #[error("serial number '{serial}' already tracked on engine {engine_id}")]
    SerialInstalled { serial: String, engine_id: u64 },

    #[error("serial number '{serial}' already present in the inventory ledger")]
    SerialInLedger { serial: String },

    #[error("engine {engine_id} was modified concurrently (expected version {expected}, found {found})")]
    StaleEngine {
        engine_id: u64,
        expected: u64,
        found: u64,
    },
}

/// Specific store error kinds.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum StoreErrorKind {
    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("fleet snapshot at {0} is corrupt: {1}")]
    Corrupt(PathBuf, String),
}

impl FleetError {
    /// Create an import error with context.
    pub fn import(context: impl Into<String>, source: ImportErrorKind) -> Self {
        Self::Import {
            context: context.into(),
            source,
        }
    }

    /// Create a store error with context.
    pub fn store(context: impl Into<String>, source: StoreErrorKind) -> Self {
        Self::Store {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context.
    pub fn io(path: impl Into<PathBuf>, message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: Some(path.into()),
            message: message.into(),
            source,
        }
    }
}

/// Convenience result type used throughout the crate.
pub type Result<T> = std::result::Result<T, FleetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_name_the_entity() {
        let err = FleetError::from(NotFoundKind::Engine(7));
        assert!(err.to_string().contains("engine 7"));

        let err = FleetError::from(ConflictKind::SerialInLedger {
            serial: "SN-9".into(),
        });
        assert!(err.to_string().contains("SN-9"));
    }

    #[test]
    fn import_error_carries_row_context() {
        let err = FleetError::import(
            "fan-report.csv",
            ImportErrorKind::RowsRejected {
                rejected: 2,
                first_row: 4,
            },
        );
        let chain = format!("{err}: {}", std::error::Error::source(&err).unwrap());
        assert!(chain.contains("fan-report.csv"));
        assert!(chain.contains("sheet row 4"));
    }
}
