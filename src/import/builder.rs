//! Candidate tree construction from build report rows.

use super::row::{parse_hours, BuildReportRow};
use super::ImportMode;
use crate::error::{FleetError, ImportErrorKind, Result};
use crate::model::{is_placeholder_serial, Component, ProductTree};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashSet;

/// Why a row was dropped during import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum WarningReason {
    /// A mandatory part column was blank.
    MissingField { field: String },
    /// The row reuses a serial already claimed earlier in the batch,
    /// either as an assembly identity or as a part identity.
    DuplicateSerial { serial: String },
}

impl std::fmt::Display for WarningReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { field } => write!(f, "missing {field}"),
            Self::DuplicateSerial { serial } => {
                write!(f, "serial '{serial}' already used earlier in this report")
            }
        }
    }
}

/// One recorded row skip. Accumulated and returned with the outcome,
/// never silently dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportWarning {
    /// 1-indexed against the original sheet (header is row 1).
    pub sheet_row: usize,
    #[serde(flatten)]
    pub reason: WarningReason,
}

impl std::fmt::Display for ImportWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "row {}: {}", self.sheet_row, self.reason)
    }
}

/// Result of a successful (possibly partial) import.
#[derive(Debug, Clone)]
#[must_use]
pub struct ImportOutcome {
    pub tree: ProductTree,
    pub warnings: Vec<ImportWarning>,
    /// Data rows read from the sheet.
    pub rows_read: usize,
    /// Rows that produced a part node.
    pub rows_used: usize,
}

impl ImportOutcome {
    #[must_use]
    pub fn rows_skipped(&self) -> usize {
        self.rows_read - self.rows_used
    }
}

/// Batch-scoped duplicate-serial accumulator.
///
/// Lives for exactly one import call; replaces the ambient "seen serials"
/// state a naive recursive importer would thread through globals.
#[derive(Debug, Default)]
pub struct SerialSet {
    seen: HashSet<String>,
}

impl SerialSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim a serial for this batch. First claim wins; placeholder serials
    /// are unlimited and always claimable.
    pub fn claim(&mut self, serial: &str) -> bool {
        if is_placeholder_serial(serial) {
            return true;
        }
        self.seen.insert(serial.trim().to_string())
    }

    #[must_use]
    pub fn contains(&self, serial: &str) -> bool {
        !is_placeholder_serial(serial) && self.seen.contains(serial.trim())
    }
}

/// Builds a candidate [`ProductTree`] from build report rows.
pub struct TreeBuilder {
    mode: ImportMode,
}

impl TreeBuilder {
    #[must_use]
    pub fn new(mode: ImportMode) -> Self {
        Self { mode }
    }

    /// Run the import.
    ///
    /// Fails with [`ImportErrorKind::EmptyReport`] when the sheet has no
    /// data rows, [`ImportErrorKind::NoUsableRows`] when validation drops
    /// everything, and [`ImportErrorKind::RowsRejected`] in strict mode
    /// when any row would be skipped.
    pub fn build(&self, rows: Vec<BuildReportRow>) -> Result<ImportOutcome> {
        if rows.is_empty() {
            return Err(FleetError::import(
                "build report",
                ImportErrorKind::EmptyReport,
            ));
        }

        let rows_read = rows.len();
        let mut warnings = Vec::new();
        let mut serials = SerialSet::new();
        let mut roots: Vec<Component> = Vec::new();
        // assembly key -> index into `roots`
        let mut assemblies: IndexMap<String, usize> = IndexMap::new();
        let mut next_id: u64 = 1;
        let mut rows_used = 0;

        for row in rows {
            if let Some(field) = row.missing_field() {
                warnings.push(ImportWarning {
                    sheet_row: row.sheet_row,
                    reason: WarningReason::MissingField {
                        field: field.to_string(),
                    },
                });
                continue;
            }

            // Resolve the parent before claiming serials: rows of an
            // already-seen assembly legitimately repeat its serial.
            let parent = if row.has_assembly() {
                let key = row.assembly_key();
                match assemblies.get(&key) {
                    Some(&idx) => Some(idx),
                    None => {
                        let assy_serial = row.alt_assy_serial_number.trim();
                        if !serials.claim(assy_serial) {
                            warnings.push(ImportWarning {
                                sheet_row: row.sheet_row,
                                reason: WarningReason::DuplicateSerial {
                                    serial: assy_serial.to_string(),
                                },
                            });
                            continue;
                        }
                        // First-seen row seeds the assembly's hours;
                        // assemblies are never life-limited themselves.
                        let assembly = Component::leaf(
                            next_id,
                            row.alt_assy_name.trim(),
                            row.alt_assy_part_number.trim(),
                            assy_serial,
                            parse_hours(&row.operating_hours),
                            0.0,
                        );
                        next_id += 1;
                        roots.push(assembly);
                        let idx = roots.len() - 1;
                        assemblies.insert(key, idx);
                        Some(idx)
                    }
                }
            } else {
                None
            };

            let part_serial = row.part_serial_number.trim();
            if !serials.claim(part_serial) {
                warnings.push(ImportWarning {
                    sheet_row: row.sheet_row,
                    reason: WarningReason::DuplicateSerial {
                        serial: part_serial.to_string(),
                    },
                });
                continue;
            }

            let part = Component::leaf(
                next_id,
                row.part_name.trim(),
                row.part_number.trim(),
                part_serial,
                parse_hours(&row.operating_hours),
                parse_hours(&row.life_limit),
            );
            next_id += 1;

            match parent {
                Some(idx) => roots[idx].children.push(part),
                None => roots.push(part),
            }
            rows_used += 1;
        }

        for warning in &warnings {
            tracing::warn!(sheet_row = warning.sheet_row, "{warning}");
        }

        if self.mode == ImportMode::Strict && !warnings.is_empty() {
            return Err(FleetError::import(
                "build report",
                ImportErrorKind::RowsRejected {
                    rejected: warnings.len(),
                    first_row: warnings[0].sheet_row,
                },
            ));
        }

        if rows_used == 0 {
            return Err(FleetError::import(
                "build report",
                ImportErrorKind::NoUsableRows {
                    skipped: warnings.len(),
                },
            ));
        }

        Ok(ImportOutcome {
            tree: ProductTree::new(roots),
            warnings,
            rows_read,
            rows_used,
        })
    }
}
