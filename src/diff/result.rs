//! Diff result structures.

use crate::model::Component;
use serde::Serialize;

/// A single field that differs between two snapshots of the same serial.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldChange {
    pub field: String,
    pub old_value: String,
    pub new_value: String,
}

/// One node's classification relative to the prior tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentChange {
    pub serial_number: String,
    pub part_number: String,
    pub description: String,
    /// Field-level detail; populated for updated nodes only.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldChange>,
}

impl ComponentChange {
    pub(crate) fn of(component: &Component) -> Self {
        Self {
            serial_number: component.serial_number.clone(),
            part_number: component.part_number.clone(),
            description: component.description.clone(),
            fields: Vec::new(),
        }
    }
}

/// Count summary over a [`TreeDiff`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffSummary {
    pub added: usize,
    pub updated: usize,
    pub removed: usize,
    pub unchanged: usize,
}

impl DiffSummary {
    #[must_use]
    pub fn total_changes(&self) -> usize {
        self.added + self.updated + self.removed
    }
}

/// Complete result of diffing two tree snapshots.
///
/// Every serial present in either snapshot is classified into exactly one
/// group. Group ordering is traversal insertion order and carries no
/// meaning.
#[derive(Debug, Clone, Default, Serialize)]
#[must_use]
pub struct TreeDiff {
    pub added: Vec<ComponentChange>,
    pub updated: Vec<ComponentChange>,
    pub removed: Vec<ComponentChange>,
    pub unchanged: Vec<ComponentChange>,
    pub summary: DiffSummary,
}

impl TreeDiff {
    /// Recompute the count summary from the groups.
    pub fn calculate_summary(&mut self) {
        self.summary = DiffSummary {
            added: self.added.len(),
            updated: self.updated.len(),
            removed: self.removed.len(),
            unchanged: self.unchanged.len(),
        };
    }

    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.summary.total_changes() > 0
    }
}
