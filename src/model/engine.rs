//! Engine aggregate: the product tree plus scalar state and audit trail.

use super::ProductTree;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Operational status of an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineStatus {
    #[default]
    Active,
    Maintenance,
    Retired,
}

impl std::fmt::Display for EngineStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Maintenance => write!(f, "maintenance"),
            Self::Retired => write!(f, "retired"),
        }
    }
}

/// Granularity of a swap operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwapType {
    /// Exchange a single leaf part.
    Component,
    /// Exchange a whole assembly subtree; everything under the removed
    /// assembly leaves the fleet-tracked tree with it.
    Assembly,
}

impl std::fmt::Display for SwapType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Component => write!(f, "component"),
            Self::Assembly => write!(f, "assembly"),
        }
    }
}

/// Audit record for one completed swap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapActivity {
    pub engine_id: u64,
    pub installed_id: u64,
    pub installed_serial: String,
    pub removed_id: u64,
    pub removed_serial: String,
    pub swap_type: SwapType,
    /// Set for bulk/assembly-level swaps performed as one group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assembly_group: Option<String>,
    pub performed_by: String,
    pub timestamp: DateTime<Utc>,
}

/// Audit record for one build report import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportActivity {
    pub engine_id: u64,
    pub added: usize,
    pub updated: usize,
    pub removed: usize,
    pub rows_skipped: usize,
    pub performed_by: String,
    pub timestamp: DateTime<Utc>,
}

/// One entry of the append-only activity log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActivityRecord {
    Swap(SwapActivity),
    Import(ImportActivity),
}

/// One engine and everything persisted about it.
///
/// Created administratively; `components` is mutated only by the importer
/// (wholesale replace) or the swap reconciler (single-node replace).
/// Engines are never deleted by this subsystem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Engine {
    pub id: u64,
    pub name: String,
    pub total_hours: f64,
    pub total_cycles: u64,
    #[serde(default)]
    pub status: EngineStatus,
    #[serde(default)]
    pub components: ProductTree,
    #[serde(default)]
    pub activity_log: Vec<ActivityRecord>,
    /// Optimistic concurrency token; bumped by the store on every commit.
    #[serde(default)]
    pub version: u64,
}

impl Engine {
    /// Create a new engine with an empty tree.
    #[must_use]
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            total_hours: 0.0,
            total_cycles: 0,
            status: EngineStatus::default(),
            components: ProductTree::default(),
            activity_log: Vec::new(),
            version: 0,
        }
    }

    /// Append to the audit trail. The log is append-only; nothing in this
    /// subsystem removes or rewrites entries.
    pub fn record_activity(&mut self, record: ActivityRecord) {
        self.activity_log.push(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_log_round_trips_through_json() {
        let mut engine = Engine::new(1, "ESN-0001");
        engine.record_activity(ActivityRecord::Swap(SwapActivity {
            engine_id: 1,
            installed_id: 7,
            installed_serial: "SN-NEW".into(),
            removed_id: 3,
            removed_serial: "SN-OLD".into(),
            swap_type: SwapType::Component,
            assembly_group: None,
            performed_by: "jdoe".into(),
            timestamp: Utc::now(),
        }));

        let json = serde_json::to_string(&engine).unwrap();
        let back: Engine = serde_json::from_str(&json).unwrap();
        assert_eq!(back, engine);
        assert!(json.contains("\"kind\":\"swap\""));
    }
}
