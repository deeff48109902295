//! Swap reconciliation.
//!
//! Exchanges one installed component for one warehouse item while keeping
//! the fleet-wide serial partition intact. The reconciler itself is pure:
//! it validates everything up front, computes a [`SwapCommit`] describing
//! all three writes (tree, ledger, audit log), and hands it to the store
//! for atomic application.
//!
//! [`SwapCommit`]: crate::store::SwapCommit

mod reconciler;

pub use reconciler::{SwapReconciler, DEFAULT_RETURN_LOCATION};

use crate::model::SwapType;
use serde::{Deserialize, Serialize};

/// A request to exchange one installed node for one warehouse item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapRequest {
    pub engine_id: u64,
    /// Snapshot-local id of the node to remove from the engine's tree.
    pub remove_id: u64,
    /// Ledger id of the inventory item to install.
    pub install_id: u64,
    pub swap_type: SwapType,
    /// Tag shared by the swaps of one bulk/assembly-level operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assembly_group: Option<String>,
    pub performed_by: String,
}

/// What a completed swap exchanged, for the user-visible success message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[must_use]
pub struct SwapOutcome {
    pub engine_id: u64,
    pub swap_type: SwapType,
    pub installed_id: u64,
    pub installed_serial: String,
    pub installed_description: String,
    pub removed_id: u64,
    pub removed_serial: String,
    pub removed_description: String,
    /// Nodes that left the tree with the removed subtree (assembly swaps).
    pub removed_subtree_size: usize,
}
