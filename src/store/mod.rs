//! Persistence boundary.
//!
//! The subsystem treats persistence as an external collaborator that can
//! load and save engine records (nested JSON trees) and a flat inventory
//! ledger. [`FleetStore`] is that collaborator's contract, with one
//! addition the swap path depends on: [`FleetStore::commit_swap`] applies
//! the tree write, both ledger writes and the audit append as a single
//! atomic step, guarded by an optimistic engine-version check.
//!
//! Two implementations ship: [`MemoryStore`] (tests, embedding) and
//! [`JsonFileStore`] (CLI; one JSON snapshot file per fleet).

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use crate::error::Result;
use crate::model::{Engine, InventoryItem, InventoryLedger, ProductTree, SwapActivity};
use serde::{Deserialize, Serialize};

/// Everything a swap writes, bundled for atomic application.
///
/// Computed in full by the reconciler before the store sees it; the store
/// either applies every part or none.
#[derive(Debug, Clone)]
#[must_use]
pub struct SwapCommit {
    pub engine_id: u64,
    /// Engine version the commit was computed against.
    pub expected_version: u64,
    /// The engine's tree after the replacement.
    pub new_tree: ProductTree,
    /// Ledger item consumed by the installation.
    pub consume_item_id: u64,
    /// The removed part, returning to the warehouse under its own identity.
    pub return_item: InventoryItem,
    /// Audit record appended to the engine's activity log.
    pub activity: SwapActivity,
}

/// Serializable whole-fleet state shared by the built-in stores.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct FleetState {
    pub engines: Vec<Engine>,
    pub ledger: InventoryLedger,
}

/// Load/save contract between this subsystem and persistence.
pub trait FleetStore {
    /// All engines, in stable id order.
    fn list_engines(&self) -> Result<Vec<Engine>>;

    /// Load one engine record. Fails with `NotFound` if absent.
    fn load_engine(&self, id: u64) -> Result<Engine>;

    /// Create a new engine with an empty tree, returning it.
    fn create_engine(&self, name: &str) -> Result<Engine>;

    /// Persist an engine record wholesale (the import path's full-tree
    /// read-modify-write). The engine's `version` must match the stored
    /// one; the store bumps it on success.
    fn save_engine(&self, engine: Engine) -> Result<Engine>;

    /// Snapshot of the inventory ledger.
    fn load_ledger(&self) -> Result<InventoryLedger>;

    /// Add a warehouse item, enforcing the unique-serial constraint
    /// against the whole fleet.
    fn add_inventory_item(&self, item: InventoryItem) -> Result<InventoryItem>;

    /// Apply a swap atomically: replace the tree, exchange the two ledger
    /// entries, append the audit record, bump the engine version.
    ///
    /// Fails with `Conflict(StaleEngine)` when the engine changed since
    /// the commit was computed; nothing is applied in that case.
    fn commit_swap(&self, commit: SwapCommit) -> Result<()>;
}
