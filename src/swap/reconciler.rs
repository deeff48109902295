//! Swap validation and commit construction.

use super::{SwapOutcome, SwapRequest};
use crate::error::{ConflictKind, FleetError, NotFoundKind, Result};
use crate::model::{
    Component, FleetIndex, InventoryItem, ProductTree, SerialLocation, SwapActivity, SwapType,
};
use crate::store::{FleetStore, SwapCommit};
use chrono::Utc;

/// Default warehouse location for parts coming off an engine.
pub const DEFAULT_RETURN_LOCATION: &str = "Receiving";

/// Orchestrates one swap against a [`FleetStore`].
pub struct SwapReconciler<'a, S: FleetStore> {
    store: &'a S,
    return_location: String,
}

impl<'a, S: FleetStore> SwapReconciler<'a, S> {
    #[must_use]
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            return_location: DEFAULT_RETURN_LOCATION.to_string(),
        }
    }

    /// Warehouse location assigned to removed parts.
    #[must_use]
    pub fn with_return_location(mut self, location: impl Into<String>) -> Self {
        self.return_location = location.into();
        self
    }

    /// Execute a swap. All validation happens before the store applies the
    /// commit; a failure at any step leaves the fleet untouched.
    ///
    /// A `Conflict(StaleEngine)` return means another operation touched
    /// the engine between load and commit; the request can be retried.
    pub fn swap(&self, request: &SwapRequest) -> Result<SwapOutcome> {
        let engine = self.store.load_engine(request.engine_id)?;

        let target = engine
            .components
            .find_by_id(request.remove_id)
            .ok_or(NotFoundKind::TreeNode {
                engine_id: request.engine_id,
                component_id: request.remove_id,
            })?
            .clone();

        let ledger = self.store.load_ledger()?;
        let item = ledger
            .get_by_id(request.install_id)
            .ok_or(NotFoundKind::InventoryItem(request.install_id))?
            .clone();

        if !target.has_tracked_serial() {
            return Err(FleetError::Validation(format!(
                "component {} on engine {} has no tracked serial and cannot return to the ledger",
                target.id, request.engine_id
            )));
        }

        if request.swap_type == SwapType::Component && target.is_assembly() {
            tracing::warn!(
                engine_id = request.engine_id,
                component_id = target.id,
                children = target.children.len(),
                "component-level swap of an assembly node discards its subtree"
            );
        }

        // The installing serial must live nowhere in the fleet except the
        // ledger entry being consumed.
        let engines = self.store.list_engines()?;
        let index = FleetIndex::build(&engines, &ledger);
        match index.location_of(&item.serial_number) {
            Some(SerialLocation::Installed { engine_id, .. }) => {
                return Err(ConflictKind::SerialInstalled {
                    serial: item.serial_number,
                    engine_id: *engine_id,
                }
                .into());
            }
            Some(SerialLocation::Warehouse { item_id }) if *item_id != item.id => {
                return Err(ConflictKind::SerialInLedger {
                    serial: item.serial_number,
                }
                .into());
            }
            _ => {}
        }

        // A newly installed part inherits the engine's running total, it
        // does not start at zero.
        let replacement = Component::leaf(
            engine.components.next_id(),
            item.description.clone(),
            item.part_number.clone(),
            item.serial_number.clone(),
            engine.total_hours,
            item.life_limit,
        );
        let installed_id = replacement.id;

        let mut new_tree: ProductTree = engine.components.clone();
        let replaced = new_tree.replace_by_id(request.remove_id, replacement);
        debug_assert!(replaced, "target node resolved above");

        let removed_subtree_size = 1 + subtree_size(&target);
        let return_item = InventoryItem::from_removed_component(
            ledger.next_id(),
            &target,
            self.return_location.clone(),
        );

        let activity = SwapActivity {
            engine_id: request.engine_id,
            installed_id,
            installed_serial: item.serial_number.clone(),
            removed_id: target.id,
            removed_serial: target.serial_number.clone(),
            swap_type: request.swap_type,
            assembly_group: request.assembly_group.clone(),
            performed_by: request.performed_by.clone(),
            timestamp: Utc::now(),
        };

        self.store.commit_swap(SwapCommit {
            engine_id: request.engine_id,
            expected_version: engine.version,
            new_tree,
            consume_item_id: request.install_id,
            return_item,
            activity,
        })?;

        tracing::info!(
            engine_id = request.engine_id,
            installed = %item.serial_number,
            removed = %target.serial_number,
            swap_type = %request.swap_type,
            "swap committed"
        );

        Ok(SwapOutcome {
            engine_id: request.engine_id,
            swap_type: request.swap_type,
            installed_id,
            installed_serial: item.serial_number,
            installed_description: item.description,
            removed_id: target.id,
            removed_serial: target.serial_number,
            removed_description: target.description,
            removed_subtree_size,
        })
    }
}

fn subtree_size(node: &Component) -> usize {
    node.children
        .iter()
        .map(|c| 1 + subtree_size(c))
        .sum::<usize>()
}
