//! In-memory fleet store.

use super::{FleetState, FleetStore, SwapCommit};
use crate::error::{ConflictKind, FleetError, NotFoundKind, Result};
use crate::model::{ActivityRecord, Engine, FleetIndex, InventoryItem, InventoryLedger};
use std::sync::Mutex;

/// Fleet store backed by process memory.
///
/// One mutex guards the whole fleet state: commits are atomic and
/// concurrent swaps are serialized by construction. Intended for tests and
/// for embedding the subsystem behind a caller-provided persistence layer.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<FleetState>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut FleetState) -> Result<T>) -> Result<T> {
        let mut state = self.state.lock().expect("fleet state lock poisoned");
        f(&mut state)
    }
}

impl FleetStore for MemoryStore {
    fn list_engines(&self) -> Result<Vec<Engine>> {
        self.with_state(|state| {
            let mut engines = state.engines.clone();
            engines.sort_by_key(|e| e.id);
            Ok(engines)
        })
    }

    fn load_engine(&self, id: u64) -> Result<Engine> {
        self.with_state(|state| load_engine(state, id).map(Clone::clone))
    }

    fn create_engine(&self, name: &str) -> Result<Engine> {
        self.with_state(|state| Ok(create_engine(state, name)))
    }

    fn save_engine(&self, engine: Engine) -> Result<Engine> {
        self.with_state(|state| save_engine(state, engine))
    }

    fn load_ledger(&self) -> Result<InventoryLedger> {
        self.with_state(|state| Ok(state.ledger.clone()))
    }

    fn add_inventory_item(&self, item: InventoryItem) -> Result<InventoryItem> {
        self.with_state(|state| add_inventory_item(state, item))
    }

    fn commit_swap(&self, commit: SwapCommit) -> Result<()> {
        self.with_state(|state| apply_swap(state, commit))
    }
}

// ============================================================================
// Shared state transitions (also used by JsonFileStore)
// ============================================================================

pub(super) fn load_engine(state: &FleetState, id: u64) -> Result<&Engine> {
    state
        .engines
        .iter()
        .find(|e| e.id == id)
        .ok_or_else(|| NotFoundKind::Engine(id).into())
}

pub(super) fn create_engine(state: &mut FleetState, name: &str) -> Engine {
    let id = state.engines.iter().map(|e| e.id).max().map_or(1, |m| m + 1);
    let engine = Engine::new(id, name);
    state.engines.push(engine.clone());
    engine
}

pub(super) fn save_engine(state: &mut FleetState, mut engine: Engine) -> Result<Engine> {
    let stored = state
        .engines
        .iter_mut()
        .find(|e| e.id == engine.id)
        .ok_or(NotFoundKind::Engine(engine.id))?;

    if stored.version != engine.version {
        return Err(ConflictKind::StaleEngine {
            engine_id: engine.id,
            expected: engine.version,
            found: stored.version,
        }
        .into());
    }

    engine.version += 1;
    *stored = engine.clone();
    Ok(engine)
}

pub(super) fn add_inventory_item(
    state: &mut FleetState,
    item: InventoryItem,
) -> Result<InventoryItem> {
    let index = FleetIndex::build(&state.engines, &state.ledger);
    if let Some(location) = index.location_of(&item.serial_number) {
        return Err(match location {
            crate::model::SerialLocation::Installed { engine_id, .. } => {
                ConflictKind::SerialInstalled {
                    serial: item.serial_number,
                    engine_id: *engine_id,
                }
            }
            crate::model::SerialLocation::Warehouse { .. } => ConflictKind::SerialInLedger {
                serial: item.serial_number,
            },
        }
        .into());
    }
    state.ledger.insert(item.clone()).map_err(FleetError::from)?;
    Ok(item)
}

/// Apply a swap commit to a working copy of the state, then publish it.
///
/// The working-copy dance keeps the stored state untouched when any step
/// fails partway through.
pub(super) fn apply_swap(state: &mut FleetState, commit: SwapCommit) -> Result<()> {
    let mut working = state.clone();

    let engine = working
        .engines
        .iter_mut()
        .find(|e| e.id == commit.engine_id)
        .ok_or(NotFoundKind::Engine(commit.engine_id))?;

    if engine.version != commit.expected_version {
        return Err(ConflictKind::StaleEngine {
            engine_id: commit.engine_id,
            expected: commit.expected_version,
            found: engine.version,
        }
        .into());
    }

    engine.components = commit.new_tree;
    engine.record_activity(ActivityRecord::Swap(commit.activity));
    engine.version += 1;

    working
        .ledger
        .remove_by_id(commit.consume_item_id)
        .ok_or(NotFoundKind::InventoryItem(commit.consume_item_id))?;
    working.ledger.insert(commit.return_item)?;

    *state = working;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_engine_enforces_version() {
        let store = MemoryStore::new();
        let engine = store.create_engine("ESN-0001").unwrap();

        let saved = store.save_engine(engine.clone()).unwrap();
        assert_eq!(saved.version, 1);

        // Saving the original (version 0) again must conflict.
        let err = store.save_engine(engine).unwrap_err();
        assert!(matches!(
            err,
            FleetError::Conflict(ConflictKind::StaleEngine { .. })
        ));
    }

    #[test]
    fn add_inventory_item_checks_the_whole_fleet() {
        let store = MemoryStore::new();
        let mut engine = store.create_engine("ESN-0001").unwrap();
        engine.components = crate::model::ProductTree::new(vec![crate::model::Component::leaf(
            1, "Blade", "BL-1", "SN-B", 0.0, 0.0,
        )]);
        store.save_engine(engine).unwrap();

        let item = InventoryItem {
            id: 1,
            description: "Spare".into(),
            part_number: "BL-1".into(),
            serial_number: "SN-B".into(),
            location: "A1".into(),
            current_hours: 0.0,
            life_limit: 0.0,
        };
        let err = store.add_inventory_item(item).unwrap_err();
        assert!(matches!(
            err,
            FleetError::Conflict(ConflictKind::SerialInstalled { engine_id: 1, .. })
        ));
    }
}
