//! JSON-file fleet store.

use super::memory::{add_inventory_item, apply_swap, create_engine, load_engine, save_engine};
use super::{FleetState, FleetStore, SwapCommit};
use crate::error::{FleetError, Result, StoreErrorKind};
use crate::model::{Engine, InventoryItem, InventoryLedger};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Fleet store persisted as a single JSON snapshot file.
///
/// Every mutation rewrites the whole snapshot to a temporary file and
/// renames it over the original, so a crash mid-write never leaves a torn
/// fleet on disk. The file is read once at open and cached; the process
/// holding the store owns the file for its lifetime.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    state: Mutex<FleetState>,
}

impl JsonFileStore {
    /// Open an existing snapshot, or start an empty fleet if the file does
    /// not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let state = if path.exists() {
            let data = std::fs::read_to_string(&path)
                .map_err(|e| FleetError::io(&path, "failed to read fleet snapshot", e))?;
            serde_json::from_str(&data).map_err(|e| {
                FleetError::store(
                    path.display().to_string(),
                    StoreErrorKind::Corrupt(path.clone(), e.to_string()),
                )
            })?
        } else {
            tracing::info!(path = %path.display(), "starting a new fleet snapshot");
            FleetState::default()
        };

        Ok(Self {
            path,
            state: Mutex::new(state),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, state: &FleetState) -> Result<()> {
        let data = serde_json::to_string_pretty(state).map_err(|e| {
            FleetError::store(
                self.path.display().to_string(),
                StoreErrorKind::Serialization(e.to_string()),
            )
        })?;

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, data)
            .map_err(|e| FleetError::io(&tmp, "failed to write fleet snapshot", e))?;
        std::fs::rename(&tmp, &self.path)
            .map_err(|e| FleetError::io(&self.path, "failed to replace fleet snapshot", e))?;
        Ok(())
    }

    /// Run a mutation against a working copy and persist before publishing:
    /// the in-memory state only advances once the snapshot is on disk.
    fn mutate<T>(&self, f: impl FnOnce(&mut FleetState) -> Result<T>) -> Result<T> {
        let mut state = self.state.lock().expect("fleet state lock poisoned");
        let mut working = state.clone();
        let out = f(&mut working)?;
        self.persist(&working)?;
        *state = working;
        Ok(out)
    }

    fn read<T>(&self, f: impl FnOnce(&FleetState) -> Result<T>) -> Result<T> {
        let state = self.state.lock().expect("fleet state lock poisoned");
        f(&state)
    }
}

impl FleetStore for JsonFileStore {
    fn list_engines(&self) -> Result<Vec<Engine>> {
        self.read(|state| {
            let mut engines = state.engines.clone();
            engines.sort_by_key(|e| e.id);
            Ok(engines)
        })
    }

    fn load_engine(&self, id: u64) -> Result<Engine> {
        self.read(|state| load_engine(state, id).map(Clone::clone))
    }

    fn create_engine(&self, name: &str) -> Result<Engine> {
        self.mutate(|state| Ok(create_engine(state, name)))
    }

    fn save_engine(&self, engine: Engine) -> Result<Engine> {
        self.mutate(|state| save_engine(state, engine))
    }

    fn load_ledger(&self) -> Result<InventoryLedger> {
        self.read(|state| Ok(state.ledger.clone()))
    }

    fn add_inventory_item(&self, item: InventoryItem) -> Result<InventoryItem> {
        self.mutate(|state| add_inventory_item(state, item))
    }

    fn commit_swap(&self, commit: SwapCommit) -> Result<()> {
        self.mutate(|state| apply_swap(state, commit))
    }
}
