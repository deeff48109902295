//! Warehouse inventory ledger.
//!
//! The ledger is the other half of the fleet's serial partition: a part is
//! either installed in some engine's tree or listed here, never both.

use super::{is_placeholder_serial, Component};
use crate::error::ConflictKind;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A component that is currently not installed on any engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: u64,
    pub description: String,
    pub part_number: String,
    pub serial_number: String,
    pub location: String,
    /// Hours accrued before the part was removed; informational. A part
    /// inherits the target engine's running total when reinstalled.
    pub current_hours: f64,
    /// `0` means no life limit is tracked for this part.
    pub life_limit: f64,
}

impl InventoryItem {
    /// Build a ledger entry from a component coming off an engine.
    #[must_use]
    pub fn from_removed_component(id: u64, component: &Component, location: impl Into<String>) -> Self {
        Self {
            id,
            description: component.description.clone(),
            part_number: component.part_number.clone(),
            serial_number: component.serial_number.clone(),
            location: location.into(),
            current_hours: component.current_hours,
            life_limit: component.life_limit,
        }
    }
}

/// Flat collection of warehouse items keyed by serial number.
///
/// Iteration order is insertion order (IndexMap), which keeps listings and
/// persisted snapshots deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InventoryLedger {
    items: IndexMap<String, InventoryItem>,
}

impl InventoryLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Insert an item, enforcing the unique-serial constraint.
    ///
    /// Placeholder serials are not keyable and are rejected the same way a
    /// duplicate is: the ledger only holds tracked parts.
    pub fn insert(&mut self, item: InventoryItem) -> Result<(), ConflictKind> {
        if is_placeholder_serial(&item.serial_number) || self.items.contains_key(&item.serial_number)
        {
            return Err(ConflictKind::SerialInLedger {
                serial: item.serial_number,
            });
        }
        self.items.insert(item.serial_number.clone(), item);
        Ok(())
    }

    #[must_use]
    pub fn get_by_serial(&self, serial: &str) -> Option<&InventoryItem> {
        self.items.get(serial)
    }

    #[must_use]
    pub fn get_by_id(&self, id: u64) -> Option<&InventoryItem> {
        self.items.values().find(|item| item.id == id)
    }

    /// Remove an item by its id, returning it if present.
    pub fn remove_by_id(&mut self, id: u64) -> Option<InventoryItem> {
        let serial = self
            .items
            .values()
            .find(|item| item.id == id)
            .map(|item| item.serial_number.clone())?;
        self.items.shift_remove(&serial)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InventoryItem> {
        self.items.values()
    }

    /// Smallest id not used by any ledger entry.
    #[must_use]
    pub fn next_id(&self) -> u64 {
        self.items.values().map(|i| i.id).max().map_or(1, |m| m + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u64, serial: &str) -> InventoryItem {
        InventoryItem {
            id,
            description: "Spare blade".into(),
            part_number: "BL-1".into(),
            serial_number: serial.into(),
            location: "Shelf A3".into(),
            current_hours: 0.0,
            life_limit: 500.0,
        }
    }

    #[test]
    fn insert_rejects_duplicate_serial() {
        let mut ledger = InventoryLedger::new();
        ledger.insert(item(1, "SN-1")).unwrap();
        let err = ledger.insert(item(2, "SN-1")).unwrap_err();
        assert!(matches!(err, ConflictKind::SerialInLedger { .. }));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn insert_rejects_placeholder_serial() {
        let mut ledger = InventoryLedger::new();
        assert!(ledger.insert(item(1, "-")).is_err());
    }

    #[test]
    fn remove_by_id_returns_the_item() {
        let mut ledger = InventoryLedger::new();
        ledger.insert(item(1, "SN-1")).unwrap();
        ledger.insert(item(2, "SN-2")).unwrap();

        let removed = ledger.remove_by_id(1).unwrap();
        assert_eq!(removed.serial_number, "SN-1");
        assert!(ledger.get_by_serial("SN-1").is_none());
        assert_eq!(ledger.len(), 1);
    }
}
