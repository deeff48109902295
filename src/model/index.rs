//! Fleet-wide serial index.
//!
//! `FleetIndex` precomputes a serial → location map across every engine's
//! tree and the inventory ledger. Building the index once avoids repeated
//! O(fleet) scans when the swap path checks the serial partition, and it
//! doubles as a consistency audit: any serial found in two places is
//! reported as a collision.

use super::{Engine, InventoryLedger};
use std::collections::HashMap;

/// Where in the fleet a serial number currently lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SerialLocation {
    /// Installed in an engine's product tree.
    Installed { engine_id: u64, component_id: u64 },
    /// Listed in the warehouse ledger.
    Warehouse { item_id: u64 },
}

/// A serial observed in more than one place: a violated partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialCollision {
    pub serial: String,
    pub first: SerialLocation,
    pub second: SerialLocation,
}

/// Precomputed serial → location lookup across the whole fleet.
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct FleetIndex {
    serials: HashMap<String, SerialLocation>,
    collisions: Vec<SerialCollision>,
}

impl FleetIndex {
    /// Build the index from every engine tree plus the ledger.
    ///
    /// Placeholder serials are skipped; they are not subject to the
    /// uniqueness invariant. Collisions do not abort the build; callers
    /// decide whether an inconsistent fleet is fatal for their operation.
    pub fn build<'a>(
        engines: impl IntoIterator<Item = &'a Engine>,
        ledger: &InventoryLedger,
    ) -> Self {
        let mut index = Self::default();

        for engine in engines {
            for component in engine.components.flatten() {
                if !component.has_tracked_serial() {
                    continue;
                }
                index.record(
                    &component.serial_number,
                    SerialLocation::Installed {
                        engine_id: engine.id,
                        component_id: component.id,
                    },
                );
            }
        }

        for item in ledger.iter() {
            index.record(
                &item.serial_number,
                SerialLocation::Warehouse { item_id: item.id },
            );
        }

        if !index.collisions.is_empty() {
            tracing::warn!(
                collision_count = index.collisions.len(),
                "serial partition violated: {} serial(s) tracked in more than one place",
                index.collisions.len()
            );
        }

        index
    }

    fn record(&mut self, serial: &str, location: SerialLocation) {
        match self.serials.get(serial) {
            Some(existing) => self.collisions.push(SerialCollision {
                serial: serial.to_string(),
                first: existing.clone(),
                second: location,
            }),
            None => {
                self.serials.insert(serial.to_string(), location);
            }
        }
    }

    /// Current location of a serial, if tracked anywhere in the fleet.
    #[must_use]
    pub fn location_of(&self, serial: &str) -> Option<&SerialLocation> {
        self.serials.get(serial)
    }

    #[must_use]
    pub fn contains(&self, serial: &str) -> bool {
        self.serials.contains_key(serial)
    }

    /// Serials observed in more than one place during the build.
    #[must_use]
    pub fn collisions(&self) -> &[SerialCollision] {
        &self.collisions
    }

    /// Number of distinct tracked serials.
    #[must_use]
    pub fn serial_count(&self) -> usize {
        self.serials.len()
    }
}
