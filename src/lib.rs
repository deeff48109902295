//! **Engine product-tree maintenance toolkit.**
//!
//! `fleetbom` tracks the maintenance lifecycle of mechanical assemblies
//! (engines) composed of serialized parts arranged in a hierarchy, the
//! Bill-of-Materials "product tree". It rebuilds that tree from externally
//! supplied build reports, detects what changed between two tree
//! snapshots, exchanges installed parts with warehouse items, and walks
//! trees to produce ranked life-limit maintenance alerts. It powers both a
//! command-line interface for direct use and a Rust library for embedding
//! into larger maintenance systems.
//!
//! ## The serial partition
//!
//! One invariant runs through the whole crate: a tracked serial number
//! lives in exactly one of {some engine's tree, the inventory ledger} at
//! any point in time, never both and never neither. The importer enforces it
//! within each batch, the swap reconciler enforces it fleet-wide before
//! any write, and [`model::FleetIndex`] audits it on demand.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: The central data structures: [`model::Component`]
//!   trees owned by [`model::Engine`] records, the
//!   [`model::InventoryLedger`], and the fleet-wide serial index.
//! - **[`import`]**: Parses a build report spreadsheet into a candidate
//!   tree, warning (or, in strict mode, failing) on unusable rows.
//! - **[`diff`]**: The [`diff::TreeDiffer`], classifying every node of a
//!   candidate tree as added, updated, removed or unchanged relative to
//!   the persisted tree.
//! - **[`swap`]**: The [`swap::SwapReconciler`], exchanging one installed
//!   component for one warehouse item atomically.
//! - **[`alerts`]**: The [`alerts::LifeLimitEvaluator`], ranking parts by
//!   hours remaining before their life limit.
//! - **[`store`]**: The [`store::FleetStore`] persistence contract with
//!   in-memory and JSON-file implementations.
//! - **[`reports`]**: Human-readable and JSON summaries of the above.
//!
//! ## Getting Started: Importing a Build Report
//!
//! ```no_run
//! use std::path::Path;
//! use fleetbom::import::{import_build_report, ImportMode};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let outcome = import_build_report(
//!         Path::new("build-report.csv"),
//!         ImportMode::SkipAndReport,
//!     )?;
//!
//!     println!(
//!         "Imported {} part(s), skipped {} row(s).",
//!         outcome.rows_used,
//!         outcome.rows_skipped()
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Diffing Two Snapshots
//!
//! ```
//! use fleetbom::diff::TreeDiffer;
//! use fleetbom::model::{Component, ProductTree};
//!
//! let old = ProductTree::new(vec![Component::leaf(1, "Blade", "BL-1", "SN-A", 10.0, 100.0)]);
//! let new = ProductTree::new(vec![Component::leaf(1, "Blade", "BL-1", "SN-A", 35.0, 100.0)]);
//!
//! let diff = TreeDiffer::new().diff(&old, &new);
//! assert_eq!(diff.summary.updated, 1);
//! ```
//!
//! ## Swapping a Part
//!
//! ```no_run
//! use fleetbom::model::SwapType;
//! use fleetbom::store::JsonFileStore;
//! use fleetbom::swap::{SwapReconciler, SwapRequest};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = JsonFileStore::open("fleet.json")?;
//!     let outcome = SwapReconciler::new(&store).swap(&SwapRequest {
//!         engine_id: 1,
//!         remove_id: 12,
//!         install_id: 3,
//!         swap_type: SwapType::Component,
//!         assembly_group: None,
//!         performed_by: "jdoe".to_string(),
//!     })?;
//!
//!     println!(
//!         "installed {}, removed {}",
//!         outcome.installed_serial, outcome.removed_serial
//!     );
//!     Ok(())
//! }
//! ```

pub mod alerts;
pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod import;
pub mod model;
pub mod reports;
pub mod store;
pub mod swap;

// Convenience re-exports for the common entry points
pub use alerts::LifeLimitEvaluator;
pub use diff::TreeDiffer;
pub use error::{FleetError, Result};
pub use import::import_build_report;
pub use model::{Component, Engine, InventoryItem, ProductTree};
pub use store::{FleetStore, JsonFileStore, MemoryStore};
pub use swap::SwapReconciler;
