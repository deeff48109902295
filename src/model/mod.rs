//! Intermediate representation for engine product trees.
//!
//! This module defines the canonical data structures shared by the importer,
//! differ, swap reconciler and life-limit evaluator: the owned component
//! tree, the engine aggregate that carries it, the warehouse ledger, and a
//! precomputed fleet-wide serial index.
//!
//! The central invariant protected by this crate is the *serial partition*:
//! a tracked (non-placeholder) serial number lives in exactly one of
//! {some engine's tree, the inventory ledger} at any point in time.
//! The model provides the lookup primitives; enforcement belongs to the
//! importer and the swap path.

mod component;
mod engine;
mod index;
mod inventory;

pub use component::*;
pub use engine::*;
pub use index::*;
pub use inventory::*;
