//! Tree diffing.
//!
//! Computes the delta between the tree currently persisted for an engine
//! and a freshly imported candidate tree. The result is informational: it
//! drives the change summary shown to the operator. Import always replaces
//! the persisted tree wholesale regardless of the diff.

mod engine;
mod result;

pub use engine::TreeDiffer;
pub use result::{ComponentChange, DiffSummary, FieldChange, TreeDiff};
