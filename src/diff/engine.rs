//! Diff computation between two tree snapshots.

use super::result::{ComponentChange, FieldChange, TreeDiff};
use crate::model::{Component, ProductTree};
use std::collections::{HashMap, HashSet};

/// Compares two product trees and classifies every node.
///
/// Matching is by serial number: node ids are snapshot-local and carry no
/// identity across imports. Placeholder serials never match across trees;
/// such nodes always classify as added/removed.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeDiffer;

impl TreeDiffer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Compute the per-node delta from `old` to `new`. O(n) with hash
    /// lookups; no mutation of either tree.
    pub fn diff(&self, old: &ProductTree, new: &ProductTree) -> TreeDiff {
        let old_flat = old.flatten();
        let new_flat = new.flatten();

        let old_by_serial: HashMap<&str, &Component> = old_flat
            .iter()
            .filter(|c| c.has_tracked_serial())
            .map(|c| (c.serial_number.as_str(), *c))
            .collect();

        let mut result = TreeDiff::default();
        let mut matched_serials: HashSet<&str> = HashSet::new();

        for node in &new_flat {
            let prior = if node.has_tracked_serial() {
                old_by_serial.get(node.serial_number.as_str()).copied()
            } else {
                None
            };

            match prior {
                None => result.added.push(ComponentChange::of(node)),
                Some(old_node) => {
                    matched_serials.insert(node.serial_number.as_str());
                    let fields = field_changes(old_node, node);
                    if fields.is_empty() {
                        result.unchanged.push(ComponentChange::of(node));
                    } else {
                        let mut change = ComponentChange::of(node);
                        change.fields = fields;
                        result.updated.push(change);
                    }
                }
            }
        }

        for node in &old_flat {
            let gone = if node.has_tracked_serial() {
                !matched_serials.contains(node.serial_number.as_str())
            } else {
                true
            };
            if gone {
                result.removed.push(ComponentChange::of(node));
            }
        }

        result.calculate_summary();
        tracing::debug!(
            added = result.summary.added,
            updated = result.summary.updated,
            removed = result.summary.removed,
            unchanged = result.summary.unchanged,
            "tree diff computed"
        );
        result
    }
}

fn field_changes(old: &Component, new: &Component) -> Vec<FieldChange> {
    let mut changes = Vec::new();

    if old.description != new.description {
        changes.push(FieldChange {
            field: "description".to_string(),
            old_value: old.description.clone(),
            new_value: new.description.clone(),
        });
    }
    if old.part_number != new.part_number {
        changes.push(FieldChange {
            field: "part_number".to_string(),
            old_value: old.part_number.clone(),
            new_value: new.part_number.clone(),
        });
    }
    if old.current_hours != new.current_hours {
        changes.push(FieldChange {
            field: "current_hours".to_string(),
            old_value: old.current_hours.to_string(),
            new_value: new.current_hours.to_string(),
        });
    }
    if old.life_limit != new.life_limit {
        changes.push(FieldChange {
            field: "life_limit".to_string(),
            old_value: old.life_limit.to_string(),
            new_value: new.life_limit.to_string(),
        });
    }

    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Component;

    fn tree(parts: &[(&str, &str, f64, f64)]) -> ProductTree {
        ProductTree::new(
            parts
                .iter()
                .enumerate()
                .map(|(i, (sn, pn, hours, life))| {
                    Component::leaf(i as u64 + 1, format!("Part {sn}"), *pn, *sn, *hours, *life)
                })
                .collect(),
        )
    }

    #[test]
    fn identical_trees_are_all_unchanged() {
        let a = tree(&[("SN-A", "PN-1", 10.0, 100.0), ("SN-B", "PN-2", 10.0, 0.0)]);
        let diff = TreeDiffer::new().diff(&a, &a.clone());

        assert!(!diff.has_changes());
        assert_eq!(diff.summary.unchanged, 2);
    }

    #[test]
    fn classifies_each_serial_exactly_once() {
        let old = tree(&[("SN-A", "PN-1", 10.0, 100.0), ("SN-B", "PN-2", 10.0, 0.0)]);
        let new = tree(&[("SN-A", "PN-1", 25.0, 100.0), ("SN-C", "PN-3", 0.0, 0.0)]);
        let diff = TreeDiffer::new().diff(&old, &new);

        assert_eq!(diff.summary.added, 1);
        assert_eq!(diff.summary.updated, 1);
        assert_eq!(diff.summary.removed, 1);
        assert_eq!(diff.summary.unchanged, 0);
        assert_eq!(diff.added[0].serial_number, "SN-C");
        assert_eq!(diff.removed[0].serial_number, "SN-B");

        let updated = &diff.updated[0];
        assert_eq!(updated.serial_number, "SN-A");
        assert_eq!(updated.fields.len(), 1);
        assert_eq!(updated.fields[0].field, "current_hours");
    }

    #[test]
    fn assemblies_participate_like_any_node() {
        let mut fan = Component::leaf(1, "Fan", "FN-1", "SN-A", 10.0, 0.0);
        fan.children = vec![Component::leaf(2, "Blade", "BL-1", "SN-B", 10.0, 100.0)];
        let old = ProductTree::new(vec![fan]);

        let mut fan2 = Component::leaf(1, "Fan", "FN-1", "SN-A", 10.0, 0.0);
        fan2.children = vec![Component::leaf(2, "Blade", "BL-1", "SN-X", 10.0, 100.0)];
        let new = ProductTree::new(vec![fan2]);

        let diff = TreeDiffer::new().diff(&old, &new);
        assert_eq!(diff.summary.unchanged, 1); // the fan assembly
        assert_eq!(diff.summary.added, 1);
        assert_eq!(diff.summary.removed, 1);
    }

    #[test]
    fn placeholder_serials_never_match() {
        let old = tree(&[("-", "PN-1", 10.0, 0.0)]);
        let new = tree(&[("-", "PN-1", 10.0, 0.0)]);
        let diff = TreeDiffer::new().diff(&old, &new);

        assert_eq!(diff.summary.added, 1);
        assert_eq!(diff.summary.removed, 1);
        assert_eq!(diff.summary.unchanged, 0);
    }
}
