//! Component tree data structures and traversal primitives.

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

/// Serial values that mean "not tracked" in operator-entered data.
const PLACEHOLDER_SERIALS: &[&str] = &["", "-", "n/a"];

/// Check whether a serial number is a placeholder.
///
/// Placeholder serials are exempt from the fleet-wide uniqueness invariant
/// and never match across tree snapshots.
#[must_use]
pub fn is_placeholder_serial(serial: &str) -> bool {
    let trimmed = serial.trim();
    PLACEHOLDER_SERIALS
        .iter()
        .any(|p| trimmed.eq_ignore_ascii_case(p))
}

/// Structural role of a node, derived from children-presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComponentKind {
    /// Has child parts; carries no life limit of its own.
    Assembly,
    /// Leaf part; may be life-limited.
    Part,
}

/// One node in an engine's product tree.
///
/// A node with a non-empty `children` sequence is an assembly; a node
/// without one is a leaf part. Children are owned exclusively by their
/// parent (strict tree, no sharing, no cycles).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Unique within one tree snapshot; not stable across re-imports.
    pub id: u64,
    pub description: String,
    pub part_number: String,
    pub serial_number: String,
    /// Synchronized to the owning engine's `total_hours` while installed.
    pub current_hours: f64,
    /// `0` means no life limit is tracked for this part.
    pub life_limit: f64,
    #[serde(default)]
    pub children: Vec<Component>,
}

impl Component {
    /// Create a leaf part with no children.
    #[must_use]
    pub fn leaf(
        id: u64,
        description: impl Into<String>,
        part_number: impl Into<String>,
        serial_number: impl Into<String>,
        current_hours: f64,
        life_limit: f64,
    ) -> Self {
        Self {
            id,
            description: description.into(),
            part_number: part_number.into(),
            serial_number: serial_number.into(),
            current_hours,
            life_limit,
            children: Vec::new(),
        }
    }

    /// Structural role of this node.
    #[must_use]
    pub fn kind(&self) -> ComponentKind {
        if self.children.is_empty() {
            ComponentKind::Part
        } else {
            ComponentKind::Assembly
        }
    }

    #[must_use]
    pub fn is_assembly(&self) -> bool {
        self.kind() == ComponentKind::Assembly
    }

    /// Whether this node participates in life-limit evaluation.
    #[must_use]
    pub fn is_life_limited(&self) -> bool {
        self.life_limit > 0.0
    }

    /// Whether this node's serial is subject to the uniqueness invariant.
    #[must_use]
    pub fn has_tracked_serial(&self) -> bool {
        !is_placeholder_serial(&self.serial_number)
    }
}

/// An engine's product tree: the owned sequence of root components.
///
/// Serializes transparently as a JSON array, which is the shape the
/// persisted engine record stores under its `components` field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductTree {
    pub roots: Vec<Component>,
}

impl ProductTree {
    #[must_use]
    pub fn new(roots: Vec<Component>) -> Self {
        Self { roots }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Pre-order traversal producing every node (assemblies and leaves)
    /// exactly once. Order is deterministic: parents before children,
    /// siblings in their stored order.
    #[must_use]
    pub fn flatten(&self) -> Vec<&Component> {
        let mut out = Vec::new();
        for root in &self.roots {
            flatten_into(root, &mut out);
        }
        out
    }

    /// Total node count, assemblies included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.flatten().len()
    }

    /// Depth-first search by snapshot-local id. Ids are unique per
    /// snapshot, so the first match is the only match.
    #[must_use]
    pub fn find_by_id(&self, id: u64) -> Option<&Component> {
        self.roots.iter().find_map(|root| find_id(root, id))
    }

    /// Depth-first search by serial number (exact match).
    #[must_use]
    pub fn find_by_serial(&self, serial: &str) -> Option<&Component> {
        self.roots.iter().find_map(|root| find_serial(root, serial))
    }

    /// Substitute the node matching `id` with `replacement`, keeping the
    /// same position among its siblings and the same parent.
    ///
    /// This is a full subtree swap: the children of the removed node are
    /// discarded along with it, never merged into the replacement. Returns
    /// `false` (tree untouched) when no node matches.
    pub fn replace_by_id(&mut self, id: u64, replacement: Component) -> bool {
        let mut slot = Some(replacement);
        replace_in(&mut self.roots, id, &mut slot)
    }

    /// Smallest id not used by any node in this snapshot.
    #[must_use]
    pub fn next_id(&self) -> u64 {
        self.flatten().iter().map(|c| c.id).max().map_or(1, |m| m + 1)
    }

    /// Check structural well-formedness: every id unique within the
    /// snapshot. Returns the first duplicated id found.
    pub fn validate(&self) -> Result<(), u64> {
        let mut seen = std::collections::HashSet::new();
        for node in self.flatten() {
            if !seen.insert(node.id) {
                return Err(node.id);
            }
        }
        Ok(())
    }

    /// Content hash over the deterministic flattening, for cheap snapshot
    /// equality checks. Node ids are excluded: two re-imports of the same
    /// sheet hash identically even though ids are reassigned.
    #[must_use]
    pub fn content_hash(&self) -> u64 {
        let mut input = Vec::new();
        for (depth, node) in flatten_with_depth(&self.roots) {
            input.extend((depth as u32).to_le_bytes());
            input.extend(node.description.as_bytes());
            input.push(0);
            input.extend(node.part_number.as_bytes());
            input.push(0);
            input.extend(node.serial_number.as_bytes());
            input.push(0);
            input.extend(node.current_hours.to_le_bytes());
            input.extend(node.life_limit.to_le_bytes());
        }
        xxh3_64(&input)
    }
}

fn flatten_into<'a>(node: &'a Component, out: &mut Vec<&'a Component>) {
    out.push(node);
    for child in &node.children {
        flatten_into(child, out);
    }
}

fn flatten_with_depth(roots: &[Component]) -> Vec<(usize, &Component)> {
    fn walk<'a>(node: &'a Component, depth: usize, out: &mut Vec<(usize, &'a Component)>) {
        out.push((depth, node));
        for child in &node.children {
            walk(child, depth + 1, out);
        }
    }
    let mut out = Vec::new();
    for root in roots {
        walk(root, 0, &mut out);
    }
    out
}

fn find_id(node: &Component, id: u64) -> Option<&Component> {
    if node.id == id {
        return Some(node);
    }
    node.children.iter().find_map(|c| find_id(c, id))
}

fn find_serial<'a>(node: &'a Component, serial: &str) -> Option<&'a Component> {
    if node.serial_number == serial {
        return Some(node);
    }
    node.children.iter().find_map(|c| find_serial(c, serial))
}

fn replace_in(nodes: &mut [Component], id: u64, slot: &mut Option<Component>) -> bool {
    for node in nodes.iter_mut() {
        if node.id == id {
            if let Some(replacement) = slot.take() {
                *node = replacement;
            }
            return true;
        }
        if replace_in(&mut node.children, id, slot) {
            return true;
        }
    }
    false
}
