//! Parent resolution.
//!
//! Several connectors may claim the same child. Claims are walked in
//! extraction order; a later claim replaces the accepted parent only when it
//! is clearly closer, first along the depth axis and then across it.

use std::collections::HashMap;

use indexmap::IndexMap;
use log::{debug, info, warn};
use serde::Serialize;

use mindmap_core::{identifier::NodeId, node::Node};

use crate::{config::DetectConfig, connect::Connection, level::LevelMap, node_by_id};

/// Accepted parent/child relationships.
///
/// Every child is listed under at most one parent. Parents keep their first
/// insertion order and children their acceptance order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParentChildMap {
    children: IndexMap<NodeId, Vec<NodeId>>,
    parents: HashMap<NodeId, NodeId>,
}

impl ParentChildMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Children of `parent`, in acceptance order.
    pub fn children_of(&self, parent: NodeId) -> &[NodeId] {
        self.children
            .get(&parent)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn parent_of(&self, child: NodeId) -> Option<NodeId> {
        self.parents.get(&child).copied()
    }

    /// Makes `parent` the only parent of `child`, detaching it from any
    /// previous parent.
    pub fn assign(&mut self, child: NodeId, parent: NodeId) {
        if let Some(previous) = self.parents.insert(child, parent) {
            if let Some(siblings) = self.children.get_mut(&previous) {
                siblings.retain(|&id| id != child);
            }
        }
        self.children.entry(parent).or_default().push(child);
    }

    /// Parents with their children, in first insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &[NodeId])> {
        self.children
            .iter()
            .map(|(&parent, children)| (parent, children.as_slice()))
    }

    /// Number of children with an accepted parent.
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }
}

impl Serialize for ParentChildMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_map(self.iter())
    }
}

/// Whether `candidate` should replace `existing` as the parent of `child`.
///
/// The depth-axis distances decide when they differ by more than the
/// primary tie-break, else the cross-axis distances when they differ by more
/// than the secondary tie-break. Near-ties keep the existing parent.
pub fn should_replace(existing: &Node, candidate: &Node, child: &Node, config: &DetectConfig) -> bool {
    let axis = config.axis();
    let child_position = child.position();

    let existing_primary = (axis.primary(child_position) - axis.primary(existing.position())).abs();
    let candidate_primary = (axis.primary(child_position) - axis.primary(candidate.position())).abs();
    if (existing_primary - candidate_primary).abs() > config.primary_tie_break() {
        return candidate_primary < existing_primary;
    }

    let existing_secondary =
        (axis.secondary(child_position) - axis.secondary(existing.position())).abs();
    let candidate_secondary =
        (axis.secondary(child_position) - axis.secondary(candidate.position())).abs();
    if (existing_secondary - candidate_secondary).abs() > config.secondary_tie_break() {
        return candidate_secondary < existing_secondary;
    }

    false
}

/// Consolidates connections into one accepted parent per child.
///
/// A connection is accepted only when the child's depth level is exactly one
/// past the parent's; others are logged as level mismatches and dropped.
pub fn resolve_parents(
    connections: &[Connection],
    nodes: &[Node],
    levels: &LevelMap,
    config: &DetectConfig,
) -> ParentChildMap {
    let mut map = ParentChildMap::new();

    for connection in connections {
        let (Some(parent), Some(child)) = (
            node_by_id(nodes, connection.parent()),
            node_by_id(nodes, connection.child()),
        ) else {
            continue;
        };

        let parent_level = levels.level_of(parent.id());
        let child_level = levels.level_of(child.id());
        let adjacent = matches!((parent_level, child_level), (Some(p), Some(c)) if c == p + 1);
        if !adjacent {
            warn!(
                parent:% = parent.id(),
                child:% = child.id(),
                parent_level:? = parent_level,
                child_level:? = child_level;
                "Level mismatch, connection dropped"
            );
            continue;
        }

        match map.parent_of(child.id()).and_then(|id| node_by_id(nodes, id)) {
            None => {
                debug!(parent:% = parent.id(), child:% = child.id(); "Parent accepted");
                map.assign(child.id(), parent.id());
            }
            Some(existing) if existing.id() == parent.id() => {}
            Some(existing) => {
                if should_replace(existing, parent, child, config) {
                    debug!(
                        child:% = child.id(),
                        from:% = existing.id(),
                        to:% = parent.id();
                        "Parent replaced"
                    );
                    map.assign(child.id(), parent.id());
                } else {
                    debug!(child:% = child.id(), parent:% = existing.id(); "Existing parent kept");
                }
            }
        }
    }

    info!(
        parents = map.iter().filter(|(_, children)| !children.is_empty()).count(),
        children = map.len();
        "Parent-child map resolved"
    );
    map
}
