//! Hierarchy building.
//!
//! The hierarchy is grown breadth-first from a root over the resolved
//! parent-child map. Nodes the traversal never reaches are attached to the
//! closest placed node one level up, so every extracted node appears exactly
//! once.

use std::collections::{HashSet, VecDeque};

use log::{debug, info, warn};

use mindmap_core::{
    geometry::Axis,
    identifier::NodeId,
    node::{HierarchyNode, Node},
};

use crate::{level::LevelMap, node_by_id, resolve::ParentChildMap};

/// Picks the root among the nodes of the shallowest level.
///
/// A single candidate is the root. Otherwise the candidate closest to the
/// candidates' mean cross-axis coordinate wins, the first one on ties.
pub fn find_root(nodes: &[Node], levels: &LevelMap, axis: Axis) -> Option<NodeId> {
    let candidates: Vec<&Node> = levels
        .nodes_at(0)
        .iter()
        .filter_map(|&id| node_by_id(nodes, id))
        .collect();

    match candidates.as_slice() {
        [] => None,
        [only] => Some(only.id()),
        _ => {
            let mean = candidates
                .iter()
                .map(|node| axis.secondary(node.position()))
                .sum::<f32>()
                / candidates.len() as f32;
            closest_secondary(candidates.into_iter(), mean, axis).map(Node::id)
        }
    }
}

/// The first node whose cross-axis coordinate is closest to `target`.
fn closest_secondary<'a>(
    candidates: impl Iterator<Item = &'a Node>,
    target: f32,
    axis: Axis,
) -> Option<&'a Node> {
    candidates.fold(None::<&'a Node>, |closest, node| {
        let distance = (axis.secondary(node.position()) - target).abs();
        match closest {
            Some(best) if (axis.secondary(best.position()) - target).abs() <= distance => Some(best),
            _ => Some(node),
        }
    })
}

/// Builder for the placed node list.
struct Placement<'a> {
    nodes: &'a [Node],
    levels: &'a LevelMap,
    axis: Axis,
    placed: Vec<HierarchyNode>,
    visited: HashSet<NodeId>,
}

impl<'a> Placement<'a> {
    fn new(nodes: &'a [Node], levels: &'a LevelMap, axis: Axis, root: &Node) -> Self {
        Self {
            nodes,
            levels,
            axis,
            placed: vec![HierarchyNode::from_node(root, None, 0)],
            visited: HashSet::from([root.id()]),
        }
    }

    fn place(&mut self, node: &Node, parent: NodeId, level: usize) {
        self.placed
            .push(HierarchyNode::from_node(node, Some(parent), level));
        self.visited.insert(node.id());
    }

    fn root(&self) -> &HierarchyNode {
        &self.placed[0]
    }

    /// The placed node one depth level above `orphan` closest to it across
    /// the depth axis, else the root.
    fn orphan_parent(&self, orphan: &Node) -> (NodeId, usize) {
        let fallback = (self.root().id, self.root().level);

        let Some(orphan_level) = self.levels.level_of(orphan.id()).filter(|&level| level > 0) else {
            return fallback;
        };

        let candidates = self
            .placed
            .iter()
            .filter(|placed| self.levels.level_of(placed.id) == Some(orphan_level - 1))
            .filter_map(|placed| node_by_id(self.nodes, placed.id));

        closest_secondary(candidates, self.axis.secondary(orphan.position()), self.axis)
            .and_then(|parent| self.placed.iter().find(|placed| placed.id == parent.id()))
            .map_or(fallback, |parent| (parent.id, parent.level))
    }

    /// Attaches every unvisited node, in extraction order.
    fn attach_orphans(&mut self) {
        for orphan in self.nodes {
            if self.visited.contains(&orphan.id()) {
                continue;
            }
            let (parent, parent_level) = self.orphan_parent(orphan);
            debug!(orphan:% = orphan.id(), parent:% = parent; "Orphan attached");
            self.place(orphan, parent, parent_level + 1);
        }
    }
}

/// Builds the hierarchy breadth-first from `root` over `map`.
///
/// A child is placed once, at its parent's level plus one, and only when its
/// depth level is exactly one past its parent's. Unreached nodes are then
/// attached as orphans. The root is always first.
pub fn build_hierarchy(
    nodes: &[Node],
    root: &Node,
    map: &ParentChildMap,
    levels: &LevelMap,
    axis: Axis,
) -> Vec<HierarchyNode> {
    let mut placement = Placement::new(nodes, levels, axis, root);
    let mut queue = VecDeque::from([(root.id(), 0usize)]);

    while let Some((parent, level)) = queue.pop_front() {
        let parent_level = levels.level_of(parent);

        for &child_id in map.children_of(parent) {
            if placement.visited.contains(&child_id) {
                continue;
            }
            let Some(child) = node_by_id(nodes, child_id) else {
                continue;
            };

            let child_level = levels.level_of(child_id);
            let adjacent = matches!((parent_level, child_level), (Some(p), Some(c)) if c == p + 1);
            if !adjacent {
                warn!(
                    parent:% = parent,
                    child:% = child_id,
                    parent_level:? = parent_level,
                    child_level:? = child_level;
                    "Level mismatch, child skipped"
                );
                continue;
            }

            placement.place(child, parent, level + 1);
            queue.push_back((child_id, level + 1));
        }
    }

    let reached = placement.placed.len();
    placement.attach_orphans();
    info!(
        nodes = placement.placed.len(),
        reached = reached,
        orphans = placement.placed.len() - reached;
        "Hierarchy built"
    );
    placement.placed
}

/// Builds the hierarchy from depth levels alone, ignoring connectors.
///
/// Nodes sharing the root's level go directly under `root`. Then, level by
/// level in ascending order, each node goes under the node of the previous
/// level closest to it across the depth axis, or under `root` on the
/// shallowest level. Every level is fully placed before the next one.
pub fn build_by_levels(nodes: &[Node], root: &Node, levels: &LevelMap, axis: Axis) -> Vec<HierarchyNode> {
    let mut placement = Placement::new(nodes, levels, axis, root);

    if let Some(root_level) = levels.level_of(root.id()) {
        for &id in levels.nodes_at(root_level) {
            if placement.visited.contains(&id) {
                continue;
            }
            if let Some(sibling) = node_by_id(nodes, id) {
                placement.place(sibling, root.id(), 1);
            }
        }
    }

    for level in 0..levels.len() {
        for &id in levels.nodes_at(level) {
            if placement.visited.contains(&id) {
                continue;
            }
            let Some(node) = node_by_id(nodes, id) else {
                continue;
            };
            let (parent, parent_level) = placement.orphan_parent(node);
            placement.place(node, parent, parent_level + 1);
        }
    }

    // Nodes missing from the level map.
    placement.attach_orphans();
    info!(nodes = placement.placed.len(); "Hierarchy built from levels");
    placement.placed
}

#[cfg(test)]
mod tests {
    use mindmap_core::geometry::{Bounds, Point, Size};

    use super::*;

    fn node(index: usize, x: f32, y: f32) -> Node {
        let position = Point::new(x, y);
        Node::new(
            NodeId::new(index),
            format!("n{index}"),
            position,
            Bounds::new_from_center(position, Size::new(36.0, 30.0)),
            index,
        )
    }

    fn id(index: usize) -> NodeId {
        NodeId::new(index)
    }

    fn group(nodes: &[Node]) -> LevelMap {
        LevelMap::group(nodes, Axis::Horizontal, 5.0)
    }

    fn summary(placed: &[HierarchyNode]) -> Vec<(usize, Option<usize>, usize)> {
        placed
            .iter()
            .map(|n| (n.id.index(), n.parent_id.map(NodeId::index), n.level))
            .collect()
    }

    #[test]
    fn test_single_root_candidate() {
        let nodes = [node(0, 100.0, 500.0), node(1, 0.0, 0.0), node(2, 200.0, 0.0)];
        assert_eq!(find_root(&nodes, &group(&nodes), Axis::Horizontal), Some(id(1)));
    }

    #[test]
    fn test_root_closest_to_mean() {
        // mean y = 100; node 1 is exactly on it
        let nodes = [node(0, 0.0, 0.0), node(1, 0.0, 100.0), node(2, 0.0, 200.0)];
        assert_eq!(find_root(&nodes, &group(&nodes), Axis::Horizontal), Some(id(1)));

        // mean y = 50; both are 50 away, first wins
        let nodes = [node(0, 0.0, 0.0), node(1, 0.0, 100.0)];
        assert_eq!(find_root(&nodes, &group(&nodes), Axis::Horizontal), Some(id(0)));
    }

    #[test]
    fn test_no_root_without_nodes() {
        assert_eq!(find_root(&[], &LevelMap::default(), Axis::Horizontal), None);
    }

    #[test]
    fn test_bfs_follows_map() {
        let nodes = [
            node(0, 0.0, 100.0),
            node(1, 100.0, 50.0),
            node(2, 100.0, 150.0),
            node(3, 200.0, 150.0),
        ];
        let mut map = ParentChildMap::new();
        map.assign(id(1), id(0));
        map.assign(id(2), id(0));
        map.assign(id(3), id(2));

        let placed = build_hierarchy(&nodes, &nodes[0], &map, &group(&nodes), Axis::Horizontal);
        assert_eq!(
            summary(&placed),
            vec![(0, None, 0), (1, Some(0), 1), (2, Some(0), 1), (3, Some(2), 2)]
        );
    }

    #[test]
    fn test_bfs_skips_level_mismatch_then_attaches_orphan() {
        let nodes = [node(0, 0.0, 0.0), node(1, 100.0, 0.0), node(2, 200.0, 40.0)];
        let mut map = ParentChildMap::new();
        // corrupt: skips a level
        map.assign(id(2), id(0));

        let placed = build_hierarchy(&nodes, &nodes[0], &map, &group(&nodes), Axis::Horizontal);
        // node 1 is orphaned under the root, node 2 under node 1
        assert_eq!(
            summary(&placed),
            vec![(0, None, 0), (1, Some(0), 1), (2, Some(1), 2)]
        );
    }

    #[test]
    fn test_orphan_picks_closest_placed_node_above() {
        let nodes = [
            node(0, 0.0, 100.0),
            node(1, 100.0, 0.0),
            node(2, 100.0, 200.0),
            node(3, 200.0, 180.0),
        ];
        let mut map = ParentChildMap::new();
        map.assign(id(1), id(0));
        map.assign(id(2), id(0));

        let placed = build_hierarchy(&nodes, &nodes[0], &map, &group(&nodes), Axis::Horizontal);
        assert_eq!(placed[3].id, id(3));
        assert_eq!(placed[3].parent_id, Some(id(2)));
        assert_eq!(placed[3].level, 2);
    }

    #[test]
    fn test_no_connections_covers_every_node() {
        let nodes = [
            node(0, 0.0, 100.0),
            node(1, 0.0, 300.0),
            node(2, 100.0, 280.0),
            node(3, 200.0, 0.0),
        ];
        let placed = build_hierarchy(
            &nodes,
            &nodes[0],
            &ParentChildMap::new(),
            &group(&nodes),
            Axis::Horizontal,
        );

        // node 1 shares the root's level and joins the root; node 2 is
        // closer to node 1 than to the root
        assert_eq!(
            summary(&placed),
            vec![(0, None, 0), (1, Some(0), 1), (2, Some(1), 2), (3, Some(2), 3)]
        );
    }

    #[test]
    fn test_build_by_levels_nearest_above() {
        let nodes = [
            node(0, 0.0, 100.0),
            node(1, 100.0, 0.0),
            node(2, 100.0, 200.0),
            node(3, 200.0, 10.0),
            node(4, 200.0, 190.0),
        ];
        let placed = build_by_levels(&nodes, &nodes[0], &group(&nodes), Axis::Horizontal);
        assert_eq!(
            summary(&placed),
            vec![
                (0, None, 0),
                (1, Some(0), 1),
                (2, Some(0), 1),
                (3, Some(1), 2),
                (4, Some(2), 2)
            ]
        );
    }

    #[test]
    fn test_build_by_levels_with_deeper_root() {
        let nodes = [node(0, 0.0, 0.0), node(1, 100.0, 0.0), node(2, 200.0, 0.0)];
        let placed = build_by_levels(&nodes, &nodes[1], &group(&nodes), Axis::Horizontal);

        // node 0 has no level above and joins the root first; node 2's
        // nearest node one level up is the root itself
        assert_eq!(
            summary(&placed),
            vec![(1, None, 0), (0, Some(1), 1), (2, Some(1), 1)]
        );
    }

    #[test]
    fn test_build_by_levels_prefers_root_sibling() {
        let nodes = [node(0, 0.0, 0.0), node(1, 0.0, 500.0), node(2, 100.0, 490.0)];
        let placed = build_by_levels(&nodes, &nodes[0], &group(&nodes), Axis::Horizontal);

        // the sibling is placed under the root before level 1 is assigned,
        // so node 2 can hang off its 10-unit neighbour instead of the root
        assert_eq!(
            summary(&placed),
            vec![(0, None, 0), (1, Some(0), 1), (2, Some(1), 2)]
        );
    }

    #[test]
    fn test_build_by_levels_places_whole_level_first() {
        let nodes = [
            node(0, 0.0, 0.0),
            node(1, 0.0, 400.0),
            node(2, 100.0, 10.0),
            node(3, 100.0, 390.0),
            node(4, 200.0, 380.0),
        ];
        let placed = build_by_levels(&nodes, &nodes[0], &group(&nodes), Axis::Horizontal);
        assert_eq!(
            summary(&placed),
            vec![
                (0, None, 0),
                (1, Some(0), 1),
                (2, Some(0), 1),
                (3, Some(1), 2),
                (4, Some(3), 3)
            ]
        );
    }
}
