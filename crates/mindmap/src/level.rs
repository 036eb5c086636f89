//! Depth levels.
//!
//! Nodes are bucketed by their primary-axis coordinate quantized to the
//! nearest multiple of the level tolerance. A node's depth level is the rank
//! of its bucket among all buckets, ascending.

use std::collections::{BTreeMap, HashMap};

use log::{info, trace};
use serde::{Serialize, ser::SerializeSeq};

use mindmap_core::{
    geometry::{Axis, round_half_up},
    identifier::NodeId,
    node::Node,
};

/// Nodes grouped by quantized depth coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelMap {
    tolerance: f32,
    /// Quantization step count to node ids, in discovery order.
    buckets: BTreeMap<i64, Vec<NodeId>>,
    levels: HashMap<NodeId, usize>,
}

impl LevelMap {
    /// Groups `nodes` by their coordinate along `axis`.
    ///
    /// `tolerance` must be strictly positive.
    pub fn group(nodes: &[Node], axis: Axis, tolerance: f32) -> Self {
        let mut buckets: BTreeMap<i64, Vec<NodeId>> = BTreeMap::new();
        for node in nodes {
            let step = round_half_up(axis.primary(node.position()) / tolerance) as i64;
            buckets.entry(step).or_default().push(node.id());
        }

        let levels = buckets
            .values()
            .enumerate()
            .flat_map(|(level, ids)| ids.iter().map(move |&id| (id, level)))
            .collect();

        let map = Self {
            tolerance,
            buckets,
            levels,
        };
        info!(levels = map.len(); "Nodes grouped into depth levels");
        for (level, (coordinate, ids)) in map.iter().enumerate() {
            trace!(level = level, coordinate = coordinate, nodes = ids.len(); "Depth level");
        }
        map
    }

    /// Depth level of the node with `id`, or `None` if it was not grouped.
    pub fn level_of(&self, id: NodeId) -> Option<usize> {
        self.levels.get(&id).copied()
    }

    /// Node ids at depth `level`, in discovery order.
    pub fn nodes_at(&self, level: usize) -> &[NodeId] {
        self.buckets
            .values()
            .nth(level)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Levels in ascending order, each with its quantized coordinate.
    pub fn iter(&self) -> impl Iterator<Item = (f32, &[NodeId])> {
        self.buckets
            .iter()
            .map(|(&step, ids)| (step as f32 * self.tolerance, ids.as_slice()))
    }

    /// Number of distinct levels.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

impl Default for LevelMap {
    fn default() -> Self {
        Self {
            tolerance: 1.0,
            buckets: BTreeMap::new(),
            levels: HashMap::new(),
        }
    }
}

#[derive(Serialize)]
struct LevelEntry<'a> {
    level: usize,
    coordinate: f32,
    nodes: &'a [NodeId],
}

impl Serialize for LevelMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for (level, (coordinate, nodes)) in self.iter().enumerate() {
            seq.serialize_element(&LevelEntry {
                level,
                coordinate,
                nodes,
            })?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use mindmap_core::geometry::{Bounds, Point, Size};

    use super::*;

    pub(super) fn node(index: usize, x: f32, y: f32) -> Node {
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

    #[test]
    fn test_quantization_merges_close_coordinates() {
        let nodes = [
            node(0, 0.0, 0.0),
            node(1, 101.0, 0.0),
            node(2, 99.0, 40.0),
            node(3, 203.0, 0.0),
            node(4, 198.0, 40.0),
        ];
        let levels = LevelMap::group(&nodes, Axis::Horizontal, 5.0);

        // 101 and 99 share the 100 bucket; 198 and 203 land in 200 and 205
        assert_eq!(levels.len(), 4);
        assert_eq!(levels.nodes_at(1), &[id(1), id(2)]);
        assert_eq!(levels.level_of(id(4)), Some(2));
        assert_eq!(levels.level_of(id(3)), Some(3));
    }

    #[test]
    fn test_quantization_rounds_halves_up() {
        // -2.5 and 0 share the 0 bucket, 2.5 moves up to the 5 bucket
        let nodes = [node(0, 0.0, 0.0), node(1, -2.5, 50.0), node(2, 2.5, 100.0)];
        let levels = LevelMap::group(&nodes, Axis::Horizontal, 5.0);

        assert_eq!(levels.len(), 2);
        assert_eq!(levels.nodes_at(0), &[id(0), id(1)]);
        assert_eq!(levels.nodes_at(1), &[id(2)]);
    }

    #[test]
    fn test_levels_rank_by_coordinate() {
        let nodes = [node(0, 300.0, 0.0), node(1, -50.0, 0.0), node(2, 120.0, 0.0)];
        let levels = LevelMap::group(&nodes, Axis::Horizontal, 5.0);

        assert_eq!(levels.level_of(id(1)), Some(0));
        assert_eq!(levels.level_of(id(2)), Some(1));
        assert_eq!(levels.level_of(id(0)), Some(2));
        assert_eq!(levels.level_of(id(9)), None);

        let coordinates: Vec<_> = levels.iter().map(|(c, _)| c).collect();
        assert_eq!(coordinates, vec![-50.0, 120.0, 300.0]);
    }

    #[test]
    fn test_vertical_axis_uses_y() {
        let nodes = [node(0, 0.0, 200.0), node(1, 500.0, 0.0)];
        let levels = LevelMap::group(&nodes, Axis::Vertical, 5.0);
        assert_eq!(levels.level_of(id(1)), Some(0));
        assert_eq!(levels.level_of(id(0)), Some(1));
    }

    #[test]
    fn test_empty() {
        let levels = LevelMap::group(&[], Axis::Horizontal, 5.0);
        assert!(levels.is_empty());
        assert!(levels.nodes_at(0).is_empty());
    }

    #[test]
    fn test_serialize_as_ordered_entries() {
        let nodes = [node(0, 10.0, 0.0), node(1, 0.0, 0.0)];
        let levels = LevelMap::group(&nodes, Axis::Horizontal, 5.0);
        let json = serde_json::to_value(&levels).expect("serializable");
        assert_eq!(
            json,
            serde_json::json!([
                {"level": 0, "coordinate": 0.0, "nodes": ["node_1"]},
                {"level": 1, "coordinate": 10.0, "nodes": ["node_0"]},
            ])
        );
    }
}
