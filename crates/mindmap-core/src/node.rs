//! The node shapes produced along the reconstruction pipeline.
//!
//! - [`Node`] - A unique labeled shape with its geometry, as extracted
//! - [`HierarchyNode`] - A node placed in the hierarchy with its parent and level
//! - [`TreeNode`] - The nested output shape handed to the caller

use serde::Serialize;

use crate::{
    anchor::{Anchor, AnchorSide, anchors_for},
    geometry::{Bounds, Point},
    identifier::NodeId,
};

/// Normalizes a label for duplicate detection: trimmed and lowercased.
///
/// # Examples
///
/// ```
/// # use mindmap_core::node::normalize_text;
/// assert_eq!(normalize_text("  Machine Learning "), "machine learning");
/// ```
pub fn normalize_text(text: &str) -> String {
    text.trim().to_lowercase()
}

/// A unique labeled node extracted from the scene.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    id: NodeId,
    text: String,
    position: Point,
    bounds: Bounds,
    anchors: [Anchor; 5],
    original_index: usize,
}

impl Node {
    /// Creates a node; its anchors are derived from `bounds`.
    ///
    /// `original_index` is the position of the source shape among the
    /// candidates of its scene root.
    pub fn new(
        id: NodeId,
        text: impl Into<String>,
        position: Point,
        bounds: Bounds,
        original_index: usize,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            position,
            bounds,
            anchors: anchors_for(bounds),
            original_index,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The deduplication key of this node's label.
    pub fn normalized_text(&self) -> String {
        normalize_text(&self.text)
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn anchors(&self) -> &[Anchor; 5] {
        &self.anchors
    }

    /// The anchor on the given side.
    pub fn anchor(&self, side: AnchorSide) -> Anchor {
        // anchors_for always yields one anchor per side
        self.anchors
            .iter()
            .copied()
            .find(|anchor| anchor.side() == side)
            .unwrap_or_else(|| Anchor::new(self.bounds.center(), side))
    }

    pub fn original_index(&self) -> usize {
        self.original_index
    }
}

/// A node placed in the reconstructed hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchyNode {
    pub id: NodeId,
    pub text: String,
    pub parent_id: Option<NodeId>,
    pub level: usize,
    pub original_index: usize,
}

impl HierarchyNode {
    /// Places `node` at `level` under `parent_id`.
    pub fn from_node(node: &Node, parent_id: Option<NodeId>, level: usize) -> Self {
        Self {
            id: node.id(),
            text: node.text().to_string(),
            parent_id,
            level,
            original_index: node.original_index(),
        }
    }
}

/// A node of the nested output tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    pub id: NodeId,
    pub title: String,
    pub level: usize,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Total number of nodes in this subtree, including `self`.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(TreeNode::subtree_len).sum::<usize>()
    }
}
