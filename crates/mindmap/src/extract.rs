//! Node extraction.
//!
//! Every scene root is searched with several overlapping shape criteria to
//! maximize recall. Matches are merged into one candidate set per root, in
//! criteria order then document order, so a shape matched twice is only
//! considered once. Each candidate then yields a label, a position and
//! bounds, and survives only if it is unique by text and by position.

use std::collections::HashSet;

use indexmap::IndexSet;
use log::{debug, info, trace};

use mindmap_core::{
    geometry::{Bounds, Point},
    identifier::NodeId,
    node::Node,
};
use mindmap_scene::{ElementId, RawElement, SceneRoot};

use crate::{config::DetectConfig, filter::ContentFilter};

type Criterion = fn(&SceneRoot, ElementId, &RawElement) -> bool;

/// Shape criteria, applied in order.
const CRITERIA: [(&str, Criterion); 4] = [
    ("node group", is_node_group),
    ("node-like group", is_node_like_group),
    ("text in transformed group", is_text_in_transformed_group),
    ("node-name text", is_node_name_text),
];

fn is_node_group(_: &SceneRoot, _: ElementId, element: &RawElement) -> bool {
    element.is_group() && element.has_class("node")
}

fn is_node_like_group(_: &SceneRoot, _: ElementId, element: &RawElement) -> bool {
    element.is_group() && element.class_contains("node")
}

fn is_text_in_transformed_group(scene: &SceneRoot, id: ElementId, element: &RawElement) -> bool {
    element.is_text()
        && scene
            .ancestors(id)
            .any(|(_, ancestor)| ancestor.is_group() && ancestor.transform().is_some())
}

fn is_node_name_text(_: &SceneRoot, _: ElementId, element: &RawElement) -> bool {
    element.is_text() && element.has_class("node-name")
}

/// Extracts unique labeled nodes from scene roots.
pub struct NodeExtractor<'a> {
    config: &'a DetectConfig,
    filter: &'a ContentFilter,
    nodes: Vec<Node>,
    seen_texts: HashSet<String>,
    seen_positions: Vec<Point>,
}

impl<'a> NodeExtractor<'a> {
    pub fn new(config: &'a DetectConfig, filter: &'a ContentFilter) -> Self {
        Self {
            config,
            filter,
            nodes: Vec::new(),
            seen_texts: HashSet::new(),
            seen_positions: Vec::new(),
        }
    }

    /// Scans every root in order and returns the unique nodes in discovery
    /// order. Node ids are assigned sequentially from `node_0`.
    pub fn extract(mut self, roots: &[SceneRoot]) -> Vec<Node> {
        for (index, scene) in roots.iter().enumerate() {
            let before = self.nodes.len();
            self.scan(scene);
            debug!(
                scene_root = index,
                added = self.nodes.len() - before;
                "Scene root scanned for nodes"
            );
        }

        info!(nodes = self.nodes.len(); "Unique nodes extracted");
        self.nodes
    }

    fn scan(&mut self, scene: &SceneRoot) {
        let candidates = candidates(scene);
        trace!(candidates = candidates.len(); "Candidate shapes collected");

        for (original_index, &id) in candidates.iter().enumerate() {
            let Some(node) = self.build_node(scene, id, original_index) else {
                continue;
            };
            if self.admit(&node) {
                debug!(id:% = node.id(), text = node.text(); "Node accepted");
                self.nodes.push(node);
            }
        }
    }

    /// Builds a node from a candidate shape, or `None` when it has no
    /// acceptable label.
    fn build_node(&self, scene: &SceneRoot, id: ElementId, original_index: usize) -> Option<Node> {
        let (label, target) = resolve_label(scene, id)?;
        if !self.filter.accepts(&label) {
            trace!(label = label.as_str(); "Label rejected by content filter");
            return None;
        }

        let position = resolve_position(scene, target);
        let bounds = self.resolve_bounds(scene, target, position);
        let node_id = NodeId::new(self.nodes.len());

        Some(Node::new(node_id, label, position, bounds, original_index))
    }

    /// Bounds of `target`, from an explicit rectangle, the shape's native
    /// box, or a fixed box centered on `position`, in that order.
    fn resolve_bounds(&self, scene: &SceneRoot, target: ElementId, position: Point) -> Bounds {
        let rect = scene
            .find_descendant(target, |element| element.as_rect().is_some())
            .and_then(|rect| scene.get(rect))
            .and_then(RawElement::as_rect);
        if let Some(rect) = rect {
            return rect.translate(position);
        }

        let native = scene.get(target).and_then(RawElement::native_bounds);
        if let Some(native) = native {
            return native.translate(position);
        }

        Bounds::new_from_center(position, self.config.fallback_size())
    }

    /// Records `node` if no accepted node shares its text or lies within the
    /// duplicate radius of its rounded position.
    fn admit(&mut self, node: &Node) -> bool {
        let text = node.normalized_text();
        if self.seen_texts.contains(&text) {
            trace!(text = node.text(); "Duplicate text dropped");
            return false;
        }

        let rounded = node.position().round();
        let radius = self.config.duplicate_radius();
        if let Some(existing) = self
            .seen_positions
            .iter()
            .find(|existing| existing.distance(rounded) <= radius)
        {
            trace!(
                text = node.text(),
                distance = existing.distance(rounded);
                "Duplicate position dropped"
            );
            return false;
        }

        self.seen_texts.insert(text);
        self.seen_positions.push(rounded);
        true
    }
}

/// The deduplicated candidate shapes of one root.
fn candidates(scene: &SceneRoot) -> IndexSet<ElementId> {
    let mut found = IndexSet::new();
    for (name, matches) in CRITERIA {
        let before = found.len();
        found.extend(
            scene
                .shapes()
                .filter(|&(id, element)| matches(scene, id, element))
                .map(|(id, _)| id),
        );
        trace!(criterion = name, new = found.len() - before; "Criterion applied");
    }
    found
}

/// The trimmed label of a candidate and the shape carrying its geometry.
///
/// A text shape is labeled by its own content and measured through its
/// enclosing node group, or its parent when there is none. A group is
/// labeled by its `node-name` text, else its first text.
fn resolve_label(scene: &SceneRoot, id: ElementId) -> Option<(String, ElementId)> {
    let element = scene.get(id)?;

    if let Some(content) = element.as_labeled() {
        let target = scene
            .closest(id, |element| element.is_group() && element.has_class("node"))
            .or_else(|| scene.parent(id))
            .unwrap_or(id);
        return Some((content.trim().to_string(), target));
    }

    if element.is_group() {
        let text = scene
            .find_descendant(id, |e| e.is_text() && e.has_class("node-name"))
            .or_else(|| scene.find_descendant(id, RawElement::is_text))?;
        let content = scene.get(text)?.as_labeled()?;
        return Some((content.trim().to_string(), id));
    }

    None
}

/// Position of `target`: its translation, else its explicit `x`/`y`, else
/// the offset of its box within the scene root when both are zero.
fn resolve_position(scene: &SceneRoot, target: ElementId) -> Point {
    let Some(element) = scene.get(target) else {
        return Point::default();
    };

    if let Some(translation) = element.translation() {
        return translation;
    }

    let explicit = element.explicit_position();
    if !explicit.is_zero() {
        return explicit;
    }

    scene.offset_in_root(target)
}
