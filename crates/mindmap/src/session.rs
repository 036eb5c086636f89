//! Detection session.
//!
//! A [`DetectionSession`] runs the reconstruction pipeline over a scene
//! provider and caches the intermediate structures of its last run, so a
//! caller can later rebuild the hierarchy from a root of its choosing.

use log::{debug, info, trace};
use serde::Serialize;

use mindmap_core::{
    identifier::NodeId,
    node::{HierarchyNode, Node, TreeNode},
};
use mindmap_scene::{SceneProvider, SceneRoot};

use crate::{
    MindmapError,
    config::DetectConfig,
    connect::{Connection, analyze_connections},
    extract::NodeExtractor,
    filter::ContentFilter,
    hierarchy::{build_by_levels, build_hierarchy, find_root},
    level::LevelMap,
    node_by_id,
    resolve::{ParentChildMap, resolve_parents},
    tree::build_tree,
    validate::validate,
};

/// Summary of a reconstructed tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    /// Number of placed nodes.
    pub node_count: usize,
    /// Number of top-level trees.
    pub root_count: usize,
}

/// The nested tree handed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetectionResult {
    pub tree: Vec<TreeNode>,
    pub meta: Meta,
}

impl DetectionResult {
    fn from_placed(placed: &[HierarchyNode]) -> Result<Self, MindmapError> {
        validate(placed)?;
        let tree = build_tree(placed);
        let meta = Meta {
            node_count: placed.len(),
            root_count: tree.len(),
        };
        info!(nodes = meta.node_count, roots = meta.root_count; "Tree built");
        Ok(Self { tree, meta })
    }
}

/// Intermediate structures of the last pipeline run.
#[derive(Debug, Clone, Default)]
pub struct DebugSnapshot {
    nodes: Vec<Node>,
    connections: Vec<Connection>,
    levels: LevelMap,
    detected_root: Option<NodeId>,
    parent_child_map: ParentChildMap,
}

impl DebugSnapshot {
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn levels(&self) -> &LevelMap {
        &self.levels
    }

    pub fn detected_root(&self) -> Option<NodeId> {
        self.detected_root
    }

    pub fn parent_child_map(&self) -> &ParentChildMap {
        &self.parent_child_map
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotNode<'a> {
    #[serde(flatten)]
    node: &'a Node,
    is_detected_root: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotView<'a> {
    nodes: Vec<SnapshotNode<'a>>,
    connections: &'a [Connection],
    levels: &'a LevelMap,
    detected_root: Option<NodeId>,
    parent_child_map: &'a ParentChildMap,
}

impl Serialize for DebugSnapshot {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let nodes = self
            .nodes
            .iter()
            .map(|node| SnapshotNode {
                node,
                is_detected_root: Some(node.id()) == self.detected_root,
            })
            .collect();

        SnapshotView {
            nodes,
            connections: &self.connections,
            levels: &self.levels,
            detected_root: self.detected_root,
            parent_child_map: &self.parent_child_map,
        }
        .serialize(serializer)
    }
}

/// Runs the pipeline and keeps the last run's snapshot.
#[derive(Debug)]
pub struct DetectionSession {
    config: DetectConfig,
    filter: ContentFilter,
    snapshot: Option<DebugSnapshot>,
}

impl DetectionSession {
    /// Creates a session.
    ///
    /// # Errors
    ///
    /// Returns [`MindmapError::Config`] when `config` is out of range or one
    /// of its noise patterns is not a valid regular expression.
    pub fn new(config: DetectConfig) -> Result<Self, MindmapError> {
        config.validate()?;
        let filter = ContentFilter::new(config.noise_patterns())?;
        Ok(Self {
            config,
            filter,
            snapshot: None,
        })
    }

    pub fn config(&self) -> &DetectConfig {
        &self.config
    }

    /// The snapshot of the last `detect` or `debug_extract` run.
    pub fn snapshot(&self) -> Option<&DebugSnapshot> {
        self.snapshot.as_ref()
    }

    /// Reconstructs the mindmap shown by `provider`.
    ///
    /// # Errors
    ///
    /// - [`MindmapError::NoScreenContent`] when the scene has no shapes
    /// - [`MindmapError::NoUniqueNodes`] when no labeled node survives extraction
    /// - [`MindmapError::HierarchyValidationFailed`] when the hierarchy repeats a node
    pub fn detect<P>(&mut self, provider: &P) -> Result<DetectionResult, MindmapError>
    where
        P: SceneProvider + ?Sized,
    {
        let roots = provider.scene_roots();
        let shapes: usize = roots.iter().map(SceneRoot::shape_count).sum();
        info!(scene_roots = roots.len(), shapes = shapes; "Detection started");
        if shapes == 0 {
            return Err(MindmapError::NoScreenContent);
        }

        let snapshot = self.analyze(roots);
        let root = snapshot
            .detected_root
            .and_then(|id| node_by_id(&snapshot.nodes, id))
            .ok_or(MindmapError::NoUniqueNodes)?;

        let placed = build_hierarchy(
            &snapshot.nodes,
            root,
            &snapshot.parent_child_map,
            &snapshot.levels,
            self.config.axis(),
        );
        trace!(placed:? = placed; "Placed nodes");
        let result = DetectionResult::from_placed(&placed);
        self.snapshot = Some(snapshot);
        result
    }

    /// Runs the analysis stages without building a tree.
    ///
    /// Never fails: an empty scene records an empty snapshot.
    pub fn debug_extract<P>(&mut self, provider: &P) -> &DebugSnapshot
    where
        P: SceneProvider + ?Sized,
    {
        let snapshot = self.analyze(provider.scene_roots());
        info!(
            nodes = snapshot.nodes.len(),
            connections = snapshot.connections.len(),
            detected_root:? = snapshot.detected_root.map(|id| id.to_string());
            "Debug snapshot recorded"
        );
        self.snapshot.insert(snapshot)
    }

    /// Rebuilds the tree from the cached snapshot with `root_id` as root.
    ///
    /// With cached connections the hierarchy follows the re-resolved
    /// parent-child map, otherwise depth levels alone.
    ///
    /// # Errors
    ///
    /// - [`MindmapError::NoDebugData`] when nothing was cached yet
    /// - [`MindmapError::RootNotFound`] when `root_id` names no cached node,
    ///   which is always the case for a snapshot of an empty scene
    /// - [`MindmapError::HierarchyValidationFailed`] when the hierarchy repeats a node
    pub fn extract_with_root(&self, root_id: &str) -> Result<DetectionResult, MindmapError> {
        let snapshot = self.snapshot.as_ref().ok_or(MindmapError::NoDebugData)?;

        let root = root_id
            .parse::<NodeId>()
            .ok()
            .and_then(|id| node_by_id(&snapshot.nodes, id))
            .ok_or_else(|| MindmapError::RootNotFound(root_id.to_string()))?;
        info!(root:% = root.id(), text = root.text(); "Rebuilding from selected root");

        let axis = self.config.axis();
        let levels = LevelMap::group(&snapshot.nodes, axis, self.config.level_tolerance());
        let placed = if snapshot.connections.is_empty() {
            debug!("No cached connections, building from levels");
            build_by_levels(&snapshot.nodes, root, &levels, axis)
        } else {
            let map = resolve_parents(&snapshot.connections, &snapshot.nodes, &levels, &self.config);
            build_hierarchy(&snapshot.nodes, root, &map, &levels, axis)
        };

        DetectionResult::from_placed(&placed)
    }

    /// Extraction, grouping, connection analysis, parent resolution and
    /// root detection.
    fn analyze(&self, roots: &[SceneRoot]) -> DebugSnapshot {
        let nodes = NodeExtractor::new(&self.config, &self.filter).extract(roots);
        if nodes.is_empty() {
            return DebugSnapshot::default();
        }

        let axis = self.config.axis();
        let levels = LevelMap::group(&nodes, axis, self.config.level_tolerance());
        let connections = analyze_connections(roots, &nodes, &self.config);
        let parent_child_map = resolve_parents(&connections, &nodes, &levels, &self.config);
        let detected_root = find_root(&nodes, &levels, axis);
        debug!(root:? = detected_root.map(|id| id.to_string()); "Root detected");

        DebugSnapshot {
            nodes,
            connections,
            levels,
            detected_root,
            parent_child_map,
        }
    }
}
