//! Connection analysis.
//!
//! Connector primitives carry no explicit endpoints metadata: a connection
//! is inferred when a connector starts at a node's outgoing anchor and ends
//! at another node's incoming anchor further along the depth axis.

use log::{debug, info, trace, warn};
use serde::Serialize;

use mindmap_core::{
    anchor::AnchorSide,
    geometry::{Axis, Point},
    identifier::NodeId,
    node::Node,
};
use mindmap_scene::{
    ConnectorGeometry, ConnectorKind, SceneError, SceneRoot,
    parser::{parse_path_data, parse_points},
};

use crate::config::DetectConfig;

/// Direction of an inferred connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    #[serde(rename = "parent-to-child")]
    ParentToChild,
}

/// A parent/child relationship implied by one connector.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    parent: NodeId,
    child: NodeId,
    start_point: Point,
    end_point: Point,
    source_kind: ConnectorKind,
    direction: Direction,
}

impl Connection {
    pub fn new(
        parent: NodeId,
        child: NodeId,
        start_point: Point,
        end_point: Point,
        source_kind: ConnectorKind,
    ) -> Self {
        Self {
            parent,
            child,
            start_point,
            end_point,
            source_kind,
            direction: Direction::ParentToChild,
        }
    }

    pub fn parent(&self) -> NodeId {
        self.parent
    }

    pub fn child(&self) -> NodeId {
        self.child
    }

    pub fn start_point(&self) -> Point {
        self.start_point
    }

    pub fn end_point(&self) -> Point {
        self.end_point
    }

    pub fn source_kind(&self) -> ConnectorKind {
        self.source_kind
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

/// Start and end point of a connector.
///
/// Returns `Ok(None)` when the geometry yields fewer than two points.
///
/// # Errors
///
/// Returns a [`SceneError`] when path data or a points list is malformed.
pub fn endpoints(geometry: &ConnectorGeometry<'_>) -> Result<Option<(Point, Point)>, SceneError> {
    let points = match *geometry {
        ConnectorGeometry::Line { start, end } => return Ok(Some((start, end))),
        ConnectorGeometry::Curve { data } => parse_path_data(data)?,
        ConnectorGeometry::Polyline { points } => parse_points(points)?,
    };

    match (points.first(), points.last()) {
        (Some(&start), Some(&end)) if points.len() >= 2 => Ok(Some((start, end))),
        _ => Ok(None),
    }
}

/// First node whose anchor on `side` lies within `tolerance` of `point`.
fn find_by_anchor(nodes: &[Node], point: Point, side: AnchorSide, tolerance: f32) -> Option<&Node> {
    nodes
        .iter()
        .find(|node| node.anchor(side).point().distance(point) <= tolerance)
}

/// Matches a connector's endpoints to a parent and a child node.
///
/// The start must touch the parent's outgoing anchor and the end the child's
/// incoming anchor. The child must differ from the parent and lie strictly
/// further along the depth axis.
pub fn match_endpoints(
    nodes: &[Node],
    start: Point,
    end: Point,
    config: &DetectConfig,
) -> Option<(NodeId, NodeId)> {
    let axis: Axis = config.axis();
    let tolerance = config.anchor_tolerance();

    let parent = find_by_anchor(nodes, start, AnchorSide::outgoing(axis), tolerance)?;
    let child = find_by_anchor(nodes, end, AnchorSide::incoming(axis), tolerance)?;
    if parent.id() == child.id() {
        return None;
    }

    if axis.primary(child.position()) <= axis.primary(parent.position()) {
        warn!(
            parent:% = parent.id(),
            child:% = child.id();
            "Reversed connection rejected: child is not past its parent"
        );
        return None;
    }

    Some((parent.id(), child.id()))
}

/// Infers connections from every connector of every root, in document order.
///
/// Malformed connectors are logged and skipped.
pub fn analyze_connections(roots: &[SceneRoot], nodes: &[Node], config: &DetectConfig) -> Vec<Connection> {
    let mut connections = Vec::new();

    for scene in roots {
        for (id, element) in scene.shapes() {
            let Some(geometry) = element.as_connector() else {
                continue;
            };

            let (start, end) = match endpoints(&geometry) {
                Ok(Some(points)) => points,
                Ok(None) => {
                    trace!(element = id.index(); "Connector has fewer than two points");
                    continue;
                }
                Err(err) => {
                    warn!(element = id.index(), err:%; "Invalid connection skipped");
                    continue;
                }
            };

            if let Some((parent, child)) = match_endpoints(nodes, start, end, config) {
                debug!(parent:% = parent, child:% = child, kind:% = geometry.kind(); "Connection found");
                connections.push(Connection::new(parent, child, start, end, geometry.kind()));
            }
        }
    }

    info!(connections = connections.len(); "Connections analyzed");
    connections
}

#[cfg(test)]
mod tests {
    use mindmap_core::geometry::{Bounds, Size};
    use mindmap_scene::{RawElement, SceneBuilder};

    use super::*;

    /// A node at `(x, y)` with a 40x20 box centered on it.
    fn node(index: usize, x: f32, y: f32) -> Node {
        let position = Point::new(x, y);
        Node::new(
            NodeId::new(index),
            format!("n{index}"),
            position,
            Bounds::new_from_center(position, Size::new(40.0, 20.0)),
            index,
        )
    }

    fn p(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_endpoints_per_kind() {
        let line = ConnectorGeometry::Line {
            start: p(1.0, 2.0),
            end: p(3.0, 4.0),
        };
        assert_eq!(endpoints(&line).unwrap(), Some((p(1.0, 2.0), p(3.0, 4.0))));

        let curve = ConnectorGeometry::Curve {
            data: "M20,0 C60,0 60,50 80,50",
        };
        assert_eq!(endpoints(&curve).unwrap(), Some((p(20.0, 0.0), p(80.0, 50.0))));

        let polyline = ConnectorGeometry::Polyline {
            points: "0,0 5,5 9,9",
        };
        assert_eq!(endpoints(&polyline).unwrap(), Some((p(0.0, 0.0), p(9.0, 9.0))));
    }

    #[test]
    fn test_endpoints_need_two_points() {
        let curve = ConnectorGeometry::Curve { data: "M5,5" };
        assert_eq!(endpoints(&curve).unwrap(), None);

        let polyline = ConnectorGeometry::Polyline { points: "" };
        assert_eq!(endpoints(&polyline).unwrap(), None);
    }

    #[test]
    fn test_endpoints_malformed() {
        let curve = ConnectorGeometry::Curve { data: "M5,5 ?" };
        assert!(endpoints(&curve).is_err());
    }

    #[test]
    fn test_match_right_to_left_anchor() {
        let nodes = [node(0, 0.0, 100.0), node(1, 200.0, 60.0)];
        let config = DetectConfig::default();

        // right anchor of node 0 is (20, 100), left anchor of node 1 is (180, 60)
        let matched = match_endpoints(&nodes, p(25.0, 104.0), p(170.0, 62.0), &config);
        assert_eq!(matched, Some((NodeId::new(0), NodeId::new(1))));

        let too_far = match_endpoints(&nodes, p(50.0, 100.0), p(180.0, 60.0), &config);
        assert_eq!(too_far, None);
    }

    #[test]
    fn test_match_rejects_reversed_and_self() {
        let config = DetectConfig::default();

        // The child sits left of the parent.
        let nodes = [node(0, 200.0, 0.0), node(1, 250.0, 0.0)];
        let reversed = match_endpoints(&nodes, p(270.0, 0.0), p(180.0, 0.0), &config);
        assert_eq!(reversed, None);

        // A tiny node whose right and left anchors are both in reach.
        let tiny = [node(0, 0.0, 0.0)];
        assert_eq!(match_endpoints(&tiny, p(20.0, 0.0), p(-20.0, 0.0), &config), None);
    }

    #[test]
    fn test_match_first_candidate_wins() {
        let config = DetectConfig::default();
        let nodes = [node(0, 0.0, 0.0), node(1, 0.0, 10.0), node(2, 200.0, 0.0)];

        // Both node 0 and node 1 have a right anchor within reach.
        let matched = match_endpoints(&nodes, p(20.0, 9.0), p(180.0, 0.0), &config);
        assert_eq!(matched, Some((NodeId::new(0), NodeId::new(2))));
    }

    #[test]
    fn test_vertical_axis_matches_bottom_to_top() {
        let config = DetectConfig::default().with_axis(Axis::Vertical);
        let nodes = [node(0, 0.0, 0.0), node(1, 60.0, 150.0)];

        // bottom anchor of node 0 is (0, 10), top anchor of node 1 is (60, 140)
        let matched = match_endpoints(&nodes, p(0.0, 10.0), p(60.0, 140.0), &config);
        assert_eq!(matched, Some((NodeId::new(0), NodeId::new(1))));
    }

    #[test]
    fn test_analyze_skips_invalid_connectors() {
        let nodes = [node(0, 0.0, 0.0), node(1, 200.0, 0.0)];
        let mut builder = SceneBuilder::new(RawElement::group());
        builder.leaf(RawElement::curve("M20,0 L ! 180,0"));
        builder.leaf(RawElement::polyline("20,0"));
        builder.leaf(RawElement::curve("M20,0 C100,0 100,0 180,0"));
        builder.leaf(RawElement::line(p(20.0, 0.0), p(180.0, 0.0)));
        let scene = builder.finish();

        let connections = analyze_connections(&[scene], &nodes, &DetectConfig::default());
        let kinds: Vec<_> = connections.iter().map(Connection::source_kind).collect();
        assert_eq!(kinds, vec![ConnectorKind::Curve, ConnectorKind::Line]);
        assert!(connections
            .iter()
            .all(|c| c.parent() == NodeId::new(0) && c.child() == NodeId::new(1)));
        assert_eq!(connections[0].direction(), Direction::ParentToChild);
    }

    #[test]
    fn test_connection_serialization() {
        let connection = Connection::new(
            NodeId::new(0),
            NodeId::new(1),
            p(1.0, 2.0),
            p(3.0, 4.0),
            ConnectorKind::Polyline,
        );
        let json = serde_json::to_value(&connection).expect("serializable");
        assert_eq!(json["parent"], "node_0");
        assert_eq!(json["sourceKind"], "polyline");
        assert_eq!(json["direction"], "parent-to-child");
        assert_eq!(json["endPoint"]["x"], 3.0);
    }
}
