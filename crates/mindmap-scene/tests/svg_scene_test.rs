//! Integration tests for reading SVG documents into scenes.

use mindmap_core::geometry::{Bounds, Point};
use mindmap_scene::{ConnectorGeometry, SceneProvider, SvgDocument};

const RENDERED_MAP: &str = r#"
<html xmlns="http://www.w3.org/1999/xhtml">
  <body>
    <svg xmlns="http://www.w3.org/2000/svg" width="800" height="600">
      <g class="canvas">
        <g class="node root-node" transform="translate(100, 300)">
          <rect x="-40" y="-15" width="80" height="30"/>
          <text class="node-name">Machine Learning</text>
        </g>
        <g class="node" transform="translate(300 200)">
          <rect x="-30" y="-15" width="60" height="30"/>
          <text><tspan>Supervised</tspan></text>
        </g>
        <path class="edge" d="M140,300 C220,300 220,200 270,200"/>
        <line x1="140" y1="300" x2="270" y2="400"/>
      </g>
    </svg>
  </body>
</html>
"#;

#[test]
fn test_rendered_map_structure() {
    let document = SvgDocument::parse(RENDERED_MAP).expect("Failed to parse document");
    let roots = document.scene_roots();
    assert_eq!(roots.len(), 1);

    let scene = &roots[0];
    let groups: Vec<_> = scene
        .shapes()
        .filter(|(_, element)| element.has_class("node"))
        .collect();
    assert_eq!(groups.len(), 2);

    let (first, _) = groups[0];
    let label = scene
        .find_descendant(first, |element| element.has_class("node-name"))
        .and_then(|id| scene.get(id))
        .and_then(|element| element.as_labeled());
    assert_eq!(label, Some("Machine Learning"));

    let rect = scene
        .find_descendant(first, |element| element.as_rect().is_some())
        .and_then(|id| scene.get(id))
        .and_then(|element| element.as_rect());
    assert_eq!(rect, Some(Bounds::new(-40.0, -15.0, 40.0, 15.0)));
}

#[test]
fn test_rendered_map_connectors() {
    let document = SvgDocument::parse(RENDERED_MAP).expect("Failed to parse document");
    let scene = &document.scene_roots()[0];

    let connectors: Vec<_> = scene
        .shapes()
        .filter_map(|(_, element)| element.as_connector())
        .collect();
    assert_eq!(connectors.len(), 2);
    assert!(matches!(connectors[0], ConnectorGeometry::Curve { .. }));
    assert_eq!(
        connectors[1],
        ConnectorGeometry::Line {
            start: Point::new(140.0, 300.0),
            end: Point::new(270.0, 400.0),
        }
    );
}

#[test]
fn test_rendered_map_offsets() {
    let document = SvgDocument::parse(RENDERED_MAP).expect("Failed to parse document");
    let scene = &document.scene_roots()[0];

    let (group, element) = scene
        .shapes()
        .find(|(_, element)| element.has_class("node"))
        .expect("node group");
    assert_eq!(element.translation(), Some(Point::new(100.0, 300.0)));
    assert_eq!(scene.offset_in_root(group), Point::new(60.0, 285.0));
}
