//! Scene provider backed by an SVG or XHTML document.
//!
//! Every `<svg>` element in the document becomes an independent
//! [`SceneRoot`]. A nested `<svg>` is a root of its own and its shapes are
//! also visible from the enclosing root.
//!
//! Native bounding boxes are computed from explicit geometry only (rects,
//! circles, ellipses, lines, polylines, polygons and path vertices). Text has
//! no intrinsic box since no font metrics are available.

use log::{debug, trace};
use roxmltree::{Document, Node as XmlNode};

use mindmap_core::geometry::{Bounds, Point};

use crate::{
    SceneProvider,
    element::{ElementId, ElementKind, RawElement},
    error::SceneError,
    parser::{parse_length, parse_path_data, parse_points},
    scene::{SceneBuilder, SceneRoot},
};

/// An SVG or XHTML document read into scene roots.
#[derive(Debug, Clone)]
pub struct SvgDocument {
    roots: Vec<SceneRoot>,
}

impl SvgDocument {
    /// Parses `source` and collects every `<svg>` element as a scene root.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::Xml`] if `source` is not well-formed XML.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mindmap_scene::{SceneProvider, SvgDocument};
    /// let doc = SvgDocument::parse(r#"<svg><g class="node"><text>Hi there</text></g></svg>"#)?;
    /// assert_eq!(doc.scene_roots().len(), 1);
    /// assert_eq!(doc.scene_roots()[0].shape_count(), 2);
    /// # Ok::<(), mindmap_scene::SceneError>(())
    /// ```
    pub fn parse(source: &str) -> Result<Self, SceneError> {
        let document = Document::parse(source)?;

        let roots: Vec<SceneRoot> = document
            .descendants()
            .filter(|node| node.is_element() && node.tag_name().name() == "svg")
            .map(build_root)
            .collect();

        debug!(scene_roots = roots.len(); "Scene document parsed");
        Ok(Self { roots })
    }
}

impl SceneProvider for SvgDocument {
    fn scene_roots(&self) -> &[SceneRoot] {
        &self.roots
    }
}

/// Builds one scene root from an `<svg>` element.
fn build_root(svg: XmlNode<'_, '_>) -> SceneRoot {
    let mut builder = SceneBuilder::new(read_element(svg));
    let mut root_bounds: Option<Bounds> = None;

    for child in svg.children().filter(XmlNode::is_element) {
        root_bounds = merge(root_bounds, visit(&mut builder, child));
    }

    builder.set_native_bounds(ElementId::new(0), root_bounds);
    let scene = builder.finish();
    trace!(shapes = scene.shape_count(); "Scene root built");
    scene
}

/// Adds `node` and its subtree to `builder`.
///
/// Returns the node's bounds in its parent's coordinate space.
fn visit(builder: &mut SceneBuilder, node: XmlNode<'_, '_>) -> Option<Bounds> {
    let element = read_element(node);
    let translation = element.translation();
    let intrinsic = intrinsic_bounds(node, element.kind());
    let id = builder.open(element);

    let mut local = intrinsic;
    for child in node.children().filter(XmlNode::is_element) {
        local = merge(local, visit(builder, child));
    }

    builder.set_native_bounds(id, local);
    builder.close();

    local.map(|bounds| match translation {
        Some(offset) => bounds.translate(offset),
        None => bounds,
    })
}

fn merge(a: Option<Bounds>, b: Option<Bounds>) -> Option<Bounds> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.merge(&b)),
        (a, None) => a,
        (None, b) => b,
    }
}

fn length_attr(node: XmlNode<'_, '_>, name: &str) -> Option<f32> {
    node.attribute(name).and_then(parse_length)
}

/// Reads the tag and common attributes of `node`.
fn read_element(node: XmlNode<'_, '_>) -> RawElement {
    let coord = |name: &str| length_attr(node, name).unwrap_or(0.0);

    let kind = match node.tag_name().name() {
        "g" => ElementKind::Group,
        "text" => ElementKind::Text {
            content: node
                .descendants()
                .filter(XmlNode::is_text)
                .filter_map(|text| text.text())
                .collect(),
        },
        "rect" => ElementKind::Rect {
            bounds: Bounds::new(
                coord("x"),
                coord("y"),
                coord("x") + coord("width"),
                coord("y") + coord("height"),
            ),
        },
        "line" => ElementKind::Line {
            start: Point::new(coord("x1"), coord("y1")),
            end: Point::new(coord("x2"), coord("y2")),
        },
        "path" => ElementKind::Curve {
            data: node.attribute("d").unwrap_or_default().to_string(),
        },
        "polyline" => ElementKind::Polyline {
            points: node.attribute("points").unwrap_or_default().to_string(),
        },
        tag => ElementKind::Other {
            tag: tag.to_string(),
        },
    };

    let mut element = RawElement::new(kind)
        .with_position(length_attr(node, "x"), length_attr(node, "y"));
    if let Some(class) = node.attribute("class") {
        element = element.with_class(class);
    }
    if let Some(transform) = node.attribute("transform") {
        element = element.with_transform(transform);
    }
    element
}

/// Bounding box of the shape's own geometry, excluding children.
fn intrinsic_bounds(node: XmlNode<'_, '_>, kind: &ElementKind) -> Option<Bounds> {
    let attr = |name: &str| length_attr(node, name);

    match kind {
        ElementKind::Rect { bounds } => Some(*bounds),
        ElementKind::Line { start, end } => Bounds::from_points([*start, *end]),
        ElementKind::Curve { data } => parse_path_data(data).ok().and_then(Bounds::from_points),
        ElementKind::Polyline { points } => parse_points(points).ok().and_then(Bounds::from_points),
        ElementKind::Other { tag } => match tag.as_str() {
            "circle" => {
                let r = attr("r")?;
                let center = Point::new(attr("cx").unwrap_or(0.0), attr("cy").unwrap_or(0.0));
                Some(Bounds::new(
                    center.x() - r,
                    center.y() - r,
                    center.x() + r,
                    center.y() + r,
                ))
            }
            "ellipse" => {
                let (rx, ry) = (attr("rx")?, attr("ry")?);
                let center = Point::new(attr("cx").unwrap_or(0.0), attr("cy").unwrap_or(0.0));
                Some(Bounds::new(
                    center.x() - rx,
                    center.y() - ry,
                    center.x() + rx,
                    center.y() + ry,
                ))
            }
            "polygon" => node
                .attribute("points")
                .and_then(|points| parse_points(points).ok())
                .and_then(Bounds::from_points),
            _ => None,
        },
        ElementKind::Group | ElementKind::Text { .. } => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_root(source: &str) -> SceneRoot {
        let doc = SvgDocument::parse(source).expect("valid document");
        assert_eq!(doc.scene_roots().len(), 1);
        doc.scene_roots()[0].clone()
    }

    #[test]
    fn test_every_svg_is_a_root() {
        let doc = SvgDocument::parse(
            r#"<html xmlns="http://www.w3.org/1999/xhtml"><body>
                 <svg xmlns="http://www.w3.org/2000/svg"><g/></svg>
                 <div><svg xmlns="http://www.w3.org/2000/svg"><text>A</text><text>B</text></svg></div>
               </body></html>"#,
        )
        .expect("valid document");

        let counts: Vec<_> = doc.scene_roots().iter().map(SceneRoot::shape_count).collect();
        assert_eq!(counts, vec![1, 2]);
    }

    #[test]
    fn test_nested_svg_is_visible_from_both_roots() {
        let doc = SvgDocument::parse(r#"<svg><svg><text>Inner</text></svg></svg>"#)
            .expect("valid document");
        let counts: Vec<_> = doc.scene_roots().iter().map(SceneRoot::shape_count).collect();
        assert_eq!(counts, vec![2, 1]);
    }

    #[test]
    fn test_text_content_concatenates_tspans() {
        let scene = single_root(r#"<svg><text><tspan>Deep </tspan><tspan>Learning</tspan></text></svg>"#);
        let (_, text) = scene.shapes().next().expect("text shape");
        assert_eq!(text.as_labeled(), Some("Deep Learning"));
    }

    #[test]
    fn test_connector_kinds() {
        let scene = single_root(
            r#"<svg>
                 <line x1="1" y1="2" x2="3" y2="4"/>
                 <path d="M0 0 L5 5"/>
                 <polyline points="0,0 1,1"/>
               </svg>"#,
        );
        let kinds: Vec<_> = scene
            .shapes()
            .filter_map(|(_, element)| element.as_connector())
            .map(|connector| connector.kind())
            .collect();
        assert_eq!(
            kinds,
            vec![
                crate::ConnectorKind::Line,
                crate::ConnectorKind::Curve,
                crate::ConnectorKind::Polyline
            ]
        );
    }

    #[test]
    fn test_group_native_bounds_include_translated_children() {
        let scene = single_root(
            r#"<svg>
                 <g class="node">
                   <circle cx="0" cy="0" r="10"/>
                   <g transform="translate(50, 0)"><rect x="0" y="-5" width="20" height="10"/></g>
                   <text>Label</text>
                 </g>
               </svg>"#,
        );
        let (_, group) = scene.shapes().next().expect("group");
        assert_eq!(group.native_bounds(), Some(Bounds::new(-10.0, -10.0, 70.0, 10.0)));
    }

    #[test]
    fn test_text_has_no_native_bounds() {
        let scene = single_root(r#"<svg><text x="5" y="6">Solo</text></svg>"#);
        let (_, text) = scene.shapes().next().expect("text");
        assert_eq!(text.native_bounds(), None);
        assert_eq!(text.explicit_position(), Point::new(5.0, 6.0));
    }

    #[test]
    fn test_malformed_document() {
        assert!(matches!(
            SvgDocument::parse("<svg><g></svg>"),
            Err(SceneError::Xml(_))
        ));
    }

    #[test]
    fn test_document_without_svg() {
        let doc = SvgDocument::parse("<html><body/></html>").expect("valid document");
        assert!(doc.scene_roots().is_empty());
    }
}
