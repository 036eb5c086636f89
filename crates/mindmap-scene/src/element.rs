//! Raw scene shapes.
//!
//! A [`RawElement`] is one shape of a scene root: its [`ElementKind`] tag plus
//! the attributes shared by every kind. Pipeline code asks for capabilities
//! ([`RawElement::as_connector`], [`RawElement::as_labeled`],
//! [`RawElement::as_rect`]) instead of matching on tags.

use std::fmt;

use serde::Serialize;

use mindmap_core::geometry::{Bounds, Point, Size};

use crate::parser;

/// Index of an element within its [`SceneRoot`](crate::SceneRoot).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

impl ElementId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of the element in document order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// The shape tag of a [`RawElement`].
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    /// A container (`<g>`).
    Group,
    /// A text shape with its full text content.
    Text { content: String },
    /// An explicit rectangle.
    Rect { bounds: Bounds },
    /// A straight line between two explicit endpoints.
    Line { start: Point, end: Point },
    /// A path with raw `d` data.
    Curve { data: String },
    /// A polyline with a raw `points` list.
    Polyline { points: String },
    /// Any other shape, kept for structure only.
    Other { tag: String },
}

/// The kind of primitive a connector was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectorKind {
    Line,
    Curve,
    Polyline,
}

impl fmt::Display for ConnectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConnectorKind::Line => "line",
            ConnectorKind::Curve => "curve",
            ConnectorKind::Polyline => "polyline",
        };
        f.write_str(name)
    }
}

/// Endpoint-defining geometry of a connector shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConnectorGeometry<'a> {
    Line { start: Point, end: Point },
    Curve { data: &'a str },
    Polyline { points: &'a str },
}

impl ConnectorGeometry<'_> {
    pub fn kind(&self) -> ConnectorKind {
        match self {
            ConnectorGeometry::Line { .. } => ConnectorKind::Line,
            ConnectorGeometry::Curve { .. } => ConnectorKind::Curve,
            ConnectorGeometry::Polyline { .. } => ConnectorKind::Polyline,
        }
    }
}

/// A shape read from a scene root.
#[derive(Debug, Clone, PartialEq)]
pub struct RawElement {
    kind: ElementKind,
    class: Option<String>,
    transform: Option<String>,
    x: Option<f32>,
    y: Option<f32>,
    native_bounds: Option<Bounds>,
    parent: Option<ElementId>,
    /// One past the index of the last descendant.
    subtree_end: usize,
}

impl RawElement {
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            class: None,
            transform: None,
            x: None,
            y: None,
            native_bounds: None,
            parent: None,
            subtree_end: 0,
        }
    }

    pub fn group() -> Self {
        Self::new(ElementKind::Group)
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self::new(ElementKind::Text {
            content: content.into(),
        })
    }

    pub fn rect(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(ElementKind::Rect {
            bounds: Bounds::new_from_top_left(Point::new(x, y), Size::new(width, height)),
        })
    }

    pub fn line(start: Point, end: Point) -> Self {
        Self::new(ElementKind::Line { start, end })
    }

    pub fn curve(data: impl Into<String>) -> Self {
        Self::new(ElementKind::Curve { data: data.into() })
    }

    pub fn polyline(points: impl Into<String>) -> Self {
        Self::new(ElementKind::Polyline {
            points: points.into(),
        })
    }

    /// Sets the raw `class` attribute.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Sets the raw `transform` attribute.
    pub fn with_transform(mut self, transform: impl Into<String>) -> Self {
        self.transform = Some(transform.into());
        self
    }

    /// Sets the explicit `x`/`y` attributes.
    pub fn with_position(mut self, x: Option<f32>, y: Option<f32>) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Sets the provider-computed bounding box in local coordinates.
    pub fn with_native_bounds(mut self, bounds: Option<Bounds>) -> Self {
        self.native_bounds = bounds;
        self
    }

    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    pub fn is_group(&self) -> bool {
        matches!(self.kind, ElementKind::Group)
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, ElementKind::Text { .. })
    }

    /// Whether the `class` attribute lists `token` as one of its classes.
    pub fn has_class(&self, token: &str) -> bool {
        self.class
            .as_deref()
            .unwrap_or_default()
            .split_whitespace()
            .any(|t| t == token)
    }

    /// Whether the raw `class` attribute contains `needle` anywhere.
    pub fn class_contains(&self, needle: &str) -> bool {
        self.class.as_deref().is_some_and(|c| c.contains(needle))
    }

    pub fn transform(&self) -> Option<&str> {
        self.transform.as_deref()
    }

    /// The translation component of the `transform` attribute, if any.
    pub fn translation(&self) -> Option<Point> {
        self.transform.as_deref().and_then(parser::parse_translate)
    }

    /// The explicit `x`/`y` attributes, each defaulting to zero.
    pub fn explicit_position(&self) -> Point {
        Point::new(self.x.unwrap_or(0.0), self.y.unwrap_or(0.0))
    }

    /// Bounding box computed by the provider, in the element's local space.
    pub fn native_bounds(&self) -> Option<Bounds> {
        self.native_bounds
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    /// The direct text content, for text shapes.
    pub fn as_labeled(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::Text { content } => Some(content),
            _ => None,
        }
    }

    /// The endpoint-defining geometry, for connector shapes.
    pub fn as_connector(&self) -> Option<ConnectorGeometry<'_>> {
        match &self.kind {
            ElementKind::Line { start, end } => Some(ConnectorGeometry::Line {
                start: *start,
                end: *end,
            }),
            ElementKind::Curve { data } => Some(ConnectorGeometry::Curve { data }),
            ElementKind::Polyline { points } => Some(ConnectorGeometry::Polyline { points }),
            _ => None,
        }
    }

    /// The explicit rectangle, for rect shapes.
    pub fn as_rect(&self) -> Option<Bounds> {
        match &self.kind {
            ElementKind::Rect { bounds } => Some(*bounds),
            _ => None,
        }
    }

    pub(crate) fn set_parent(&mut self, parent: Option<ElementId>) {
        self.parent = parent;
    }

    pub(crate) fn set_subtree_end(&mut self, end: usize) {
        self.subtree_end = end;
    }

    pub(crate) fn set_native_bounds(&mut self, bounds: Option<Bounds>) {
        self.native_bounds = bounds;
    }

    pub(crate) fn subtree_end(&self) -> usize {
        self.subtree_end
    }
}
