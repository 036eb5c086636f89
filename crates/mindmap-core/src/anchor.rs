//! Connection anchors on a node's bounding box.
//!
//! Connector endpoints are matched against these anchors rather than against
//! the raw bounds, so a curve that stops a few units short of a label still
//! lands on it.

use std::fmt;

use serde::Serialize;

use crate::geometry::{Axis, Bounds, Point};

/// Which side of the bounding box an [`Anchor`] sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorSide {
    Left,
    Right,
    Top,
    Bottom,
    Center,
}

impl AnchorSide {
    /// The side a connector leaves its parent from along `axis`.
    pub fn outgoing(axis: Axis) -> Self {
        match axis {
            Axis::Horizontal => AnchorSide::Right,
            Axis::Vertical => AnchorSide::Bottom,
        }
    }

    /// The side a connector enters its child on along `axis`.
    pub fn incoming(axis: Axis) -> Self {
        match axis {
            Axis::Horizontal => AnchorSide::Left,
            Axis::Vertical => AnchorSide::Top,
        }
    }
}

impl fmt::Display for AnchorSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AnchorSide::Left => "left",
            AnchorSide::Right => "right",
            AnchorSide::Top => "top",
            AnchorSide::Bottom => "bottom",
            AnchorSide::Center => "center",
        };
        f.write_str(name)
    }
}

/// A named point on a node's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Anchor {
    #[serde(flatten)]
    point: Point,
    side: AnchorSide,
}

impl Anchor {
    pub fn new(point: Point, side: AnchorSide) -> Self {
        Self { point, side }
    }

    pub fn point(self) -> Point {
        self.point
    }

    pub fn side(self) -> AnchorSide {
        self.side
    }
}

/// Derives the five anchors of `bounds`, in the order left, right, top,
/// bottom, center.
///
/// # Examples
///
/// ```
/// # use mindmap_core::anchor::{anchors_for, AnchorSide};
/// # use mindmap_core::geometry::{Bounds, Point};
/// let anchors = anchors_for(Bounds::new(0.0, 0.0, 40.0, 20.0));
///
/// assert_eq!(anchors.len(), 5);
/// assert_eq!(anchors[0].side(), AnchorSide::Left);
/// assert_eq!(anchors[0].point(), Point::new(0.0, 10.0));
/// assert_eq!(anchors[1].point(), Point::new(40.0, 10.0));
/// ```
pub fn anchors_for(bounds: Bounds) -> [Anchor; 5] {
    let center = bounds.center();
    [
        Anchor::new(Point::new(bounds.left(), center.y()), AnchorSide::Left),
        Anchor::new(Point::new(bounds.right(), center.y()), AnchorSide::Right),
        Anchor::new(Point::new(center.x(), bounds.top()), AnchorSide::Top),
        Anchor::new(Point::new(center.x(), bounds.bottom()), AnchorSide::Bottom),
        Anchor::new(center, AnchorSide::Center),
    ]
}
