//! Geometric primitives for scene analysis.
//!
//! This module provides the fundamental geometric types used to describe where
//! labels and connectors sit inside a rendered scene.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in scene space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - A rectangular bounding box defined by its four edges
//! - [`Axis`] - The axis along which hierarchy depth is laid out
//!
//! # Coordinate System
//!
//! Scenes use the SVG coordinate system:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! - **Origin**: Top-left corner at `(0, 0)`
//! - **X-axis**: Increases rightward
//! - **Y-axis**: Increases downward

use serde::{Deserialize, Serialize};

/// Rounds to the nearest integer, halves toward positive infinity.
///
/// Unlike [`f32::round`], `-2.5` rounds to `-2.0`.
///
/// # Examples
///
/// ```
/// # use mindmap_core::geometry::round_half_up;
/// assert_eq!(round_half_up(2.5), 3.0);
/// assert_eq!(round_half_up(-2.5), -2.0);
/// assert_eq!(round_half_up(-2.6), -3.0);
/// ```
pub fn round_half_up(value: f32) -> f32 {
    (value + 0.5).floor()
}

/// A 2D point representing a position in scene coordinate space.
///
/// # Examples
///
/// ```
/// # use mindmap_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 15.0);
/// assert_eq!(sum.y(), 25.0);
///
/// assert_eq!(Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0)), 5.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Checks if both x and y coordinates are zero
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Calculates the hypotenuse (Euclidean distance from origin)
    pub fn hypot(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance between two points.
    pub fn distance(self, other: Point) -> f32 {
        self.sub_point(other).hypot()
    }

    /// Rounds both coordinates to the nearest integer, halves upward.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mindmap_core::geometry::Point;
    /// let rounded = Point::new(10.4, 19.6).round();
    /// assert_eq!(rounded, Point::new(10.0, 20.0));
    /// ```
    pub fn round(self) -> Self {
        Self {
            x: round_half_up(self.x),
            y: round_half_up(self.y),
        }
    }

    /// Converts a point and size into a bounds rectangle
    ///
    /// The point is treated as the center of the bounds, and the size
    /// is distributed equally in all directions around that center.
    pub fn to_bounds(self, size: Size) -> Bounds {
        Bounds::new_from_center(self, size)
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }
}

/// A rectangular bounding box.
///
/// Serialized with its derived values (`width`, `height`, `centerX`,
/// `centerY`) so snapshots are readable without recomputation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    left: f32,
    top: f32,
    right: f32,
    bottom: f32,
}

impl Bounds {
    /// Creates new bounds from its four edges
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Creates a new bounds from a center point and a size
    pub fn new_from_center(center: Point, size: Size) -> Self {
        let half_width = size.width / 2.0;
        let half_height = size.height / 2.0;
        Self {
            left: center.x - half_width,
            top: center.y - half_height,
            right: center.x + half_width,
            bottom: center.y + half_height,
        }
    }

    /// Creates a new bounds from a top-left point and a size
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            left: top_left.x,
            top: top_left.y,
            right: top_left.x + size.width,
            bottom: top_left.y + size.height,
        }
    }

    /// Smallest bounds containing every point, or `None` for an empty iterator.
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        points.into_iter().fold(None, |acc: Option<Bounds>, p| {
            let single = Bounds::new(p.x, p.y, p.x, p.y);
            Some(match acc {
                Some(bounds) => bounds.merge(&single),
                None => single,
            })
        })
    }

    pub fn left(self) -> f32 {
        self.left
    }

    pub fn top(self) -> f32 {
        self.top
    }

    pub fn right(self) -> f32 {
        self.right
    }

    pub fn bottom(self) -> f32 {
        self.bottom
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.right - self.left
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.bottom - self.top
    }

    /// Returns the center point of the bounds
    pub fn center(self) -> Point {
        Point::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    /// Returns the top-left corner as a Point
    pub fn min_point(self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Merges two bounds to create a larger bounds that contains both.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mindmap_core::geometry::{Bounds, Point, Size};
    /// let label = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(100.0, 30.0));
    /// let badge = Bounds::new_from_top_left(Point::new(10.0, 40.0), Size::new(120.0, 80.0));
    ///
    /// let combined = label.merge(&badge);
    /// assert_eq!(combined.left(), 0.0);
    /// assert_eq!(combined.top(), 0.0);
    /// assert_eq!(combined.width(), 130.0);
    /// assert_eq!(combined.height(), 120.0);
    /// ```
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }

    /// Moves the bounds by the specified offset.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mindmap_core::geometry::{Bounds, Point, Size};
    /// let bounds = Bounds::new_from_top_left(Point::new(10.0, 20.0), Size::new(50.0, 30.0));
    ///
    /// let moved = bounds.translate(Point::new(100.0, 50.0));
    /// assert_eq!(moved.left(), 110.0);
    /// assert_eq!(moved.top(), 70.0);
    /// assert_eq!(moved.width(), 50.0);
    /// assert_eq!(moved.height(), 30.0);
    /// ```
    pub fn translate(&self, offset: Point) -> Self {
        Self {
            left: self.left + offset.x,
            top: self.top + offset.y,
            right: self.right + offset.x,
            bottom: self.bottom + offset.y,
        }
    }
}

impl Serialize for Bounds {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let center = self.center();
        let mut state = serializer.serialize_struct("Bounds", 8)?;
        state.serialize_field("left", &self.left)?;
        state.serialize_field("top", &self.top)?;
        state.serialize_field("right", &self.right)?;
        state.serialize_field("bottom", &self.bottom)?;
        state.serialize_field("width", &self.width())?;
        state.serialize_field("height", &self.height())?;
        state.serialize_field("centerX", &center.x)?;
        state.serialize_field("centerY", &center.y)?;
        state.end()
    }
}

/// The axis along which a renderer lays out hierarchy depth.
///
/// The *primary* coordinate grows with depth: a parent is rendered before
/// its children along it. The *secondary* coordinate is the orthogonal one,
/// used to break ties between candidates on the same level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Depth grows left to right; parents sit left of their children.
    #[default]
    Horizontal,
    /// Depth grows top to bottom; parents sit above their children.
    Vertical,
}

impl Axis {
    /// Coordinate of `point` along the depth axis.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mindmap_core::geometry::{Axis, Point};
    /// let p = Point::new(3.0, 7.0);
    /// assert_eq!(Axis::Horizontal.primary(p), 3.0);
    /// assert_eq!(Axis::Vertical.primary(p), 7.0);
    /// assert_eq!(Axis::Vertical.secondary(p), 3.0);
    /// ```
    pub fn primary(self, point: Point) -> f32 {
        match self {
            Axis::Horizontal => point.x,
            Axis::Vertical => point.y,
        }
    }

    /// Coordinate of `point` across the depth axis.
    pub fn secondary(self, point: Point) -> f32 {
        match self {
            Axis::Horizontal => point.y,
            Axis::Vertical => point.x,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_new() {
        let point = Point::new(10.0, 20.0);
        assert_eq!(point.x(), 10.0);
        assert_eq!(point.y(), 20.0);
    }

    #[test]
    fn test_point_is_zero() {
        assert!(Point::default().is_zero());
        assert!(!Point::new(0.0, 0.1).is_zero());
    }

    #[test]
    fn test_point_distance() {
        let a = Point::new(1.0, 1.0);
        let b = Point::new(4.0, 5.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(b.distance(a), 5.0);
        assert_eq!(a.distance(a), 0.0);
    }

    #[test]
    fn test_point_round() {
        assert_eq!(Point::new(-2.4, 7.5).round(), Point::new(-2.0, 8.0));
        assert_eq!(Point::new(-2.5, -0.5).round(), Point::new(-2.0, 0.0));
    }

    #[test]
    fn test_point_to_bounds() {
        let bounds = Point::new(100.0, 50.0).to_bounds(Size::new(36.0, 30.0));
        assert_eq!(bounds.left(), 82.0);
        assert_eq!(bounds.top(), 35.0);
        assert_eq!(bounds.right(), 118.0);
        assert_eq!(bounds.bottom(), 65.0);
        assert_eq!(bounds.center(), Point::new(100.0, 50.0));
    }

    #[test]
    fn test_bounds_new_from_top_left() {
        let bounds = Bounds::new_from_top_left(Point::new(10.0, 20.0), Size::new(30.0, 40.0));
        assert_eq!(bounds.left(), 10.0);
        assert_eq!(bounds.top(), 20.0);
        assert_eq!(bounds.right(), 40.0);
        assert_eq!(bounds.bottom(), 60.0);
        assert_eq!(bounds.width(), 30.0);
        assert_eq!(bounds.height(), 40.0);
        assert_eq!(bounds.min_point(), Point::new(10.0, 20.0));
    }

    #[test]
    fn test_bounds_from_points() {
        assert_eq!(Bounds::from_points(Vec::<Point>::new()), None);

        let bounds = Bounds::from_points([
            Point::new(5.0, 9.0),
            Point::new(-1.0, 3.0),
            Point::new(2.0, 12.0),
        ])
        .expect("non-empty");
        assert_eq!(bounds, Bounds::new(-1.0, 3.0, 5.0, 12.0));
    }

    #[test]
    fn test_bounds_serialize_includes_derived_fields() {
        let bounds = Bounds::new(0.0, 0.0, 10.0, 4.0);
        let value = serde_json::to_value(bounds).expect("serializable");
        assert_eq!(value["width"], 10.0);
        assert_eq!(value["height"], 4.0);
        assert_eq!(value["centerX"], 5.0);
        assert_eq!(value["centerY"], 2.0);
    }

    #[test]
    fn test_axis_deserialize() {
        #[derive(Deserialize)]
        struct Wrapper {
            axis: Axis,
        }
        let wrapper: Wrapper = serde_json::from_str(r#"{"axis":"vertical"}"#).expect("valid");
        assert_eq!(wrapper.axis, Axis::Vertical);
        assert_eq!(Axis::default(), Axis::Horizontal);
    }
}
