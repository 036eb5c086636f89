//! Scene roots: independent coordinate spaces holding shapes in document order.
//!
//! Elements are stored in a flat arena in pre-order, so every element's
//! descendants occupy the contiguous range right after it. Structural
//! queries ([`SceneRoot::descendants`], [`SceneRoot::closest`], ...) are
//! slices and parent walks over that arena.

use mindmap_core::geometry::{Bounds, Point};

use crate::element::{ElementId, RawElement};

/// One scene root (an `<svg>` element) and every shape beneath it.
///
/// The root element itself is stored at index 0 and is not counted as a
/// shape.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneRoot {
    elements: Vec<RawElement>,
}

impl SceneRoot {
    /// The id of the root element.
    pub fn root(&self) -> ElementId {
        ElementId::new(0)
    }

    /// Number of shapes under the root.
    pub fn shape_count(&self) -> usize {
        self.elements.len().saturating_sub(1)
    }

    pub fn get(&self, id: ElementId) -> Option<&RawElement> {
        self.elements.get(id.index())
    }

    /// Every shape under the root in document order.
    pub fn shapes(&self) -> impl Iterator<Item = (ElementId, &RawElement)> {
        self.descendants(self.root())
    }

    /// Descendants of `id` in document order, excluding `id` itself.
    pub fn descendants(&self, id: ElementId) -> impl Iterator<Item = (ElementId, &RawElement)> {
        let range = match self.get(id) {
            Some(element) => id.index() + 1..element.subtree_end().max(id.index() + 1),
            None => 0..0,
        };
        self.elements[range.clone()]
            .iter()
            .zip(range)
            .map(|(element, index)| (ElementId::new(index), element))
    }

    /// Ancestors of `id`, nearest first, excluding `id` itself.
    pub fn ancestors(&self, id: ElementId) -> impl Iterator<Item = (ElementId, &RawElement)> {
        let mut next = self.get(id).and_then(RawElement::parent);
        std::iter::from_fn(move || {
            let current = next?;
            let element = self.get(current)?;
            next = element.parent();
            Some((current, element))
        })
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.get(id).and_then(RawElement::parent)
    }

    /// The nearest element, starting at `id` itself, matching `predicate`.
    pub fn closest(
        &self,
        id: ElementId,
        predicate: impl Fn(&RawElement) -> bool,
    ) -> Option<ElementId> {
        let this = self.get(id)?;
        if predicate(this) {
            return Some(id);
        }
        self.ancestors(id)
            .find(|(_, element)| predicate(element))
            .map(|(ancestor, _)| ancestor)
    }

    /// The first descendant of `id` in document order matching `predicate`.
    pub fn find_descendant(
        &self,
        id: ElementId,
        predicate: impl Fn(&RawElement) -> bool,
    ) -> Option<ElementId> {
        self.descendants(id)
            .find(|(_, element)| predicate(element))
            .map(|(descendant, _)| descendant)
    }

    /// Offset of the element's rendered box relative to the root.
    ///
    /// Sums the translations of the element and of its ancestors below the
    /// root, then adds the top-left corner of the element's native bounds.
    pub fn offset_in_root(&self, id: ElementId) -> Point {
        let Some(element) = self.get(id) else {
            return Point::default();
        };

        let own = element.translation().unwrap_or_default();
        let inherited = self
            .ancestors(id)
            .filter(|(ancestor, _)| *ancestor != self.root())
            .filter_map(|(_, ancestor)| ancestor.translation())
            .fold(Point::default(), Point::add_point);
        let corner = element
            .native_bounds()
            .map(|bounds| bounds.min_point())
            .unwrap_or_default();

        own.add_point(inherited).add_point(corner)
    }
}

/// Incrementally builds a [`SceneRoot`] in document order.
///
/// # Examples
///
/// ```
/// # use mindmap_scene::{RawElement, SceneBuilder};
/// let mut builder = SceneBuilder::new(RawElement::group());
/// builder.open(RawElement::group().with_class("node"));
/// builder.leaf(RawElement::text("Root topic"));
/// builder.close();
/// let scene = builder.finish();
///
/// assert_eq!(scene.shape_count(), 2);
/// ```
#[derive(Debug)]
pub struct SceneBuilder {
    elements: Vec<RawElement>,
    open: Vec<ElementId>,
}

impl SceneBuilder {
    /// Starts a scene whose root element is `root`.
    pub fn new(root: RawElement) -> Self {
        let mut builder = Self {
            elements: Vec::new(),
            open: Vec::new(),
        };
        builder.open(root);
        builder
    }

    /// Appends `element` under the innermost open element and opens it.
    pub fn open(&mut self, mut element: RawElement) -> ElementId {
        let id = ElementId::new(self.elements.len());
        element.set_parent(self.open.last().copied());
        self.elements.push(element);
        self.open.push(id);
        id
    }

    /// Appends `element` under the innermost open element without opening it.
    pub fn leaf(&mut self, element: RawElement) -> ElementId {
        let id = self.open(element);
        self.close();
        id
    }

    /// Closes the innermost open element. The root is never closed here.
    pub fn close(&mut self) {
        if self.open.len() <= 1 {
            return;
        }
        if let Some(id) = self.open.pop() {
            let end = self.elements.len();
            self.elements[id.index()].set_subtree_end(end);
        }
    }

    /// Replaces the native bounds recorded for `id`.
    pub fn set_native_bounds(&mut self, id: ElementId, bounds: Option<Bounds>) {
        if let Some(element) = self.elements.get_mut(id.index()) {
            element.set_native_bounds(bounds);
        }
    }

    /// Closes every open element and returns the scene.
    pub fn finish(mut self) -> SceneRoot {
        let end = self.elements.len();
        for id in self.open.drain(..) {
            self.elements[id.index()].set_subtree_end(end);
        }
        SceneRoot {
            elements: self.elements,
        }
    }
}
