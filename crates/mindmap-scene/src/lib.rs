//! # Mindmap Scene
//!
//! Scene provider for mindmap reconstruction. A rendered mindmap is read as
//! one or more [`SceneRoot`]s, each an independent coordinate space holding
//! shapes in document order: groups, text, rectangles and connector
//! primitives (lines, curves and polylines).
//!
//! ## Usage
//!
//! ```
//! # use mindmap_scene::{SceneProvider, SceneError, SvgDocument};
//!
//! fn main() -> Result<(), SceneError> {
//!     let source = r#"
//!         <svg xmlns="http://www.w3.org/2000/svg">
//!           <g class="node" transform="translate(100,200)"><text>Root topic</text></g>
//!           <path d="M120,200 C160,200 160,150 200,150"/>
//!         </svg>
//!     "#;
//!
//!     let document = SvgDocument::parse(source)?;
//!     let scene = &document.scene_roots()[0];
//!     assert_eq!(scene.shape_count(), 3);
//!     Ok(())
//! }
//! ```
//!
//! Scenes can also be assembled directly with [`SceneBuilder`], which is how
//! non-SVG sources plug into the pipeline.

mod element;
mod error;
pub mod parser;
mod scene;
mod svg;

pub use element::{ConnectorGeometry, ConnectorKind, ElementId, ElementKind, RawElement};
pub use error::SceneError;
pub use scene::{SceneBuilder, SceneRoot};
pub use svg::SvgDocument;

/// A source of scene roots.
pub trait SceneProvider {
    /// Every scene root, in document order.
    fn scene_roots(&self) -> &[SceneRoot];
}

impl SceneProvider for Vec<SceneRoot> {
    fn scene_roots(&self) -> &[SceneRoot] {
        self
    }
}

impl SceneProvider for [SceneRoot] {
    fn scene_roots(&self) -> &[SceneRoot] {
        self
    }
}
