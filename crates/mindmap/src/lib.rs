//! Mindmap reconstruction from rendered vector scenes.
//!
//! A rendered mindmap is a flat soup of labeled shapes and connector curves.
//! This crate recovers the tree it was drawn from:
//!
//! 1. **Extract** unique labeled nodes from every scene root ([`extract`])
//! 2. **Group** nodes into depth levels along the layout axis ([`level`])
//! 3. **Connect** nodes whose anchors touch a connector's ends ([`connect`])
//! 4. **Resolve** one parent per child ([`resolve`])
//! 5. **Build** the hierarchy breadth-first from a root ([`hierarchy`])
//! 6. **Validate** and **nest** the result ([`validate`], [`tree`])
//!
//! [`session::DetectionSession`] runs the whole pipeline and keeps the last
//! run's intermediate structures for rebuilding from another root.
//!
//! # Example
//!
//! ```
//! use mindmap::{config::DetectConfig, session::DetectionSession};
//! use mindmap_scene::SvgDocument;
//!
//! let svg = r#"<svg xmlns="http://www.w3.org/2000/svg">
//!   <g class="node" transform="translate(0,100)"><text>Topic</text></g>
//!   <g class="node" transform="translate(100,100)"><text>Branch</text></g>
//!   <path d="M18,100 L82,100"/>
//! </svg>"#;
//!
//! let document = SvgDocument::parse(svg)?;
//! let mut session = DetectionSession::new(DetectConfig::default())?;
//! let result = session.detect(&document)?;
//!
//! assert_eq!(result.meta.node_count, 2);
//! assert_eq!(result.tree[0].title, "Topic");
//! assert_eq!(result.tree[0].children[0].title, "Branch");
//! # Ok::<(), mindmap::MindmapError>(())
//! ```

pub mod config;
pub mod connect;
mod error;
pub mod expand;
pub mod extract;
pub mod filter;
pub mod hierarchy;
pub mod level;
pub mod resolve;
pub mod session;
pub mod tree;
pub mod validate;

pub use mindmap_core::{anchor, geometry, identifier, node};

pub use error::MindmapError;

use mindmap_core::{identifier::NodeId, node::Node};

/// Looks up a node by id.
///
/// Extraction assigns ids in list order, so the id's index is tried first.
pub(crate) fn node_by_id(nodes: &[Node], id: NodeId) -> Option<&Node> {
    nodes
        .get(id.index())
        .filter(|node| node.id() == id)
        .or_else(|| nodes.iter().find(|node| node.id() == id))
}
