//! Error types for scene loading and attribute parsing.

use thiserror::Error;

/// Errors produced while reading a scene or decoding shape geometry.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("malformed scene document: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("invalid path data at byte {offset}: `{data}`")]
    InvalidPathData { data: String, offset: usize },

    #[error("invalid points list at byte {offset}: `{list}`")]
    InvalidPoints { list: String, offset: usize },
}
