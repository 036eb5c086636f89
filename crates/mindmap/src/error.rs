//! Error types for mindmap detection.
//!
//! This module provides the main error type [`MindmapError`]. Display strings
//! are meant to be shown to the end user verbatim.

use std::io;

use thiserror::Error;

use mindmap_scene::SceneError;

/// The main error type for mindmap detection.
///
/// Only missing preconditions and invariant violations surface here.
/// Malformed connectors and level mismatches are logged and skipped by the
/// pipeline instead.
#[derive(Debug, Error)]
pub enum MindmapError {
    #[error("No scene content found. Make sure the mindmap is fully loaded and visible.")]
    NoScreenContent,

    #[error("No unique nodes found in the scene.")]
    NoUniqueNodes,

    #[error("Hierarchy validation failed: {duplicates} duplicates found")]
    HierarchyValidationFailed { duplicates: usize },

    #[error("Debug data not available. Run debug mode first.")]
    NoDebugData,

    #[error("Selected root node not found: {0}")]
    RootNotFound(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
