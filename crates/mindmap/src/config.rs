//! Configuration types for mindmap detection.
//!
//! The reconstruction relies on a renderer convention: each depth level sits
//! in its own band along one axis. Every tolerance that encodes that
//! convention lives here so alternate renderers can be supported from
//! configuration. All types implement [`serde::Deserialize`] and every field
//! is optional.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration root.
//! - [`DetectConfig`] - Axis choice and geometric tolerances for detection.
//! - [`ExpandPolicy`] - Bounds for the auto-expand loop.
//!
//! # Example
//!
//! ```
//! # use mindmap::config::AppConfig;
//! # use mindmap_core::geometry::Axis;
//! let config = AppConfig::default();
//! assert_eq!(config.detect().axis(), Axis::Horizontal);
//! assert_eq!(config.detect().level_tolerance(), 5.0);
//! ```

use serde::Deserialize;

use mindmap_core::geometry::{Axis, Size};

use crate::{MindmapError, expand::ExpandPolicy};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Detection configuration section.
    #[serde(default)]
    detect: DetectConfig,
}

impl AppConfig {
    pub fn new(detect: DetectConfig) -> Self {
        Self { detect }
    }

    /// Returns the detection configuration.
    pub fn detect(&self) -> &DetectConfig {
        &self.detect
    }
}

/// Geometric parameters of the detection pipeline.
///
/// Distances are in scene units.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DetectConfig {
    /// Axis along which depth grows.
    axis: Axis,

    /// Quantization step for grouping nodes into depth levels.
    level_tolerance: f32,

    /// Nodes whose rounded positions lie within this distance are duplicates.
    duplicate_radius: f32,

    /// Maximum distance between a connector endpoint and a node anchor.
    anchor_tolerance: f32,

    /// Primary-axis distance difference that decides between two parents.
    primary_tie_break: f32,

    /// Secondary-axis distance difference that decides between two parents.
    secondary_tie_break: f32,

    /// Width of the box assumed for shapes without any geometry.
    fallback_width: f32,

    /// Height of the box assumed for shapes without any geometry.
    fallback_height: f32,

    /// Extra label patterns to reject, in addition to the built-in ones.
    noise_patterns: Vec<String>,

    /// Auto-expand loop bounds.
    expand: ExpandPolicy,
}

impl Default for DetectConfig {
    fn default() -> Self {
        Self {
            axis: Axis::default(),
            level_tolerance: 5.0,
            duplicate_radius: 10.0,
            anchor_tolerance: 25.0,
            primary_tie_break: 50.0,
            secondary_tie_break: 30.0,
            fallback_width: 36.0,
            fallback_height: 30.0,
            noise_patterns: Vec::new(),
            expand: ExpandPolicy::default(),
        }
    }
}

impl DetectConfig {
    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn level_tolerance(&self) -> f32 {
        self.level_tolerance
    }

    pub fn duplicate_radius(&self) -> f32 {
        self.duplicate_radius
    }

    pub fn anchor_tolerance(&self) -> f32 {
        self.anchor_tolerance
    }

    pub fn primary_tie_break(&self) -> f32 {
        self.primary_tie_break
    }

    pub fn secondary_tie_break(&self) -> f32 {
        self.secondary_tie_break
    }

    /// Size of the box centered on a node's position when no geometry is found.
    pub fn fallback_size(&self) -> Size {
        Size::new(self.fallback_width, self.fallback_height)
    }

    pub fn noise_patterns(&self) -> &[String] {
        &self.noise_patterns
    }

    pub fn expand(&self) -> &ExpandPolicy {
        &self.expand
    }

    /// Returns a copy with the given depth axis.
    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    /// Returns a copy with the given level quantization step.
    pub fn with_level_tolerance(mut self, tolerance: f32) -> Self {
        self.level_tolerance = tolerance;
        self
    }

    /// Returns a copy with additional noise patterns.
    pub fn with_noise_patterns(mut self, patterns: impl IntoIterator<Item = String>) -> Self {
        self.noise_patterns.extend(patterns);
        self
    }

    /// Checks that every tolerance is usable.
    ///
    /// # Errors
    ///
    /// Returns [`MindmapError::Config`] when the level step is not strictly
    /// positive or any other distance is negative or not finite.
    pub fn validate(&self) -> Result<(), MindmapError> {
        if !(self.level_tolerance.is_finite() && self.level_tolerance > 0.0) {
            return Err(MindmapError::Config(format!(
                "level_tolerance must be a positive number, got {}",
                self.level_tolerance
            )));
        }

        let distances = [
            ("duplicate_radius", self.duplicate_radius),
            ("anchor_tolerance", self.anchor_tolerance),
            ("primary_tie_break", self.primary_tie_break),
            ("secondary_tie_break", self.secondary_tie_break),
            ("fallback_width", self.fallback_width),
            ("fallback_height", self.fallback_height),
        ];
        for (name, value) in distances {
            if !(value.is_finite() && value >= 0.0) {
                return Err(MindmapError::Config(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }

        Ok(())
    }
}
