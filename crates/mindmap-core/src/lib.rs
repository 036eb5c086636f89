//! Mindmap Core Types and Definitions
//!
//! This crate provides the foundational types shared by the scene provider
//! and the reconstruction pipeline. It includes:
//!
//! - **Geometry**: Points, sizes, bounding boxes and axes ([`geometry`] module)
//! - **Anchors**: The five connection points derived from a node's bounds ([`anchor`] module)
//! - **Identifiers**: Sequential node identifiers ([`identifier::NodeId`])
//! - **Nodes**: The extracted, leveled and nested node shapes ([`node`] module)

pub mod anchor;
pub mod geometry;
pub mod identifier;
pub mod node;
