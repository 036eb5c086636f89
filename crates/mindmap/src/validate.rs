//! Hierarchy validation.

use std::collections::{BTreeMap, HashSet};

use log::{debug, error};

use mindmap_core::node::{HierarchyNode, normalize_text};

use crate::MindmapError;

/// Checks that ids and normalized texts are pairwise distinct.
///
/// # Errors
///
/// Returns [`MindmapError::HierarchyValidationFailed`] with the number of
/// repeated entries. A repeat is an algorithmic bug, never a property of the
/// input scene.
pub fn validate(nodes: &[HierarchyNode]) -> Result<(), MindmapError> {
    let mut ids = HashSet::new();
    let mut texts = HashSet::new();
    let mut per_level: BTreeMap<usize, usize> = BTreeMap::new();
    let mut duplicates = 0;

    for (index, node) in nodes.iter().enumerate() {
        if !ids.insert(node.id) {
            error!(index = index, id:% = node.id; "Duplicate id in hierarchy");
            duplicates += 1;
        }
        let text = normalize_text(&node.text);
        if !texts.insert(text) {
            error!(index = index, text = node.text.as_str(); "Duplicate text in hierarchy");
            duplicates += 1;
        }
        *per_level.entry(node.level).or_default() += 1;
    }

    if duplicates > 0 {
        return Err(MindmapError::HierarchyValidationFailed { duplicates });
    }

    debug!(levels:? = per_level; "Hierarchy validated");
    Ok(())
}
