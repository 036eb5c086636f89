//! Nesting of the placed node list into the output tree.

use std::collections::HashMap;

use mindmap_core::{identifier::NodeId, node::{HierarchyNode, TreeNode}};

/// Nests `nodes` under their parents.
///
/// Nodes without a parent, or whose parent is not in `nodes`, become roots.
/// Roots and children keep the input order.
pub fn build_tree(nodes: &[HierarchyNode]) -> Vec<TreeNode> {
    let mut index: HashMap<NodeId, usize> = HashMap::with_capacity(nodes.len());
    for (position, node) in nodes.iter().enumerate() {
        index.entry(node.id).or_insert(position);
    }

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
    let mut roots = Vec::new();
    for (position, node) in nodes.iter().enumerate() {
        match node.parent_id.and_then(|parent| index.get(&parent)) {
            Some(&parent) if parent != position => children[parent].push(position),
            _ => roots.push(position),
        }
    }

    roots
        .into_iter()
        .map(|root| assemble(nodes, &children, root))
        .collect()
}

fn assemble(nodes: &[HierarchyNode], children: &[Vec<usize>], position: usize) -> TreeNode {
    let node = &nodes[position];
    TreeNode {
        id: node.id,
        title: node.text.clone(),
        level: node.level,
        children: children[position]
            .iter()
            .map(|&child| assemble(nodes, children, child))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(index: usize, parent: Option<usize>, level: usize) -> HierarchyNode {
        HierarchyNode {
            id: NodeId::new(index),
            text: format!("Topic {index}"),
            parent_id: parent.map(NodeId::new),
            level,
            original_index: index,
        }
    }

    #[test]
    fn test_nests_in_input_order() {
        let nodes = [
            entry(0, None, 0),
            entry(2, Some(0), 1),
            entry(1, Some(0), 1),
            entry(3, Some(1), 2),
        ];
        let tree = build_tree(&nodes);

        assert_eq!(tree.len(), 1);
        let root = &tree[0];
        assert_eq!(root.title, "Topic 0");
        let order: Vec<_> = root.children.iter().map(|c| c.id.index()).collect();
        assert_eq!(order, vec![2, 1]);
        assert_eq!(root.children[1].children[0].id, NodeId::new(3));
        assert_eq!(root.subtree_len(), 4);
    }

    #[test]
    fn test_unresolvable_parent_becomes_root() {
        let nodes = [entry(0, None, 0), entry(5, Some(42), 1)];
        let tree = build_tree(&nodes);
        let roots: Vec<_> = tree.iter().map(|n| n.id.index()).collect();
        assert_eq!(roots, vec![0, 5]);
    }

    #[test]
    fn test_child_listed_before_parent() {
        let nodes = [entry(1, Some(0), 1), entry(0, None, 0)];
        let tree = build_tree(&nodes);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].children[0].id, NodeId::new(1));
    }

    #[test]
    fn test_serialized_shape() {
        let tree = build_tree(&[entry(0, None, 0), entry(1, Some(0), 1)]);
        let json = serde_json::to_value(&tree).expect("serializable");
        assert_eq!(
            json,
            serde_json::json!([{
                "id": "node_0",
                "title": "Topic 0",
                "level": 0,
                "children": [{"id": "node_1", "title": "Topic 1", "level": 1, "children": []}]
            }])
        );
    }
}
