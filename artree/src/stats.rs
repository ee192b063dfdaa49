//! Structural statistics for an [`AdaptiveRadixTree`](crate::tree::AdaptiveRadixTree).
//!
//! Useful for checking how keys spread across the node shapes, how dense those nodes are,
//! and how deep the tree has grown.

use std::collections::HashMap;

use crate::node::Node;
use crate::partials::Partial;

pub trait TreeStatsTrait {
    fn get_tree_stats(&self) -> TreeStats;
}

#[derive(Debug, Default, Clone)]
pub struct NodeStats {
    pub width: usize,
    pub node_type: String,
    pub total_nodes: usize,
    pub total_children: usize,
    pub density: f64,
}

#[derive(Debug, Default, Clone)]
pub struct TreeStats {
    /// Keyed by node shape: "Node4", "Node16", "Node48", "Node256".
    pub node_stats: HashMap<String, NodeStats>,
    pub num_leaves: usize,
    /// Leaf values plus terminal values held by inner nodes.
    pub num_values: usize,
    pub num_inner_nodes: usize,
    pub total_density: f64,
    pub max_height: usize,
}

impl TreeStats {
    /// Number of inner nodes of the given shape, 0 if there are none.
    pub fn nodes_of_type(&self, node_type: &str) -> usize {
        self.node_stats
            .get(node_type)
            .map(|ns| ns.total_nodes)
            .unwrap_or(0)
    }

    pub(crate) fn finalize(&mut self) {
        let mut total_children = 0;
        let mut total_width = 0;
        for ns in self.node_stats.values_mut() {
            total_children += ns.total_children;
            total_width += ns.width * ns.total_nodes;
            ns.density = ns.total_children as f64 / (ns.width * ns.total_nodes) as f64;
        }
        self.num_inner_nodes = self.node_stats.values().map(|ns| ns.total_nodes).sum();
        self.total_density = if total_width == 0 {
            0.0
        } else {
            total_children as f64 / total_width as f64
        };
    }
}

pub(crate) fn update_tree_stats<P: Partial, V>(tree_stats: &mut TreeStats, node: &Node<P, V>) {
    let node_type_name = node.type_name();
    let num_children = node.num_children();

    tree_stats
        .node_stats
        .entry(node_type_name.to_string())
        .and_modify(|e| {
            e.total_nodes += 1;
            e.total_children += num_children;
        })
        .or_insert(NodeStats {
            width: node.capacity(),
            node_type: node_type_name.to_string(),
            total_nodes: 1,
            total_children: num_children,
            density: 0.0,
        });
}
