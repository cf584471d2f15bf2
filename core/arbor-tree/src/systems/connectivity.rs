use arbor_protocol::NodeId;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Dfs;

use crate::DependencyTree;

/// Builds the syntactic graph of `tree`: one edge head -> dependent per node.
/// A token node with no head hangs off the virtual root.
pub fn syntax_graph(tree: &DependencyTree) -> DiGraph<NodeId, ()> {
    let mut graph = DiGraph::with_capacity(tree.len(), tree.len());
    for node in tree.nodes() {
        // Graph indices line up with node ids
        graph.add_node(node.id());
    }

    for node in tree.token_nodes() {
        let head = node.head_id().unwrap_or(NodeId::ROOT);
        graph.add_edge(NodeIndex::new(head.index()), NodeIndex::new(node.id().index()), ());
    }

    graph
}

/// Token nodes that cannot be reached from the root by following head links
/// downwards. Empty for a proper tree; non-empty when heads form a cycle.
pub fn detached_nodes(tree: &DependencyTree) -> Vec<NodeId> {
    let graph = syntax_graph(tree);
    let mut reached = vec![false; graph.node_count()];

    let mut dfs = Dfs::new(&graph, NodeIndex::new(NodeId::ROOT.index()));
    while let Some(idx) = dfs.next(&graph) {
        reached[idx.index()] = true;
    }

    reached
        .iter()
        .enumerate()
        .filter(|(_, seen)| !**seen)
        .map(|(idx, _)| graph[NodeIndex::new(idx)])
        .collect()
}
