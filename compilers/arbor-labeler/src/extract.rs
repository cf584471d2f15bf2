use std::collections::HashMap;

use arbor_protocol::{Argument, NodeId, Predicate};
use arbor_tree::DependencyTree;

/// Regroups the per-node semantic arcs of an annotated tree into predicates.
#[derive(Debug, Clone, Copy, Default)]
pub struct SrlExtractor;

impl SrlExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Predicates come out in the order their governors are first met while
    /// scanning nodes by ascending id. Each predicate's arguments keep scan
    /// order, so they ascend by node id; a node with arcs to several
    /// governors is an argument of each of them.
    ///
    /// # Panics
    /// If an arc's governor is the root or lies outside the tree.
    pub fn extract(&self, tree: &DependencyTree) -> Vec<Predicate> {
        let mut predicates: Vec<Predicate> = Vec::new();
        let mut slots: HashMap<NodeId, usize> = HashMap::new();

        for node in tree.token_nodes() {
            for arc in node.semantic_arcs() {
                let governor = arc.governor;
                assert!(
                    !governor.is_root() && governor.index() < tree.len(),
                    "node {} has a semantic arc to governor {} outside 1..={}",
                    node.id(),
                    governor,
                    tree.token_count()
                );

                let slot = *slots.entry(governor).or_insert_with(|| {
                    let sense = tree.node(governor).roleset().map(str::to_string);
                    predicates.push(Predicate::new(governor, sense));
                    predicates.len() - 1
                });
                predicates[slot]
                    .arguments
                    .push(Argument::new(arc.label.as_str(), node.id()));
            }
        }

        predicates
    }
}
