use arbor_protocol::{NodeId, SrlModel};
use arbor_tree::{DependencyTree, SemanticArc};

use crate::cascade::Transformer;
use crate::error::TransformError;

/// Turns the syntactic dependents of each predicate into semantic arguments.
pub struct SrlLabeler {
    model: SrlModel,
}

impl SrlLabeler {
    pub fn new(model: SrlModel) -> Self {
        Self { model }
    }

    fn is_subject(&self, relation: Option<&str>) -> bool {
        relation.is_some_and(|rel| self.model.subject_relations.iter().any(|r| r == rel))
    }

    /// The predicate whose subject `pred` borrows, if `pred` is controlled
    /// and has no subject of its own.
    fn controller_of(&self, tree: &DependencyTree, pred: NodeId) -> Option<NodeId> {
        let node = tree.node(pred);
        let relation = node.head_relation()?;
        if !self.model.control_relations.iter().any(|r| r == relation) {
            return None;
        }
        if tree.dependents(pred).any(|dep| self.is_subject(dep.head_relation())) {
            return None;
        }
        let head = node.head_id()?;
        tree.node(head).is_predicate().then_some(head)
    }
}

impl Transformer for SrlLabeler {
    fn apply(&mut self, tree: &mut DependencyTree) -> Result<(), TransformError> {
        let predicates: Vec<NodeId> = tree.predicates().map(|n| n.id()).collect();

        // Collected first, the tree is only read while walking it
        let mut arcs: Vec<(NodeId, SemanticArc)> = Vec::new();
        for &pred in &predicates {
            for dep in tree.dependents(pred) {
                if let Some(role) = dep.head_relation().and_then(|rel| self.model.role_for(rel)) {
                    arcs.push((dep.id(), SemanticArc::new(pred, role)));
                }
            }

            if let Some(controller) = self.controller_of(tree, pred) {
                for subject in tree
                    .dependents(controller)
                    .filter(|dep| self.is_subject(dep.head_relation()))
                {
                    arcs.push((subject.id(), SemanticArc::new(pred, self.model.control_role.as_str())));
                }
            }
        }

        for (node, arc) in arcs {
            tree.node_mut(node).add_semantic_arc(arc);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_protocol::Token;

    fn tagged(words: &[(&str, &str)]) -> DependencyTree {
        DependencyTree::from_tokens(words.iter().map(|(w, p)| Token::new(*w).with_pos(*p)))
    }

    fn arcs_of(tree: &DependencyTree, id: u32) -> Vec<(u32, String)> {
        tree.node(NodeId(id))
            .semantic_arcs()
            .iter()
            .map(|arc| (arc.governor.0, arc.label.clone()))
            .collect()
    }

    #[test]
    fn test_labels_direct_dependents() {
        let mut tree = tagged(&[("John", "NNP"), ("sees", "VBZ"), ("Mary", "NNP"), (".", ".")]);
        tree.set_head(NodeId(1), NodeId(2), "nsubj");
        tree.set_head(NodeId(2), NodeId::ROOT, "root");
        tree.set_head(NodeId(3), NodeId(2), "dobj");
        tree.set_head(NodeId(4), NodeId(2), "punct");
        tree.node_mut(NodeId(2)).mark_predicate();

        SrlLabeler::new(SrlModel::english()).apply(&mut tree).unwrap();

        assert_eq!(arcs_of(&tree, 1), vec![(2, "ARG0".to_string())]);
        assert_eq!(arcs_of(&tree, 3), vec![(2, "ARG1".to_string())]);
        assert!(arcs_of(&tree, 4).is_empty());
        assert!(arcs_of(&tree, 2).is_empty());
    }

    #[test]
    fn test_controlled_predicate_shares_subject() {
        // "John wants to eat apples"
        let mut tree = tagged(&[
            ("John", "NNP"),
            ("wants", "VBZ"),
            ("to", "TO"),
            ("eat", "VB"),
            ("apples", "NNS"),
        ]);
        tree.set_head(NodeId(1), NodeId(2), "nsubj");
        tree.set_head(NodeId(2), NodeId::ROOT, "root");
        tree.set_head(NodeId(3), NodeId(4), "aux");
        tree.set_head(NodeId(4), NodeId(2), "xcomp");
        tree.set_head(NodeId(5), NodeId(4), "dobj");
        tree.node_mut(NodeId(2)).mark_predicate();
        tree.node_mut(NodeId(4)).mark_predicate();

        SrlLabeler::new(SrlModel::english()).apply(&mut tree).unwrap();

        assert_eq!(
            arcs_of(&tree, 1),
            vec![(2, "ARG0".to_string()), (4, "ARG0".to_string())]
        );
        assert_eq!(arcs_of(&tree, 4), vec![(2, "ARG1".to_string())]);
        assert_eq!(arcs_of(&tree, 5), vec![(4, "ARG1".to_string())]);
    }

    #[test]
    fn test_controlled_predicate_with_own_subject() {
        // "John expects Mary to win" with Mary as the subject of "win"
        let mut tree = tagged(&[
            ("John", "NNP"),
            ("expects", "VBZ"),
            ("Mary", "NNP"),
            ("to", "TO"),
            ("win", "VB"),
        ]);
        tree.set_head(NodeId(1), NodeId(2), "nsubj");
        tree.set_head(NodeId(2), NodeId::ROOT, "root");
        tree.set_head(NodeId(3), NodeId(5), "nsubj");
        tree.set_head(NodeId(4), NodeId(5), "aux");
        tree.set_head(NodeId(5), NodeId(2), "xcomp");
        tree.node_mut(NodeId(2)).mark_predicate();
        tree.node_mut(NodeId(5)).mark_predicate();

        SrlLabeler::new(SrlModel::english()).apply(&mut tree).unwrap();

        assert_eq!(arcs_of(&tree, 1), vec![(2, "ARG0".to_string())]);
        assert_eq!(arcs_of(&tree, 3), vec![(5, "ARG0".to_string())]);
    }
}
