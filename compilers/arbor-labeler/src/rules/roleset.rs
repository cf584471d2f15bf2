use arbor_protocol::RolesetModel;
use arbor_tree::DependencyTree;

use crate::cascade::Transformer;
use crate::error::TransformError;

/// Assigns a role-set to every predicate node from its lemma.
pub struct RolesetClassifier {
    model: RolesetModel,
}

impl RolesetClassifier {
    pub fn new(model: RolesetModel) -> Self {
        Self { model }
    }
}

impl Transformer for RolesetClassifier {
    fn apply(&mut self, tree: &mut DependencyTree) -> Result<(), TransformError> {
        for node in tree.token_nodes_mut().filter(|n| n.is_predicate()) {
            let Some(lemma) = node.token().map(|t| t.lemma_or_form()) else {
                continue;
            };
            // Nothing to build a sense from
            if lemma.is_empty() {
                continue;
            }
            let roleset = self.model.roleset_for(&lemma);
            node.set_roleset(roleset);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_protocol::{NodeId, Token};

    #[test]
    fn test_only_predicates_get_a_sense() {
        let mut tree = DependencyTree::from_tokens(vec![
            Token::new("I").with_pos("PRP"),
            Token::new("had").with_pos("VBD").with_lemma("have"),
            Token::new("Lunch").with_pos("NN"),
            Token::new("Ran").with_pos("VBD"),
            Token::new("").with_pos("VB"),
        ]);
        tree.node_mut(NodeId(2)).mark_predicate();
        tree.node_mut(NodeId(4)).mark_predicate();
        tree.node_mut(NodeId(5)).mark_predicate();

        RolesetClassifier::new(RolesetModel::english())
            .apply(&mut tree)
            .unwrap();

        assert_eq!(tree.node(NodeId(2)).roleset(), Some("have.03"));
        // No lemma: lowercased form
        assert_eq!(tree.node(NodeId(4)).roleset(), Some("ran.01"));
        assert_eq!(tree.node(NodeId(3)).roleset(), None);
        assert_eq!(tree.node(NodeId(5)).roleset(), None);
    }
}
