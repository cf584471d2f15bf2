use arbor_protocol::PredicateModel;
use arbor_tree::DependencyTree;

use crate::cascade::Transformer;
use crate::error::TransformError;

/// Marks event heads: nodes whose POS tag has a predicate prefix, unless
/// they hang off their head as an auxiliary or copula.
pub struct PredicateIdentifier {
    model: PredicateModel,
}

impl PredicateIdentifier {
    pub fn new(model: PredicateModel) -> Self {
        Self { model }
    }

    fn is_candidate(&self, pos: Option<&str>, relation: Option<&str>) -> bool {
        let Some(pos) = pos else {
            return false;
        };
        let verbal = self
            .model
            .predicate_pos_prefixes
            .iter()
            .any(|prefix| pos.starts_with(prefix.as_str()));
        let excluded = relation.is_some_and(|rel| self.model.excluded_relations.iter().any(|r| r == rel));
        verbal && !excluded
    }
}

impl Transformer for PredicateIdentifier {
    fn apply(&mut self, tree: &mut DependencyTree) -> Result<(), TransformError> {
        for node in tree.token_nodes_mut() {
            if self.is_candidate(node.pos(), node.head_relation()) {
                node.mark_predicate();
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_protocol::{NodeId, Token};

    #[test]
    fn test_marks_verbs_but_not_auxiliaries() {
        // "John has eaten ."
        let mut tree = DependencyTree::from_tokens(vec![
            Token::new("John").with_pos("NNP"),
            Token::new("has").with_pos("VBZ"),
            Token::new("eaten").with_pos("VBN"),
            Token::new(".").with_pos("."),
        ]);
        tree.set_head(NodeId(1), NodeId(3), "nsubj");
        tree.set_head(NodeId(2), NodeId(3), "aux");
        tree.set_head(NodeId(3), NodeId::ROOT, "root");
        tree.set_head(NodeId(4), NodeId(3), "punct");

        PredicateIdentifier::new(PredicateModel::english())
            .apply(&mut tree)
            .unwrap();

        let preds: Vec<NodeId> = tree.predicates().map(|n| n.id()).collect();
        assert_eq!(preds, vec![NodeId(3)]);
    }

    #[test]
    fn test_universal_tags_and_missing_pos() {
        let mut tree = DependencyTree::from_tokens(vec![Token::new("Go").with_pos("VERB"), Token::new("now")]);
        tree.set_head(NodeId(1), NodeId::ROOT, "root");
        tree.set_head(NodeId(2), NodeId(1), "advmod");

        PredicateIdentifier::new(PredicateModel::english())
            .apply(&mut tree)
            .unwrap();

        assert!(tree.node(NodeId(1)).is_predicate());
        assert!(!tree.node(NodeId(2)).is_predicate());
    }
}
