use std::collections::HashMap;
use std::fmt;

use arbor_protocol::NodeId;
use arbor_tree::systems::connectivity::detached_nodes;
use arbor_tree::DependencyTree;
use tracing::debug;

use crate::source::{DependencyGraphSource, TokenSource};

/// Why a span could not be turned into a tree. An expected data condition
/// for noisy parses, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unparseable {
    /// The token at this zero-based position has neither a head nor root status.
    MissingHead { position: usize },
    /// These nodes never reach the root through their heads (a cycle).
    Detached { nodes: Vec<NodeId> },
}

impl fmt::Display for Unparseable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unparseable::MissingHead { position } => {
                write!(f, "token {} has no head and is not a root", position)
            }
            Unparseable::Detached { nodes } => {
                let ids: Vec<String> = nodes.iter().map(|n| n.to_string()).collect();
                write!(f, "nodes [{}] are not connected to the root", ids.join(", "))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    Built(DependencyTree),
    Unparseable(Unparseable),
}

impl BuildOutcome {
    pub fn into_tree(self) -> Option<DependencyTree> {
        match self {
            BuildOutcome::Built(tree) => Some(tree),
            BuildOutcome::Unparseable(_) => None,
        }
    }
}

/// Assembles a [`DependencyTree`] from token and dependency-arc collaborators.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeBuilder;

impl TreeBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Primary entry point: Span -> Tree, or the reason the span is skipped.
    ///
    /// Ids are resolved in two passes: every dependency node is numbered
    /// first, then head links are set. A head may appear later in the
    /// enumeration than its dependent.
    ///
    /// # Panics
    /// If a head is neither a token's node nor a virtual top of the span.
    /// That is a broken collaborator, not bad input.
    pub fn build<D, S>(&self, source: &D, span: &S) -> BuildOutcome
    where
        D: TokenSource<S> + DependencyGraphSource<S>,
    {
        // 1. One node per token, POS and lemma attached
        let tree = DependencyTree::from_tokens(source.tokens(span));
        let token_nodes: Vec<Option<D::Node>> = (0..tree.token_count())
            .map(|position| source.token_node(span, position))
            .collect();

        // 2. Dependency node -> id
        let ids = Self::number_nodes(source, span, &token_nodes);

        // 3. Head links
        Self::link_heads::<D, S>(source, tree, &token_nodes, &ids)
    }

    /// A token's own node takes the token's positional id, whatever order the
    /// source lists its nodes in. Any other node flagged as root is the
    /// virtual top and maps to 0. Remaining nodes are left unnumbered.
    fn number_nodes<D, S>(source: &D, span: &S, token_nodes: &[Option<D::Node>]) -> HashMap<D::Node, NodeId>
    where
        D: DependencyGraphSource<S>,
    {
        let mut ids: HashMap<D::Node, NodeId> = token_nodes
            .iter()
            .enumerate()
            .filter_map(|(position, node)| node.clone().map(|node| (node, NodeId::for_token(position))))
            .collect();

        for node in source.dependency_nodes(span) {
            if !ids.contains_key(&node) && source.is_root(&node) {
                ids.insert(node, NodeId::ROOT);
            }
        }
        ids
    }

    fn link_heads<D, S>(
        source: &D,
        mut tree: DependencyTree,
        token_nodes: &[Option<D::Node>],
        ids: &HashMap<D::Node, NodeId>,
    ) -> BuildOutcome
    where
        D: DependencyGraphSource<S>,
    {
        for (position, dep_node) in token_nodes.iter().enumerate() {
            let id = NodeId::for_token(position);

            let Some(dep_node) = dep_node else {
                debug!(position, "token has no dependency node");
                return BuildOutcome::Unparseable(Unparseable::MissingHead { position });
            };

            if source.has_head(dep_node) {
                let head = source.head_of(dep_node);
                let head_id = match ids.get(&head) {
                    Some(head_id) => *head_id,
                    None => panic!(
                        "head {:?} of token {} is neither a token node nor a virtual top of this span",
                        head, position
                    ),
                };
                tree.set_head(id, head_id, source.head_relation(dep_node));
            } else if !source.is_root(dep_node) {
                debug!(position, "token has no head and is not a root");
                return BuildOutcome::Unparseable(Unparseable::MissingHead { position });
            }
        }

        let detached = detached_nodes(&tree);
        if !detached.is_empty() {
            debug!(count = detached.len(), "heads do not reach the root");
            return BuildOutcome::Unparseable(Unparseable::Detached { nodes: detached });
        }

        BuildOutcome::Built(tree)
    }
}
