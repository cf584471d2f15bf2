//! In-memory dependency tree carrying both syntactic and semantic edges.
//!
//! Nodes live in a dense arena indexed by [`NodeId`]; node 0 is the virtual
//! root and owns no token. Edges are stored as ids on the dependent, so
//! nodes never point at each other.

pub mod node;
pub mod systems;

use arbor_protocol::{NodeId, Token};

use node::Head;
pub use node::{DependencyNode, SemanticArc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyTree {
    nodes: Vec<DependencyNode>,
}

impl Default for DependencyTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DependencyTree {
    /// A tree holding only the virtual root.
    pub fn new() -> Self {
        Self {
            nodes: vec![DependencyNode::root()],
        }
    }

    /// One node per token, in order, with ids `1..=N`. No heads are set.
    pub fn from_tokens(tokens: impl IntoIterator<Item = Token>) -> Self {
        let mut tree = Self::new();
        for token in tokens {
            tree.add_token(token);
        }
        tree
    }

    /// Appends a node for `token` and returns its id.
    pub fn add_token(&mut self, token: Token) -> NodeId {
        let id = NodeId::for_token(self.token_count());
        self.nodes.push(DependencyNode::with_token(id, Some(token)));
        id
    }

    /// Attaches `child` to `head` with `relation`.
    ///
    /// # Panics
    /// If either id is outside the tree or `child` is the root. Both mean the
    /// caller resolved ids incorrectly.
    pub fn set_head(&mut self, child: NodeId, head: NodeId, relation: impl Into<String>) {
        assert!(!child.is_root(), "the virtual root cannot have a head");
        assert!(
            head.index() < self.len(),
            "head {} outside tree of {} nodes",
            head,
            self.len()
        );
        self.node_mut(child).set_head(Head {
            id: head,
            relation: relation.into(),
        });
    }

    /// Number of nodes including the virtual root (`N + 1`).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the tree has no token nodes.
    pub fn is_empty(&self) -> bool {
        self.token_count() == 0
    }

    pub fn token_count(&self) -> usize {
        self.nodes.len() - 1
    }

    /// # Panics
    /// If `id` is outside the tree.
    pub fn node(&self, id: NodeId) -> &DependencyNode {
        match self.nodes.get(id.index()) {
            Some(node) => node,
            None => panic!("node {} outside tree of {} nodes", id, self.nodes.len()),
        }
    }

    /// # Panics
    /// If `id` is outside the tree.
    pub fn node_mut(&mut self, id: NodeId) -> &mut DependencyNode {
        let len = self.nodes.len();
        match self.nodes.get_mut(id.index()) {
            Some(node) => node,
            None => panic!("node {} outside tree of {} nodes", id, len),
        }
    }

    /// All nodes, root first.
    pub fn nodes(&self) -> impl Iterator<Item = &DependencyNode> {
        self.nodes.iter()
    }

    /// Token nodes `1..=N` in ascending id order.
    pub fn token_nodes(&self) -> impl Iterator<Item = &DependencyNode> {
        self.nodes.iter().skip(1)
    }

    pub fn token_nodes_mut(&mut self) -> impl Iterator<Item = &mut DependencyNode> {
        self.nodes.iter_mut().skip(1)
    }

    /// Syntactic dependents of `head`, ascending by id.
    pub fn dependents(&self, head: NodeId) -> impl Iterator<Item = &DependencyNode> {
        self.token_nodes().filter(move |node| node.head_id() == Some(head))
    }

    /// Nodes marked as predicates, ascending by id.
    pub fn predicates(&self) -> impl Iterator<Item = &DependencyNode> {
        self.token_nodes().filter(|node| node.is_predicate())
    }

    /// True when every token node reaches the root through head links.
    pub fn is_connected(&self) -> bool {
        systems::connectivity::detached_nodes(self).is_empty()
    }
}
