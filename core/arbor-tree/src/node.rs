use arbor_protocol::{NodeId, Token};
use bitflags::bitflags;

bitflags! {
    /// Marks set on a node by the annotation stages.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub(crate) struct NodeFlags: u8 {
        /// The node heads an event and may govern semantic arcs.
        const PREDICATE = 1;
    }
}

/// Syntactic attachment of a node. Id and relation are always set together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Head {
    pub(crate) id: NodeId,
    pub(crate) relation: String,
}

/// Labeled edge from a predicate (governor) to this node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticArc {
    pub governor: NodeId,
    pub label: String,
}

impl SemanticArc {
    pub fn new(governor: NodeId, label: impl Into<String>) -> Self {
        Self {
            governor,
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyNode {
    id: NodeId,
    /// `None` only for the virtual root.
    token: Option<Token>,
    head: Option<Head>,
    flags: NodeFlags,
    roleset: Option<String>,
    semantic_arcs: Vec<SemanticArc>,
}

impl DependencyNode {
    pub(crate) fn root() -> Self {
        Self::with_token(NodeId::ROOT, None)
    }

    pub(crate) fn with_token(id: NodeId, token: Option<Token>) -> Self {
        Self {
            id,
            token,
            head: None,
            flags: NodeFlags::empty(),
            roleset: None,
            semantic_arcs: Vec::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    pub fn form(&self) -> &str {
        self.token.as_ref().map_or("", |t| t.text.as_str())
    }

    pub fn pos(&self) -> Option<&str> {
        self.token.as_ref().and_then(|t| t.pos.as_deref())
    }

    pub fn lemma(&self) -> Option<&str> {
        self.token.as_ref().and_then(|t| t.lemma.as_deref())
    }

    pub fn head_id(&self) -> Option<NodeId> {
        self.head.as_ref().map(|h| h.id)
    }

    pub fn head_relation(&self) -> Option<&str> {
        self.head.as_ref().map(|h| h.relation.as_str())
    }

    pub(crate) fn set_head(&mut self, head: Head) {
        self.head = Some(head);
    }

    pub fn is_predicate(&self) -> bool {
        self.flags.contains(NodeFlags::PREDICATE)
    }

    pub fn mark_predicate(&mut self) {
        self.flags.insert(NodeFlags::PREDICATE);
    }

    /// Role-set (sense) assigned by the role-set classifier.
    pub fn roleset(&self) -> Option<&str> {
        self.roleset.as_deref()
    }

    pub fn set_roleset(&mut self, roleset: impl Into<String>) {
        self.roleset = Some(roleset.into());
    }

    /// Semantic arcs in which this node is the dependent, in the order they were added.
    pub fn semantic_arcs(&self) -> &[SemanticArc] {
        &self.semantic_arcs
    }

    pub fn add_semantic_arc(&mut self, arc: SemanticArc) {
        self.semantic_arcs.push(arc);
    }
}
