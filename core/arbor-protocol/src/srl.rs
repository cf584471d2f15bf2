use crate::ids::NodeId;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// A token assigned a semantic role relative to one predicate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct Argument {
    pub role: String,
    pub node: NodeId,
}

impl Argument {
    pub fn new(role: impl Into<String>, node: NodeId) -> Self {
        Self {
            role: role.into(),
            node,
        }
    }
}

/// The semantic head of an event and the arguments attached to it.
///
/// `head` is the identity key: a span never yields two predicates with the
/// same head. Arguments keep the order in which they were discovered.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct Predicate {
    pub head: NodeId,
    pub sense: Option<String>,
    pub arguments: Vec<Argument>,
}

impl Predicate {
    pub fn new(head: NodeId, sense: Option<String>) -> Self {
        Self {
            head,
            sense,
            arguments: Vec::new(),
        }
    }
}
