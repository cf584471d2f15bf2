//! Capabilities the surrounding system supplies to build a tree for a span.

use std::fmt::Debug;
use std::hash::Hash;

use arbor_protocol::{Token, Window};

/// Splits a document into independently processed spans.
pub trait SpanSource {
    type Span;

    /// Spans in document order.
    fn spans(&self, window: Window) -> Vec<Self::Span>;
}

pub trait TokenSource<S> {
    /// Tokens of `span` in order, with POS and lemma attached.
    fn tokens(&self, span: &S) -> Vec<Token>;
}

/// Read access to an externally produced dependency parse.
///
/// A `Node` is whatever identifies a dependency node in the caller's store.
/// The tree builder numbers the node covering the token at position `p` as
/// `p + 1`, and a root node that covers no token (a virtual top) as 0. The
/// order of `dependency_nodes` does not affect numbering.
pub trait DependencyGraphSource<S> {
    type Node: Clone + Eq + Hash + Debug;

    /// All dependency nodes of `span`, in order.
    fn dependency_nodes(&self, span: &S) -> Vec<Self::Node>;

    /// The dependency node covering the token at zero-based `position`.
    fn token_node(&self, span: &S, position: usize) -> Option<Self::Node>;

    fn is_root(&self, node: &Self::Node) -> bool;

    fn has_head(&self, node: &Self::Node) -> bool;

    /// Only called when `has_head(node)` is true.
    fn head_of(&self, node: &Self::Node) -> Self::Node;

    /// Only called when `has_head(node)` is true.
    fn head_relation(&self, node: &Self::Node) -> String;
}
