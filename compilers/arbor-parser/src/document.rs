//! An in-memory document that implements every collaborator trait. The CoNLL
//! reader produces one; tests and embedders can assemble one by hand.

use std::ops::Range;

use arbor_protocol::{Token, Window};

use crate::source::{DependencyGraphSource, SpanSource, TokenSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeadTarget {
    /// The sentence's virtual top node.
    Top,
    /// Another token, by zero-based position in the sentence.
    Token(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Attachment {
    target: HeadTarget,
    relation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sentence {
    tokens: Vec<Token>,
    heads: Vec<Option<Attachment>>,
    roots: Vec<bool>,
    has_top: bool,
}

impl Sentence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a token with no attachment yet and returns its position.
    pub fn push(&mut self, token: Token) -> usize {
        self.tokens.push(token);
        self.heads.push(None);
        self.roots.push(false);
        self.tokens.len() - 1
    }

    /// Attaches the token at `dependent` to the token at `head`.
    pub fn attach(&mut self, dependent: usize, head: usize, relation: impl Into<String>) {
        assert!(head < self.tokens.len(), "head position {} out of range", head);
        self.set_attachment(dependent, HeadTarget::Token(head), relation.into());
    }

    /// Attaches the token at `dependent` to the virtual top node.
    pub fn attach_to_top(&mut self, dependent: usize, relation: impl Into<String>) {
        self.has_top = true;
        self.set_attachment(dependent, HeadTarget::Top, relation.into());
    }

    /// Flags the token at `position` as the sentence root without giving it a head.
    pub fn mark_root(&mut self, position: usize) {
        assert!(position < self.tokens.len(), "root position {} out of range", position);
        self.roots[position] = true;
    }

    fn set_attachment(&mut self, dependent: usize, target: HeadTarget, relation: String) {
        assert!(dependent < self.tokens.len(), "dependent position {} out of range", dependent);
        self.heads[dependent] = Some(Attachment { target, relation });
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Identity of a dependency node inside a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocNode {
    Top { sentence: usize },
    Token { sentence: usize, position: usize },
}

/// Spans are ranges of sentence indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    sentences: Vec<Sentence>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sentence: Sentence) {
        self.sentences.push(sentence);
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    fn attachment(&self, node: &DocNode) -> Option<&Attachment> {
        match *node {
            DocNode::Top { .. } => None,
            DocNode::Token { sentence, position } => self.sentences[sentence].heads[position].as_ref(),
        }
    }
}

impl From<Vec<Sentence>> for Document {
    fn from(sentences: Vec<Sentence>) -> Self {
        Self { sentences }
    }
}

impl SpanSource for Document {
    type Span = Range<usize>;

    fn spans(&self, window: Window) -> Vec<Range<usize>> {
        match window {
            Window::Sentence => (0..self.sentences.len()).map(|i| i..i + 1).collect(),
            Window::Document if self.sentences.is_empty() => Vec::new(),
            Window::Document => vec![0..self.sentences.len()],
        }
    }
}

impl TokenSource<Range<usize>> for Document {
    fn tokens(&self, span: &Range<usize>) -> Vec<Token> {
        self.sentences[span.clone()]
            .iter()
            .flat_map(|s| s.tokens.iter().cloned())
            .collect()
    }
}

impl DependencyGraphSource<Range<usize>> for Document {
    type Node = DocNode;

    fn dependency_nodes(&self, span: &Range<usize>) -> Vec<DocNode> {
        let mut nodes = Vec::new();
        for sentence in span.clone() {
            if self.sentences[sentence].has_top {
                nodes.push(DocNode::Top { sentence });
            }
            nodes.extend((0..self.sentences[sentence].len()).map(|position| DocNode::Token { sentence, position }));
        }
        nodes
    }

    fn token_node(&self, span: &Range<usize>, position: usize) -> Option<DocNode> {
        let mut offset = position;
        for sentence in span.clone() {
            let len = self.sentences[sentence].len();
            if offset < len {
                return Some(DocNode::Token { sentence, position: offset });
            }
            offset -= len;
        }
        None
    }

    fn is_root(&self, node: &DocNode) -> bool {
        match *node {
            DocNode::Top { .. } => true,
            DocNode::Token { sentence, position } => self.sentences[sentence].roots[position],
        }
    }

    fn has_head(&self, node: &DocNode) -> bool {
        self.attachment(node).is_some()
    }

    fn head_of(&self, node: &DocNode) -> DocNode {
        let sentence = match *node {
            DocNode::Top { sentence } | DocNode::Token { sentence, .. } => sentence,
        };
        match self.attachment(node).map(|a| a.target) {
            Some(HeadTarget::Token(position)) => DocNode::Token { sentence, position },
            Some(HeadTarget::Top) => DocNode::Top { sentence },
            None => panic!("head_of called on {:?}, which has no head", node),
        }
    }

    fn head_relation(&self, node: &DocNode) -> String {
        self.attachment(node)
            .map(|a| a.relation.clone())
            .unwrap_or_default()
    }
}
