pub mod builder;
pub mod conll;
pub mod document;
pub mod source;

pub use builder::{BuildOutcome, TreeBuilder, Unparseable};
pub use conll::{parse_conll, ConllError};
pub use document::{DocNode, Document, HeadTarget, Sentence};
pub use source::{DependencyGraphSource, SpanSource, TokenSource};
