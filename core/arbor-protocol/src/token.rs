#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Externally supplied token data. Immutable once attached to a tree node.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct Token {
    pub text: String,
    pub pos: Option<String>,
    pub lemma: Option<String>,
}

impl Token {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            pos: None,
            lemma: None,
        }
    }

    pub fn with_pos(mut self, pos: impl Into<String>) -> Self {
        self.pos = Some(pos.into());
        self
    }

    pub fn with_lemma(mut self, lemma: impl Into<String>) -> Self {
        self.lemma = Some(lemma.into());
        self
    }

    /// Lemma if the upstream lemmatizer produced one, else the lowercased surface form.
    pub fn lemma_or_form(&self) -> String {
        match &self.lemma {
            Some(lemma) if !lemma.is_empty() => lemma.clone(),
            _ => self.text.to_lowercase(),
        }
    }
}

/// A token together with its zero-based position inside the span it came from.
/// Lets a sink map output back onto its own annotation store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenRef<'a> {
    pub position: usize,
    pub token: &'a Token,
}
