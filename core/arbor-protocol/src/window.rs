#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Granularity of the spans a document is split into for labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Window {
    /// One span per sentence.
    #[default]
    Sentence,
    /// The whole document as a single span.
    Document,
}

impl core::str::FromStr for Window {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sentence" => Ok(Window::Sentence),
            "document" => Ok(Window::Document),
            other => Err(format!("unknown window '{}', expected 'sentence' or 'document'", other)),
        }
    }
}
