//! Model resources for the three annotation stages.
//!
//! Each resource is a plain data table. On disk it is an `rkyv` archive that
//! is validated before use; the bundled English tables are built in code.

use rkyv::{Archive, Deserialize, Serialize};
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Language code the bundled resources are built for.
pub const DEFAULT_LANGUAGE: &str = "en";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ModelKind {
    PredicateId,
    Roleset,
    Srl,
}

impl core::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            ModelKind::PredicateId => "predicate-identification",
            ModelKind::Roleset => "role-set",
            ModelKind::Srl => "semantic-role",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("no bundled {kind} model for language '{language}'")]
    NoBundledModel { kind: ModelKind, language: String },
    #[error("malformed {kind} model: {details}")]
    Malformed { kind: ModelKind, details: String },
    #[error("failed to encode {kind} model: {details}")]
    Encode { kind: ModelKind, details: String },
}

/// Marks nodes that head an event.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct PredicateModel {
    pub language: String,
    /// A node is a candidate when its POS tag starts with one of these.
    pub predicate_pos_prefixes: Vec<String>,
    /// Candidates attached to their head by one of these relations are not predicates.
    pub excluded_relations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct SenseEntry {
    pub lemma: String,
    pub roleset: String,
}

/// Picks a role-set (sense) for each predicate by lemma.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct RolesetModel {
    pub language: String,
    /// Sense number used when the lemma has no entry, e.g. `01` => `run.01`.
    pub default_sense: String,
    pub senses: Vec<SenseEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct RoleRule {
    pub relation: String,
    pub role: String,
}

/// Maps syntactic relations under a predicate to semantic roles.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct SrlModel {
    pub language: String,
    pub rules: Vec<RoleRule>,
    /// A predicate attached to another predicate by one of these relations
    /// shares that predicate's subject ("John wants to eat").
    pub control_relations: Vec<String>,
    /// Relations that mark the subject to be shared.
    pub subject_relations: Vec<String>,
    /// Role the shared subject takes under the embedded predicate.
    pub control_role: String,
}

/// Behaviour shared by the three resource tables.
pub trait ModelResource: Sized {
    const KIND: ModelKind;

    /// Language code the resource was built for.
    fn language(&self) -> &str;

    /// The resource shipped with the crate for `language`.
    fn bundled(language: &str) -> Result<Self, ModelError>;

    /// Validates and decodes an archived resource.
    fn from_bytes(bytes: &[u8]) -> Result<Self, ModelError>;

    fn to_bytes(&self) -> Result<Vec<u8>, ModelError>;
}

macro_rules! impl_model_resource {
    ($name:ident, $kind:expr, $english:ident) => {
        impl ModelResource for $name {
            const KIND: ModelKind = $kind;

            fn language(&self) -> &str {
                &self.language
            }

            fn bundled(language: &str) -> Result<Self, ModelError> {
                if language == DEFAULT_LANGUAGE {
                    Ok(Self::$english())
                } else {
                    Err(ModelError::NoBundledModel {
                        kind: Self::KIND,
                        language: language.to_string(),
                    })
                }
            }

            fn from_bytes(bytes: &[u8]) -> Result<Self, ModelError> {
                // Archives must be read from an aligned buffer
                let mut aligned = rkyv::AlignedVec::with_capacity(bytes.len());
                aligned.extend_from_slice(bytes);

                let archived = rkyv::check_archived_root::<$name>(&aligned).map_err(|e| {
                    ModelError::Malformed {
                        kind: Self::KIND,
                        details: e.to_string(),
                    }
                })?;

                archived
                    .deserialize(&mut rkyv::Infallible)
                    .map_err(|_| ModelError::Malformed {
                        kind: Self::KIND,
                        details: "archive could not be deserialized".to_string(),
                    })
            }

            fn to_bytes(&self) -> Result<Vec<u8>, ModelError> {
                rkyv::to_bytes::<_, 1024>(self)
                    .map(|bytes| bytes.into_vec())
                    .map_err(|e| ModelError::Encode {
                        kind: Self::KIND,
                        details: e.to_string(),
                    })
            }
        }
    };
}

impl_model_resource!(PredicateModel, ModelKind::PredicateId, english);
impl_model_resource!(RolesetModel, ModelKind::Roleset, english);
impl_model_resource!(SrlModel, ModelKind::Srl, english);

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl PredicateModel {
    pub fn english() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            // Penn Treebank verb tags and the Universal Dependencies tag
            predicate_pos_prefixes: strings(&["VB", "VERB"]),
            excluded_relations: strings(&["aux", "auxpass", "aux:pass", "cop"]),
        }
    }
}

impl RolesetModel {
    pub fn english() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            default_sense: "01".to_string(),
            senses: vec![SenseEntry {
                lemma: "have".to_string(),
                roleset: "have.03".to_string(),
            }],
        }
    }

    /// Role-set for `lemma`: the table entry if any, else `lemma.default_sense`.
    pub fn roleset_for(&self, lemma: &str) -> String {
        self.senses
            .iter()
            .find(|entry| entry.lemma == lemma)
            .map(|entry| entry.roleset.clone())
            .unwrap_or_else(|| format!("{}.{}", lemma, self.default_sense))
    }
}

impl SrlModel {
    pub fn english() -> Self {
        // Stanford basic labels first, then their Universal Dependencies spellings
        let table: &[(&str, &str)] = &[
            ("nsubj", "ARG0"),
            ("csubj", "ARG0"),
            ("agent", "ARG0"),
            ("nsubjpass", "ARG1"),
            ("csubjpass", "ARG1"),
            ("dobj", "ARG1"),
            ("ccomp", "ARG1"),
            ("xcomp", "ARG1"),
            ("iobj", "ARG2"),
            ("neg", "ARGM-NEG"),
            ("tmod", "ARGM-TMP"),
            ("advmod", "ARGM-ADV"),
            ("obj", "ARG1"),
            ("nsubj:pass", "ARG1"),
            ("csubj:pass", "ARG1"),
            ("obl:agent", "ARG0"),
            ("obl:tmod", "ARGM-TMP"),
        ];
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            rules: table
                .iter()
                .map(|(relation, role)| RoleRule {
                    relation: relation.to_string(),
                    role: role.to_string(),
                })
                .collect(),
            control_relations: strings(&["xcomp"]),
            subject_relations: strings(&["nsubj"]),
            control_role: "ARG0".to_string(),
        }
    }

    pub fn role_for(&self, relation: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| rule.relation == relation)
            .map(|rule| rule.role.as_str())
    }
}
