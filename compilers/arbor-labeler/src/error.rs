use std::path::PathBuf;

use arbor_protocol::{ModelError, ModelKind};
use thiserror::Error;

/// The cascade could not be constructed. Fatal for the processing context.
#[derive(Debug, Error)]
pub enum CascadeError {
    #[error("failed to read {kind} model from {path}")]
    Io {
        kind: ModelKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("{kind} model is for language '{found}', expected '{expected}'")]
    LanguageMismatch {
        kind: ModelKind,
        expected: String,
        found: String,
    },
}

/// A transformer could not annotate one tree. Only that span is lost.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransformError {
    message: String,
}

impl TransformError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
#[error("{stage} stage failed: {source}")]
pub struct StageError {
    pub stage: ModelKind,
    #[source]
    pub source: TransformError,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}
