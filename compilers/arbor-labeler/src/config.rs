use std::fs;
use std::path::{Path, PathBuf};

use arbor_protocol::{ModelKind, Window, DEFAULT_LANGUAGE};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Settings for a labeling context. Unset model paths select the bundled
/// resource for `language`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LabelerConfig {
    pub language: String,
    pub predicate_model: Option<PathBuf>,
    pub roleset_model: Option<PathBuf>,
    pub srl_model: Option<PathBuf>,
    pub window: Window,
}

impl Default for LabelerConfig {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            predicate_model: None,
            roleset_model: None,
            srl_model: None,
            window: Window::Sentence,
        }
    }
}

impl LabelerConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Override path for one of the three resources.
    pub fn model_path(&self, kind: ModelKind) -> Option<&Path> {
        match kind {
            ModelKind::PredicateId => self.predicate_model.as_deref(),
            ModelKind::Roleset => self.roleset_model.as_deref(),
            ModelKind::Srl => self.srl_model.as_deref(),
        }
    }
}
