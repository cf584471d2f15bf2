use std::fs;
use std::path::Path;

use arbor_protocol::ModelResource;
use tracing::info;

use crate::error::CascadeError;

/// Loads a model resource: the file at `path` when given, else the bundled
/// resource for `language`. The resource must be built for `language`.
pub fn load_model<M: ModelResource>(language: &str, path: Option<&Path>) -> Result<M, CascadeError> {
    let model = match path {
        Some(path) => {
            let bytes = fs::read(path).map_err(|source| CascadeError::Io {
                kind: M::KIND,
                path: path.to_path_buf(),
                source,
            })?;
            M::from_bytes(&bytes)?
        }
        None => M::bundled(language)?,
    };

    if model.language() != language {
        return Err(CascadeError::LanguageMismatch {
            kind: M::KIND,
            expected: language.to_string(),
            found: model.language().to_string(),
        });
    }

    let origin = path.map_or_else(|| "bundled".to_string(), |p| p.display().to_string());
    info!(kind = %M::KIND, language, origin = %origin, "loaded model");
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_protocol::{ModelError, ModelKind, RolesetModel, SrlModel};
    use std::io::Write;

    #[test]
    fn test_bundled_model_for_default_language() {
        let model: SrlModel = load_model("en", None).unwrap();
        assert_eq!(model, SrlModel::english());
    }

    #[test]
    fn test_unknown_language_is_fatal() {
        let err = load_model::<SrlModel>("de", None).unwrap_err();
        assert!(matches!(
            err,
            CascadeError::Model(ModelError::NoBundledModel { kind: ModelKind::Srl, .. })
        ));
    }

    #[test]
    fn test_override_file() {
        let mut model = RolesetModel::english();
        model.default_sense = "02".to_string();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&model.to_bytes().unwrap()).unwrap();

        let loaded: RolesetModel = load_model("en", Some(file.path())).unwrap();
        assert_eq!(loaded.roleset_for("run"), "run.02");
    }

    #[test]
    fn test_override_for_other_language_is_rejected() {
        let mut model = RolesetModel::english();
        model.language = "es".to_string();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&model.to_bytes().unwrap()).unwrap();

        let err = load_model::<RolesetModel>("en", Some(file.path())).unwrap_err();
        assert!(matches!(
            err,
            CascadeError::LanguageMismatch { ref found, .. } if found == "es"
        ));
    }

    #[test]
    fn test_missing_and_malformed_files() {
        let err = load_model::<SrlModel>("en", Some(Path::new("/nonexistent/srl.rkyv"))).unwrap_err();
        assert!(matches!(err, CascadeError::Io { kind: ModelKind::Srl, .. }));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not a model").unwrap();
        let err = load_model::<SrlModel>("en", Some(file.path())).unwrap_err();
        assert!(matches!(
            err,
            CascadeError::Model(ModelError::Malformed { kind: ModelKind::Srl, .. })
        ));
    }
}
