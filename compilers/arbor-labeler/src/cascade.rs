//! The three annotation stages, run in a fixed order over one tree at a time.

use arbor_protocol::{ModelKind, PredicateModel, RolesetModel, SrlModel};
use arbor_tree::DependencyTree;
use tracing::{debug, info};

use crate::config::LabelerConfig;
use crate::error::{CascadeError, StageError, TransformError};
use crate::resources::load_model;
use crate::rules::{PredicateIdentifier, RolesetClassifier, SrlLabeler};

/// A stateful pass that annotates a tree in place.
///
/// Instances are reused across spans and documents. At most one `apply`
/// call runs per instance at a time; concurrent workers each own a cascade.
pub trait Transformer {
    fn apply(&mut self, tree: &mut DependencyTree) -> Result<(), TransformError>;
}

impl<F> Transformer for F
where
    F: FnMut(&mut DependencyTree) -> Result<(), TransformError>,
{
    fn apply(&mut self, tree: &mut DependencyTree) -> Result<(), TransformError> {
        self(tree)
    }
}

pub struct AnnotationCascade {
    predicate_identifier: Box<dyn Transformer>,
    roleset_classifier: Box<dyn Transformer>,
    srl_labeler: Box<dyn Transformer>,
}

impl AnnotationCascade {
    pub fn new(
        predicate_identifier: Box<dyn Transformer>,
        roleset_classifier: Box<dyn Transformer>,
        srl_labeler: Box<dyn Transformer>,
    ) -> Self {
        Self {
            predicate_identifier,
            roleset_classifier,
            srl_labeler,
        }
    }

    /// Loads the three model resources named by `config`, falling back to the
    /// bundled resource for the configured language. Any load failure is fatal.
    pub fn from_config(config: &LabelerConfig) -> Result<Self, CascadeError> {
        let language = config.language.as_str();
        let predicates: PredicateModel = load_model(language, config.model_path(ModelKind::PredicateId))?;
        let rolesets: RolesetModel = load_model(language, config.model_path(ModelKind::Roleset))?;
        let srl: SrlModel = load_model(language, config.model_path(ModelKind::Srl))?;

        info!(language, "annotation cascade ready");
        Ok(Self::from_models(predicates, rolesets, srl))
    }

    pub fn from_models(predicates: PredicateModel, rolesets: RolesetModel, srl: SrlModel) -> Self {
        Self::new(
            Box::new(PredicateIdentifier::new(predicates)),
            Box::new(RolesetClassifier::new(rolesets)),
            Box::new(SrlLabeler::new(srl)),
        )
    }

    /// The cascade over the bundled English models.
    pub fn english() -> Self {
        Self::from_models(PredicateModel::english(), RolesetModel::english(), SrlModel::english())
    }

    /// Runs predicate identification, role-set classification and role
    /// labeling in that order. Each stage completes before the next starts;
    /// the first failure stops the cascade.
    pub fn apply(&mut self, tree: &mut DependencyTree) -> Result<(), StageError> {
        let stages: [(ModelKind, &mut dyn Transformer); 3] = [
            (ModelKind::PredicateId, self.predicate_identifier.as_mut()),
            (ModelKind::Roleset, self.roleset_classifier.as_mut()),
            (ModelKind::Srl, self.srl_labeler.as_mut()),
        ];

        for (stage, transformer) in stages {
            transformer
                .apply(tree)
                .map_err(|source| StageError { stage, source })?;
            debug!(%stage, "stage applied");
        }
        Ok(())
    }
}
