//! Per-span orchestration: build a tree, annotate it, extract predicates.

use arbor_parser::{BuildOutcome, DependencyGraphSource, SpanSource, TokenSource, TreeBuilder};
use arbor_protocol::{NodeId, Predicate, SpanId, TokenRef, Window};
use arbor_tree::DependencyTree;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::cascade::AnnotationCascade;
use crate::config::LabelerConfig;
use crate::error::CascadeError;
use crate::extract::SrlExtractor;

/// Receives labeled predicates, resolved back to the caller's tokens.
pub trait PredicateSink {
    /// Called once per span, in document order, before its predicates.
    fn begin_span(&mut self, _span: SpanId) {}

    fn emit_predicate(&mut self, sense: Option<&str>, governor: TokenRef<'_>, arguments: &[(&str, TokenRef<'_>)]);
}

/// Counts for one pass over a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProcessSummary {
    pub spans: usize,
    /// Spans whose parse left a token detached from the root.
    pub skipped: usize,
    /// Spans on which an annotation stage reported an error.
    pub failed: usize,
    pub predicates: usize,
}

enum SpanOutcome {
    Labeled {
        tree: DependencyTree,
        predicates: Vec<Predicate>,
    },
    Skipped,
    Failed,
}

pub struct WindowProcessor {
    builder: TreeBuilder,
    cascade: AnnotationCascade,
    extractor: SrlExtractor,
    window: Window,
}

impl WindowProcessor {
    pub fn new(cascade: AnnotationCascade, window: Window) -> Self {
        Self {
            builder: TreeBuilder::new(),
            cascade,
            extractor: SrlExtractor::new(),
            window,
        }
    }

    pub fn from_config(config: &LabelerConfig) -> Result<Self, CascadeError> {
        let cascade = AnnotationCascade::from_config(config)?;
        Ok(Self::new(cascade, config.window))
    }

    pub fn window(&self) -> Window {
        self.window
    }

    /// Labels one span. An unparseable span, or one an annotation stage
    /// fails on, yields no predicates.
    pub fn process<D, S>(&mut self, source: &D, span: &S) -> Vec<Predicate>
    where
        D: TokenSource<S> + DependencyGraphSource<S>,
    {
        match self.label(source, span) {
            SpanOutcome::Labeled { predicates, .. } => predicates,
            SpanOutcome::Skipped | SpanOutcome::Failed => Vec::new(),
        }
    }

    /// Labels every span of `document` in order and hands the results to `sink`.
    pub fn process_document<D, K>(&mut self, document: &D, sink: &mut K) -> ProcessSummary
    where
        D: SpanSource + TokenSource<D::Span> + DependencyGraphSource<D::Span>,
        K: PredicateSink + ?Sized,
    {
        let mut summary = ProcessSummary::default();

        for (ordinal, span) in document.spans(self.window).iter().enumerate() {
            summary.spans += 1;
            sink.begin_span(SpanId::new(ordinal as u32));

            match self.label(document, span) {
                SpanOutcome::Labeled { tree, predicates } => {
                    summary.predicates += predicates.len();
                    for predicate in &predicates {
                        emit(sink, &tree, predicate);
                    }
                }
                SpanOutcome::Skipped => summary.skipped += 1,
                SpanOutcome::Failed => summary.failed += 1,
            }
        }

        info!(
            spans = summary.spans,
            skipped = summary.skipped,
            failed = summary.failed,
            predicates = summary.predicates,
            "document processed"
        );
        summary
    }

    fn label<D, S>(&mut self, source: &D, span: &S) -> SpanOutcome
    where
        D: TokenSource<S> + DependencyGraphSource<S>,
    {
        let mut tree = match self.builder.build(source, span) {
            BuildOutcome::Built(tree) => tree,
            BuildOutcome::Unparseable(reason) => {
                debug!(%reason, "skipping unparseable span");
                return SpanOutcome::Skipped;
            }
        };

        if let Err(err) = self.cascade.apply(&mut tree) {
            warn!(error = %err, tokens = tree.token_count(), "annotation failed, span skipped");
            return SpanOutcome::Failed;
        }

        let predicates = self.extractor.extract(&tree);
        SpanOutcome::Labeled { tree, predicates }
    }
}

fn emit<K: PredicateSink + ?Sized>(sink: &mut K, tree: &DependencyTree, predicate: &Predicate) {
    let arguments: Vec<(&str, TokenRef<'_>)> = predicate
        .arguments
        .iter()
        .map(|arg| (arg.role.as_str(), token_ref(tree, arg.node)))
        .collect();
    sink.emit_predicate(predicate.sense.as_deref(), token_ref(tree, predicate.head), &arguments);
}

fn token_ref(tree: &DependencyTree, id: NodeId) -> TokenRef<'_> {
    match (id.token_position(), tree.node(id).token()) {
        (Some(position), Some(token)) => TokenRef { position, token },
        _ => panic!("node {} carries no token", id),
    }
}
