//! Semantic role labeling over externally parsed dependency trees.

pub mod cascade;
pub mod config;
pub mod error;
pub mod extract;
pub mod processor;
pub mod resources;
pub mod rules;

pub use cascade::{AnnotationCascade, Transformer};
pub use config::LabelerConfig;
pub use error::{CascadeError, ConfigError, StageError, TransformError};
pub use extract::SrlExtractor;
pub use processor::{PredicateSink, ProcessSummary, WindowProcessor};
pub use resources::load_model;
pub use rules::{PredicateIdentifier, RolesetClassifier, SrlLabeler};

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_parser::parse_conll;
    use arbor_protocol::{SpanId, TokenRef, Window};

    const SAMPLE: &str = "\
1\tJohn\tjohn\tPROPN\tNNP\t_\t2\tnsubj\t_\t_
2\thas\thave\tVERB\tVBZ\t_\t0\troot\t_\t_
3\ta\ta\tDET\tDT\t_\t4\tdet\t_\t_
4\tdog\tdog\tNOUN\tNN\t_\t2\tdobj\t_\t_

1\tMary\tmary\tPROPN\tNNP\t_\t3\tnsubj\t_\t_
2\thas\thave\tAUX\tVBZ\t_\t3\taux\t_\t_
3\tleft\tleave\tVERB\tVBN\t_\t0\troot\t_\t_
4\tyesterday\tyesterday\tNOUN\tNN\t_\t3\ttmod\t_\t_

1\tOrphan\torphan\tNOUN\tNN\t_\t_\t_\t_\t_
";

    #[derive(Default)]
    struct Lines(Vec<String>);

    impl PredicateSink for Lines {
        fn begin_span(&mut self, span: SpanId) {
            self.0.push(format!("#{}", span));
        }

        fn emit_predicate(&mut self, sense: Option<&str>, governor: TokenRef<'_>, arguments: &[(&str, TokenRef<'_>)]) {
            let args: Vec<String> = arguments
                .iter()
                .map(|(role, arg)| format!("{}={}@{}", role, arg.token.text, arg.position))
                .collect();
            self.0.push(format!(
                "{} {}@{} [{}]",
                sense.unwrap_or("-"),
                governor.token.text,
                governor.position,
                args.join(" ")
            ));
        }
    }

    #[test]
    fn test_conll_end_to_end() {
        let document = parse_conll(SAMPLE).unwrap();
        let mut processor = WindowProcessor::from_config(&LabelerConfig::default()).unwrap();
        assert_eq!(processor.window(), Window::Sentence);

        let mut lines = Lines::default();
        let summary = processor.process_document(&document, &mut lines);

        assert_eq!(
            summary,
            ProcessSummary {
                spans: 3,
                skipped: 1,
                failed: 0,
                predicates: 2
            }
        );
        assert_eq!(
            lines.0,
            vec![
                "#0",
                "have.03 has@1 [ARG0=John@0 ARG1=dog@3]",
                "#1",
                "leave.01 left@2 [ARG0=Mary@0 ARGM-TMP=yesterday@3]",
                "#2",
            ]
        );
    }
}
