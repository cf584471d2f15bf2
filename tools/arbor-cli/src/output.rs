//! Sinks that render labeled predicates for the terminal.

use arbor_labeler::PredicateSink;
use arbor_protocol::{SpanId, TokenRef};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenRecord {
    pub position: usize,
    pub text: String,
}

impl From<TokenRef<'_>> for TokenRecord {
    fn from(token: TokenRef<'_>) -> Self {
        Self {
            position: token.position,
            text: token.token.text.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArgumentRecord {
    pub role: String,
    pub token: TokenRecord,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PredicateRecord {
    pub sense: Option<String>,
    pub governor: TokenRecord,
    pub arguments: Vec<ArgumentRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpanRecord {
    pub span: SpanId,
    pub predicates: Vec<PredicateRecord>,
}

/// Buffers every span so the document can be written as one JSON array.
#[derive(Debug, Default)]
pub struct JsonSink {
    pub spans: Vec<SpanRecord>,
}

impl PredicateSink for JsonSink {
    fn begin_span(&mut self, span: SpanId) {
        self.spans.push(SpanRecord {
            span,
            predicates: Vec::new(),
        });
    }

    fn emit_predicate(&mut self, sense: Option<&str>, governor: TokenRef<'_>, arguments: &[(&str, TokenRef<'_>)]) {
        let record = PredicateRecord {
            sense: sense.map(str::to_string),
            governor: governor.into(),
            arguments: arguments
                .iter()
                .map(|(role, token)| ArgumentRecord {
                    role: role.to_string(),
                    token: (*token).into(),
                })
                .collect(),
        };
        match self.spans.last_mut() {
            Some(span) => span.predicates.push(record),
            None => panic!("predicate emitted before any span began"),
        }
    }
}

/// One line per predicate: `sense governor ROLE=token ...`, grouped under
/// a `# span N` header. Spans without predicates print only the header.
#[derive(Debug, Default)]
pub struct TextSink {
    pub lines: Vec<String>,
}

impl PredicateSink for TextSink {
    fn begin_span(&mut self, span: SpanId) {
        self.lines.push(format!("# span {}", span));
    }

    fn emit_predicate(&mut self, sense: Option<&str>, governor: TokenRef<'_>, arguments: &[(&str, TokenRef<'_>)]) {
        let mut line = format!("{}\t{}", sense.unwrap_or("_"), governor.token.text);
        for (role, token) in arguments {
            line.push_str(&format!("\t{}={}", role, token.token.text));
        }
        self.lines.push(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_protocol::Token;

    fn at(position: usize, token: &Token) -> TokenRef<'_> {
        TokenRef { position, token }
    }

    fn sample(sink: &mut dyn PredicateSink) {
        let john = Token::new("John");
        let sees = Token::new("sees");
        let mary = Token::new("Mary");

        sink.begin_span(SpanId(0));
        sink.emit_predicate(
            Some("see.01"),
            at(1, &sees),
            &[("ARG0", at(0, &john)), ("ARG1", at(2, &mary))],
        );
        sink.begin_span(SpanId(1));
    }

    #[test]
    fn test_text_lines() {
        let mut sink = TextSink::default();
        sample(&mut sink);
        assert_eq!(
            sink.lines,
            vec!["# span 0", "see.01\tsees\tARG0=John\tARG1=Mary", "# span 1"]
        );
    }

    #[test]
    fn test_json_shape() {
        let mut sink = JsonSink::default();
        sample(&mut sink);

        let value = serde_json::to_value(&sink.spans).unwrap();
        assert_eq!(value[0]["span"], 0);
        assert_eq!(value[0]["predicates"][0]["sense"], "see.01");
        assert_eq!(value[0]["predicates"][0]["governor"]["text"], "sees");
        assert_eq!(value[0]["predicates"][0]["arguments"][1]["role"], "ARG1");
        assert_eq!(value[0]["predicates"][0]["arguments"][1]["token"]["position"], 2);
        assert_eq!(value[1]["predicates"].as_array().unwrap().len(), 0);
    }
}
