//! CoNLL-X / CoNLL-U reader.
//!
//! Ten tab-separated columns per token: ID FORM LEMMA UPOS XPOS FEATS HEAD
//! DEPREL DEPS MISC (only the first eight are required). Blank lines end a
//! sentence, `#` lines are comments, and multiword (`3-4`) or empty (`3.1`)
//! rows are skipped.

use nom::{
    branch::alt,
    bytes::complete::take_till,
    character::complete::{char, digit1},
    combinator::{all_consuming, map, map_res, value},
    multi::separated_list1,
    sequence::separated_pair,
    IResult,
};
use thiserror::Error;
use tracing::debug;

use arbor_protocol::Token;

use crate::document::{Document, Sentence};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConllError {
    #[error("line {line}: expected at least 8 tab-separated columns, found {found}")]
    MissingColumns { line: usize, found: usize },
    #[error("line {line}: invalid {column} '{value}'")]
    InvalidField {
        line: usize,
        column: &'static str,
        value: String,
    },
    #[error("line {line}: token id {found} out of sequence, expected {expected}")]
    OutOfSequence { line: usize, expected: usize, found: usize },
    #[error("line {line}: head {head} outside sentence of {len} tokens")]
    HeadOutOfRange { line: usize, head: usize, len: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowId {
    Word(usize),
    MultiWord,
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Row {
    line: usize,
    form: String,
    lemma: Option<String>,
    pos: Option<String>,
    head: Option<usize>,
    deprel: Option<String>,
}

fn columns(input: &str) -> IResult<&str, Vec<&str>> {
    separated_list1(char('\t'), take_till(|c| c == '\t'))(input)
}

fn number(input: &str) -> IResult<&str, usize> {
    map_res(digit1, str::parse::<usize>)(input)
}

fn row_id(input: &str) -> IResult<&str, RowId> {
    alt((
        map(separated_pair(digit1, char('-'), digit1), |_| RowId::MultiWord),
        map(separated_pair(digit1, char('.'), digit1), |_| RowId::Empty),
        map(number, RowId::Word),
    ))(input)
}

fn head(input: &str) -> IResult<&str, Option<usize>> {
    alt((value(None, char('_')), map(number, Some)))(input)
}

fn optional(field: &str) -> Option<String> {
    match field {
        "_" | "" => None,
        other => Some(other.to_string()),
    }
}

fn parse_field<'a, T>(
    parser: impl FnMut(&'a str) -> IResult<&'a str, T>,
    field: &'a str,
    line: usize,
    column: &'static str,
) -> Result<T, ConllError> {
    all_consuming(parser)(field)
        .map(|(_, parsed)| parsed)
        .map_err(|_| ConllError::InvalidField {
            line,
            column,
            value: field.to_string(),
        })
}

fn parse_row(text: &str, line: usize) -> Result<Option<(usize, Row)>, ConllError> {
    let (_, cols) = columns(text).map_err(|_| ConllError::MissingColumns { line, found: 0 })?;
    if cols.len() < 8 {
        return Err(ConllError::MissingColumns { line, found: cols.len() });
    }

    let id = match parse_field(row_id, cols[0], line, "ID")? {
        RowId::Word(id) => id,
        RowId::MultiWord | RowId::Empty => return Ok(None),
    };

    // XPOS carries the fine-grained tag (e.g. VBZ); fall back to UPOS
    let pos = optional(cols[4]).or_else(|| optional(cols[3]));

    let row = Row {
        line,
        form: cols[1].to_string(),
        lemma: optional(cols[2]),
        pos,
        head: parse_field(head, cols[6], line, "HEAD")?,
        deprel: optional(cols[7]),
    };
    Ok(Some((id, row)))
}

fn finish_sentence(rows: Vec<Row>) -> Result<Sentence, ConllError> {
    let len = rows.len();
    let mut sentence = Sentence::new();
    for row in &rows {
        let token = Token {
            text: row.form.clone(),
            pos: row.pos.clone(),
            lemma: row.lemma.clone(),
        };
        sentence.push(token);
    }

    for (position, row) in rows.into_iter().enumerate() {
        let relation = row.deprel.unwrap_or_else(|| "dep".to_string());
        match row.head {
            None => {}
            Some(0) => sentence.attach_to_top(position, relation),
            Some(head) if head <= len => sentence.attach(position, head - 1, relation),
            Some(head) => {
                return Err(ConllError::HeadOutOfRange {
                    line: row.line,
                    head,
                    len,
                })
            }
        }
    }
    Ok(sentence)
}

/// Reads a CoNLL document. A token with HEAD `_` is kept without a head, so
/// its sentence will be skipped by the labeler rather than rejected here.
pub fn parse_conll(input: &str) -> Result<Document, ConllError> {
    let mut document = Document::new();
    let mut rows: Vec<Row> = Vec::new();

    for (idx, text) in input.lines().enumerate() {
        let line = idx + 1;

        if text.trim().is_empty() {
            if !rows.is_empty() {
                document.push(finish_sentence(std::mem::take(&mut rows))?);
            }
            continue;
        }
        if text.starts_with('#') {
            continue;
        }

        if let Some((id, row)) = parse_row(text, line)? {
            let expected = rows.len() + 1;
            if id != expected {
                return Err(ConllError::OutOfSequence {
                    line,
                    expected,
                    found: id,
                });
            }
            rows.push(row);
        }
    }
    if !rows.is_empty() {
        document.push(finish_sentence(rows)?);
    }

    debug!(sentences = document.len(), "parsed CoNLL document");
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{DependencyGraphSource, TokenSource};
    use crate::document::DocNode;

    const SAMPLE: &str = "# sent_id = 1
1\tJohn\tJohn\tPROPN\tNNP\t_\t2\tnsubj\t_\t_
2\tsees\tsee\tVERB\tVBZ\t_\t0\troot\t_\t_
3\tMary\tMary\tPROPN\tNNP\t_\t2\tdobj\t_\t_

1\tIt\tit\tPRON\t_\t_\t2\tnsubj\t_\t_
2-3\tdon't\t_\t_\t_\t_\t_\t_\t_\t_
2\tdo\tdo\tAUX\tVBP\t_\t0\troot\t_\t_
3\tn't\tnot\tPART\tRB\t_\t2\tneg\t_\t_
";

    #[test]
    fn test_reads_sentences_and_columns() {
        let doc = parse_conll(SAMPLE).expect("sample should parse");
        assert_eq!(doc.len(), 2);

        let tokens = doc.tokens(&(0..1));
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[1].text, "sees");
        assert_eq!(tokens[1].pos.as_deref(), Some("VBZ"));
        assert_eq!(tokens[1].lemma.as_deref(), Some("see"));

        // Multiword row skipped; XPOS "_" falls back to UPOS
        let second = doc.tokens(&(1..2));
        assert_eq!(second.len(), 3);
        assert_eq!(second[0].pos.as_deref(), Some("PRON"));
    }

    #[test]
    fn test_head_zero_attaches_to_top() {
        let doc = parse_conll(SAMPLE).unwrap();
        let sees = DocNode::Token { sentence: 0, position: 1 };
        assert_eq!(doc.head_of(&sees), DocNode::Top { sentence: 0 });

        let mary = DocNode::Token { sentence: 0, position: 2 };
        assert_eq!(doc.head_of(&mary), sees);
        assert_eq!(doc.head_relation(&mary), "dobj");
    }

    #[test]
    fn test_missing_head_is_kept() {
        let doc = parse_conll("1\tHello\t_\t_\t_\t_\t_\t_\t_\t_\n").unwrap();
        let hello = DocNode::Token { sentence: 0, position: 0 };
        assert!(!doc.has_head(&hello));
        assert!(!doc.is_root(&hello));
    }

    #[test]
    fn test_malformed_rows() {
        assert_eq!(
            parse_conll("1\tHello\t_\n"),
            Err(ConllError::MissingColumns { line: 1, found: 3 })
        );
        assert!(matches!(
            parse_conll("x\tHello\t_\t_\t_\t_\t0\troot\n"),
            Err(ConllError::InvalidField { line: 1, column: "ID", .. })
        ));
        assert!(matches!(
            parse_conll("1\tHello\t_\t_\t_\t_\troot\t0\n"),
            Err(ConllError::InvalidField { line: 1, column: "HEAD", .. })
        ));
        assert_eq!(
            parse_conll("1\ta\t_\t_\t_\t_\t0\troot\n3\tb\t_\t_\t_\t_\t1\tdep\n"),
            Err(ConllError::OutOfSequence { line: 2, expected: 2, found: 3 })
        );
        assert_eq!(
            parse_conll("1\ta\t_\t_\t_\t_\t4\tdep\n"),
            Err(ConllError::HeadOutOfRange { line: 1, head: 4, len: 1 })
        );
    }

    #[test]
    fn test_windows_crlf_and_trailing_blank_lines() {
        let text = "1\tGo\tgo\tVERB\tVB\t_\t0\troot\r\n\r\n\r\n";
        let doc = parse_conll(text).unwrap();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.tokens(&(0..1))[0].text, "Go");
    }
}
