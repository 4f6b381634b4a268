//! Loop rendering: expanding a block's inner pattern once per record

use super::blocks::loop_inner_pattern;
use super::tokenize::{TokenKind, TokenStream};
use crate::template::record::Record;
use serde::{Deserialize, Serialize};

/// What to render for a `{:field}` the current record does not have
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingFieldPolicy {
    /// Substitute an empty string
    #[default]
    Empty,
    /// Leave the `{:field}` placeholder in the output
    Literal,
}

/// Piece of a compiled loop pattern
#[derive(Debug, Clone, PartialEq)]
enum Segment<'a> {
    /// Literal text copied as-is
    Text(&'a str),
    /// `{:field}` placeholder: index into `LoopPattern::fields`, original token text
    Field(usize, &'a str),
}

/// Inner pattern of a loop block, split once into text and field segments
#[derive(Debug, Clone, PartialEq)]
struct LoopPattern<'a> {
    segments: Vec<Segment<'a>>,
    fields: Vec<String>,
}

impl<'a> LoopPattern<'a> {
    fn compile(pattern: &'a str) -> Self {
        let mut segments = Vec::new();
        let mut fields: Vec<String> = Vec::new();
        let mut pos = 0;

        for token in TokenStream::new(pattern) {
            let (start, end) = (token.start, token.end());
            let TokenKind::LoopVar { field } = token.kind else {
                continue;
            };

            if start > pos {
                segments.push(Segment::Text(&pattern[pos..start]));
            }

            let index = match fields.iter().position(|known| *known == field) {
                Some(index) => index,
                None => {
                    fields.push(field);
                    fields.len() - 1
                }
            };
            segments.push(Segment::Field(index, &pattern[start..end]));
            pos = end;
        }

        if pos < pattern.len() {
            segments.push(Segment::Text(&pattern[pos..]));
        }

        Self { segments, fields }
    }

    fn render_record(&self, record: &Record, policy: MissingFieldPolicy, output: &mut String) {
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => output.push_str(text),
                Segment::Field(index, literal) => match record.get(&self.fields[*index]) {
                    Some(value) => output.push_str(value),
                    None if policy == MissingFieldPolicy::Literal => output.push_str(literal),
                    None => {}
                },
            }
        }
    }
}

/// Distinct `{:field}` names used in a loop pattern, in first-use order
///
/// `{:foo} bla {:bar} {:foo}` → `["foo", "bar"]`
pub fn loop_fields(pattern: &str) -> Vec<String> {
    LoopPattern::compile(pattern).fields
}

/// Render a loop block once per record and concatenate the results
///
/// The block's `{loop name}` / `{/loop}` tags are stripped, then every
/// `{:field}` in the inner pattern is replaced with the record's value.
/// Records are rendered in order with no separator between them; an empty
/// record list renders an empty string.
///
/// Substitution happens in a single pass over the pattern, so a value that
/// itself looks like `{:other}` is copied verbatim.
pub fn render_loop(block: &str, records: &[Record], policy: MissingFieldPolicy) -> String {
    let pattern = LoopPattern::compile(loop_inner_pattern(block));
    let mut output = String::new();

    for record in records {
        pattern.render_record(record, policy, &mut output);
    }

    output
}
