//! Block matching utilities (finding `{loop}` blocks and their closing tags)

use super::tokenize::{TokenKind, TokenStream};
use crate::template::error::TemplateError;
use std::collections::BTreeMap;

/// Closing tag of a loop block
const LOOP_END_TAG: &str = "{/loop}";

/// Loop blocks of a resolved template: name → full block text (tags + body)
pub type LoopMap = BTreeMap<String, String>;

/// An open `{loop name}` tag waiting for its `{/loop}`
struct OpenLoop {
    name: String,
    start: usize,
}

/// Extract every loop block from `text`, keyed by loop name
///
/// Each `{loop name}` closes at its nearest following `{/loop}`, so
/// sequential loops never swallow each other. A `{loop}` without a closing
/// tag, and a stray `{/loop}`, are plain text. When two blocks share a name,
/// the later one wins.
///
/// # Errors
///
/// Returns `NestedLoop` if a `{loop}` tag appears inside an open loop body.
///
/// # Performance
///
/// Single pass over the text with TokenStream.
pub fn extract_loops(text: &str) -> Result<LoopMap, TemplateError> {
    let mut loops = LoopMap::new();
    let mut open: Option<OpenLoop> = None;

    for token in TokenStream::new(text) {
        match token.kind {
            TokenKind::LoopStart { name } => {
                if let Some(outer) = &open {
                    return Err(TemplateError::NestedLoop {
                        outer: outer.name.clone(),
                        inner: name,
                        line: token.line,
                    });
                }
                open = Some(OpenLoop {
                    name,
                    start: token.start,
                });
            }
            TokenKind::LoopEnd => {
                if let Some(block) = open.take() {
                    let block_text = &text[block.start..token.end()];
                    loops.insert(block.name, block_text.to_string());
                }
            }
            _ => {
                // Placeholders, loop variables and includes belong to the body
            }
        }
    }

    Ok(loops)
}

/// Strip the leading `{loop name}` and trailing `{/loop}` tags from a block
///
/// `{loop foo}{:bar}{/loop}` → `{:bar}`
pub fn loop_inner_pattern(block: &str) -> &str {
    let after_open = block.find('}').map_or(block, |close| &block[close + 1..]);
    after_open.strip_suffix(LOOP_END_TAG).unwrap_or(after_open)
}
