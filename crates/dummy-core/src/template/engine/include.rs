//! Include expansion: inlining `{load path.tpl}` markers until none remain

use super::tokenize::{TokenKind, TokenStream};
use crate::template::error::TemplateError;

/// A template whose inlined content is still being scanned
struct IncludeFrame {
    path: String,
    /// Byte offset of the inlined content
    start: usize,
    /// Byte offset just past the inlined content
    end: usize,
}

impl IncludeFrame {
    fn contains(&self, start: usize, end: usize) -> bool {
        self.start <= start && end <= self.end
    }
}

/// Expand every include marker in `text`, recursively
///
/// `root` names the template `text` was read from and `fetch` returns the
/// raw text of an included path. Each marker is replaced by the fetched
/// content and scanning resumes at the last `{` on the line before that
/// content, so nested markers, and markers completed by the content, are
/// expanded in turn. Repeated markers are each expanded. Text without
/// markers is returned unchanged, and the result contains no markers.
///
/// # Errors
///
/// - `TemplateNotFound` (or any other error) from `fetch`
/// - `CyclicInclude` when a marker names a template that is already being
///   expanded, or when more than `max_includes` markers have been expanded
pub fn resolve_includes<F>(
    root: &str,
    text: &str,
    mut fetch: F,
    max_includes: usize,
) -> Result<String, TemplateError>
where
    F: FnMut(&str) -> Result<String, TemplateError>,
{
    let mut output = text.to_string();
    let mut frames = vec![IncludeFrame {
        path: root.to_string(),
        start: 0,
        end: output.len(),
    }];
    let mut cursor = 0;
    let mut expansions = 0;

    while let Some((start, length, path)) = next_include(&output, cursor) {
        // Leave frames that do not hold the whole marker
        while frames.len() > 1
            && frames
                .last()
                .is_some_and(|frame| !frame.contains(start, start + length))
        {
            frames.pop();
        }

        if frames.iter().any(|frame| frame.path == path) {
            return Err(cyclic(&frames, path));
        }

        expansions += 1;
        if expansions > max_includes {
            return Err(cyclic(&frames, path));
        }

        let content = fetch(&path)?;
        tracing::debug!(template = %path, bytes = content.len(), "inlining nested template");

        for frame in frames.iter_mut() {
            frame.end = frame.end - length + content.len();
        }
        output.replace_range(start..start + length, &content);
        frames.push(IncludeFrame {
            path,
            start,
            end: start + content.len(),
        });
        cursor = rescan_from(&output, start);
    }

    Ok(output)
}

/// Find the first include marker at or after `from`: (start, length, path)
fn next_include(text: &str, from: usize) -> Option<(usize, usize, String)> {
    TokenStream::new(&text[from..]).find_map(|token| match token.kind {
        TokenKind::Include { path } => Some((from + token.start, token.length, path)),
        _ => None,
    })
}

/// Where scanning resumes after content was spliced in at `at`
///
/// An unclosed `{` earlier on the same line may now close inside the new
/// content, so scanning restarts at the last `{` on the line before `at`.
fn rescan_from(text: &str, at: usize) -> usize {
    let line_start = text[..at].rfind('\n').map_or(0, |newline| newline + 1);
    text[line_start..at]
        .rfind('{')
        .map_or(at, |brace| line_start + brace)
}

fn cyclic(frames: &[IncludeFrame], path: String) -> TemplateError {
    let mut chain: Vec<String> = frames.iter().map(|frame| frame.path.clone()).collect();
    chain.push(path);
    TemplateError::CyclicInclude { chain }
}
