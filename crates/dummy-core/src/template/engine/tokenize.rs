//! Tokenization for template engine
//!
//! Provides O(n) tokenization using a state machine.

/// Directive prefix for nested templates: `{load path.tpl}`
pub(crate) const LOAD_PREFIX: &str = "load ";
/// Directive prefix for loop blocks: `{loop name}`
pub(crate) const LOOP_PREFIX: &str = "loop ";
/// Closing tag content for loop blocks: `{/loop}`
pub(crate) const LOOP_END: &str = "/loop";
/// Prefix for loop variables: `{:field}`
pub(crate) const LOOP_VAR_PREFIX: char = ':';
/// Required extension of included templates
pub(crate) const TEMPLATE_EXTENSION: &str = ".tpl";

/// Token classification
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    /// {load path/to/file.tpl}
    Include { path: String },

    /// {loop name}
    LoopStart { name: String },

    /// {/loop}
    LoopEnd,

    /// {:field}
    LoopVar { field: String },

    /// {name}, or anything else between braces
    Placeholder { name: String },
}

/// A single {...} token with position and classification
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    /// Token classification
    pub kind: TokenKind,
    /// Absolute byte position of `{` in template
    pub start: usize,
    /// Total length in bytes including `{` and `}`
    pub length: usize,
    /// Line number where token starts (for error messages)
    pub line: usize,
}

impl Token {
    /// Byte position just past the closing `}`
    pub fn end(&self) -> usize {
        self.start + self.length
    }
}

/// Tokenization state machine (explicit for testability)
///
/// # State Transitions
///
/// ```text
/// Normal ──{───> InToken ──}───> [Yield Token] → Normal
///   │               │ │
///   │ (not {)       │ └──{───> InToken (restart at the new brace)
///   └──────────────>│
///                   └──\n──> Normal (candidate abandoned, byte reprocessed)
/// ```
///
/// Markers never span lines, and the innermost `{` before a `}` always wins,
/// so `{{name}` yields the token `{name}`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ScanState {
    /// Normal text scanning
    Normal,

    /// Inside `{...`, scanning until `}`
    InToken {
        /// Byte position of the opening `{`
        start: usize,
        /// Line of the opening `{`
        line: usize,
    },
}

/// Iterator over tokens in a template string
///
/// ```ignore
/// // Internal use only, not part of public API
/// let text = "Hello {name}, {loop items}{:title}{/loop}";
/// for token in TokenStream::new(text) {
///     println!("Token at {}: {:?}", token.start, token.kind);
/// }
/// ```
///
/// # Performance
///
/// - **O(n) guarantee**: each byte is processed at most twice
/// - **Forward-only**: position never moves backward
pub(crate) struct TokenStream<'a> {
    /// Template text
    text: &'a str,
    /// Current byte position
    pos: usize,
    /// State machine state
    state: ScanState,
    /// Current line number (for error messages)
    line: usize,
    /// Step count for O(n) guard
    step_count: usize,
}

impl<'a> TokenStream<'a> {
    /// Create a new TokenStream from template text
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            state: ScanState::Normal,
            line: 1,
            step_count: 0,
        }
    }

    /// Check if we should continue iteration (guards for step cap and EOF)
    #[inline]
    fn should_continue(&mut self, max_steps: usize) -> bool {
        self.step_count += 1;
        self.step_count <= max_steps && self.pos < self.text.len()
    }

    /// Record step for O(n) performance verification in tests
    #[cfg(test)]
    #[inline]
    fn record_test_step() {
        test_counter::inc();
    }

    /// Process Normal state: scan for an opening brace
    fn process_normal_state(&mut self, byte: u8) {
        match byte {
            b'{' => {
                self.state = ScanState::InToken {
                    start: self.pos,
                    line: self.line,
                };
            }
            b'\n' => self.line += 1,
            _ => {}
        }
        self.pos += 1;
    }

    /// Process InToken state: scan for the closing brace
    ///
    /// A newline abandons the candidate without advancing, so the byte is
    /// reprocessed in Normal state.
    fn process_in_token(&mut self, byte: u8, start: usize, line: usize) -> Option<Token> {
        match byte {
            b'}' => {
                let content = &self.text[start + 1..self.pos];
                let token = Token {
                    kind: classify_content(content),
                    start,
                    length: self.pos + 1 - start,
                    line,
                };
                self.state = ScanState::Normal;
                self.pos += 1;
                Some(token)
            }
            b'{' => {
                // Earlier brace was literal text, restart here
                self.state = ScanState::InToken {
                    start: self.pos,
                    line: self.line,
                };
                self.pos += 1;
                None
            }
            b'\n' => {
                self.state = ScanState::Normal;
                None
            }
            _ => {
                self.pos += 1;
                None
            }
        }
    }
}

impl Iterator for TokenStream<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        const MAX_STEPS_MULTIPLIER: usize = 3;
        let max_steps = self.text.len().saturating_mul(MAX_STEPS_MULTIPLIER);

        loop {
            if !self.should_continue(max_steps) {
                return None;
            }

            let byte = self.text.as_bytes()[self.pos];
            #[cfg(test)]
            Self::record_test_step();

            match self.state {
                ScanState::Normal => self.process_normal_state(byte),
                ScanState::InToken { start, line } => {
                    if let Some(token) = self.process_in_token(byte, start, line) {
                        return Some(token);
                    }
                }
            }
        }
    }
}

/// Classify token content (text between `{` and `}`) into TokenKind
///
/// - `load a/b.tpl` → Include (path charset `[A-Za-z0-9_./]`, must end in `.tpl`)
/// - `loop name` → LoopStart (name charset `[A-Za-z0-9_]`)
/// - `/loop` → LoopEnd
/// - `:field` → LoopVar
/// - anything else → Placeholder
pub(crate) fn classify_content(content: &str) -> TokenKind {
    if let Some(path) = content.strip_prefix(LOAD_PREFIX) {
        if is_include_path(path) {
            return TokenKind::Include {
                path: path.to_string(),
            };
        }
    } else if let Some(name) = content.strip_prefix(LOOP_PREFIX) {
        if is_name(name) {
            return TokenKind::LoopStart {
                name: name.to_string(),
            };
        }
    } else if content == LOOP_END {
        return TokenKind::LoopEnd;
    } else if let Some(field) = content.strip_prefix(LOOP_VAR_PREFIX) {
        if is_name(field) {
            return TokenKind::LoopVar {
                field: field.to_string(),
            };
        }
    }

    TokenKind::Placeholder {
        name: content.to_string(),
    }
}

/// `[A-Za-z0-9_]+`
pub(crate) fn is_name(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// `[A-Za-z0-9_./]+\.tpl`
pub(crate) fn is_include_path(s: &str) -> bool {
    s.len() > TEMPLATE_EXTENSION.len()
        && s.ends_with(TEMPLATE_EXTENSION)
        && s.bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'.' | b'/'))
}
