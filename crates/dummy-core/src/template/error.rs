//! Template error types

use std::path::PathBuf;
use thiserror::Error;

/// Template loading and rendering errors
#[derive(Debug, Error)]
pub enum TemplateError {
    /// A top-level or included template file does not exist
    #[error("Template does not exist: {}", path.display())]
    TemplateNotFound {
        /// Full path that was looked up
        path: PathBuf,
    },

    /// The configured base directory does not resolve to an existing directory
    #[error("Template dir {} does not exist: {reason}", path.display())]
    InvalidDirectory {
        /// Directory as given by the caller
        path: PathBuf,
        /// Why it was rejected
        reason: String,
    },

    /// The base directory was changed after a template had been loaded
    #[error("Template dir must be set before any template is loaded")]
    BaseDirectoryAfterLoad,

    /// Include expansion revisited a template already being expanded,
    /// or exceeded the configured expansion limit
    #[error("Cyclic include detected: {}", chain.join(" -> "))]
    CyclicInclude {
        /// Include chain leading to the cycle, outermost first
        chain: Vec<String>,
    },

    /// A `{loop}` tag was opened inside another loop body
    #[error("Nested loop '{inner}' inside loop '{outer}' at line {line} is not supported")]
    NestedLoop {
        /// Loop that was still open
        outer: String,
        /// Loop that was opened inside it
        inner: String,
        /// Line number of the inner `{loop}` tag
        line: usize,
    },

    /// Reading a template failed for a reason other than absence
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        /// Full path being read
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl TemplateError {
    /// Create a template not found error for the given path
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::TemplateNotFound { path: path.into() }
    }

    /// Create an invalid directory error
    pub fn invalid_directory(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidDirectory {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
