//! Template module - Minimal text substitution template engine
//!
//! This module provides a lightweight engine for rendering plain-text `.tpl`
//! files. A template is loaded once per engine instance, its nested templates
//! are inlined, and the caller then fills it in place with values and loops.
//!
//! ## Philosophy
//!
//! - **Pure text substitution**: no expressions, no conditionals, no escaping
//! - **One template per engine**: the first resolved template is the only one
//! - **In-place mutation**: every `replace` / `assign_loop` edits the resolved text
//!
//! ## Syntax
//!
//! - Includes: `{load path/to/file.tpl}` (resolved recursively)
//! - Plain variables: `{name}`
//! - Loops: `{loop artists}Name: {:name}{/loop}` (no nesting)
//! - Loop variables: `{:field}` (only meaningful inside a loop body)

pub mod engine;
pub mod error;
pub mod loader;
pub mod record;

pub use engine::{
    extract_loops, loop_fields, loop_inner_pattern, render_loop, resolve_includes, Dummy,
    EngineOptions, LoopMap, MissingFieldPolicy,
};
pub use error::TemplateError;
pub use loader::{FileSystemLoader, MemoryLoader, TemplateLoader};
pub use record::{FieldValue, Record};
