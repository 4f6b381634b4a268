//! Template engine implementation

mod blocks;
mod include;
mod render;
mod tokenize;

use crate::config::consts::DEFAULT_MAX_INCLUDES;
use crate::config::Config;
use crate::template::error::TemplateError;
use crate::template::loader::{FileSystemLoader, TemplateLoader};
use crate::template::record::Record;
use std::collections::HashMap;
use std::fmt::Display;
use std::path::{Path, PathBuf};

pub use blocks::{extract_loops, loop_inner_pattern, LoopMap};
pub use include::resolve_includes;
pub use render::{loop_fields, render_loop, MissingFieldPolicy};

use tokenize::{TokenKind, TokenStream};

/// Rendering options of a [`Dummy`] instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// How loop records lacking a referenced field are rendered
    pub missing_field: MissingFieldPolicy,
    /// Upper bound on include expansions for one resolution
    pub max_includes: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            missing_field: MissingFieldPolicy::Empty,
            max_includes: DEFAULT_MAX_INCLUDES,
        }
    }
}

/// A template known to the engine
#[derive(Debug, Clone)]
struct Template {
    /// Text as read from the loader
    raw: String,
    /// Text after include expansion; mutated by `replace` / `assign_loop`
    resolved: Option<String>,
}

/// Template engine holding one resolved template
///
/// The first call to [`Dummy::get`] (or [`Dummy::parse`]) loads a template,
/// inlines its nested templates and keeps the result. Every later call
/// returns that same text, whatever filename is passed: one engine renders
/// one template. Values and loops are then written into the resolved text in
/// place.
///
/// ```rust
/// use dummy_core::template::{Dummy, MemoryLoader};
/// use dummy_core::Record;
///
/// let loader = MemoryLoader::new()
///     .with("page.tpl", "Hello {name}! {load band.tpl}")
///     .with("band.tpl", "{loop artists}{:name} {/loop}");
/// let mut dummy = Dummy::with_loader(loader);
///
/// dummy.get("page.tpl").unwrap();
/// dummy.replace("name", "World");
/// let artists = [Record::from([("name", "Freddie")]), Record::from([("name", "Brian")])];
/// assert!(dummy.assign_loop("artists", &artists).unwrap());
///
/// assert_eq!(dummy.resolved(), Some("Hello World! Freddie Brian "));
/// ```
pub struct Dummy {
    loader: Box<dyn TemplateLoader>,
    options: EngineOptions,
    base_dir: Option<PathBuf>,
    templates: HashMap<String, Template>,
    /// Name of the resolved template, once there is one
    primary: Option<String>,
    /// Loop blocks of the resolved text, extracted on first use
    loops: Option<LoopMap>,
}

impl Dummy {
    /// Create an engine reading templates from the filesystem
    pub fn new() -> Self {
        Self::with_loader(FileSystemLoader::new())
    }

    /// Create an engine reading templates through `loader`
    pub fn with_loader(loader: impl TemplateLoader + 'static) -> Self {
        Self::with_options(loader, EngineOptions::default())
    }

    /// Create an engine with explicit rendering options
    pub fn with_options(loader: impl TemplateLoader + 'static, options: EngineOptions) -> Self {
        Self {
            loader: Box::new(loader),
            options,
            base_dir: None,
            templates: HashMap::new(),
            primary: None,
            loops: None,
        }
    }

    /// Create a filesystem engine from a `dummy.toml` configuration
    ///
    /// `config_path` is the file the configuration was read from; a relative
    /// `templates.dir` is resolved against its parent directory.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDirectory` if the configured template dir does not exist.
    pub fn from_config(config: &Config, config_path: &Path) -> Result<Self, TemplateError> {
        let mut dummy = Self::with_options(FileSystemLoader::new(), config.engine_options());
        if let Some(dir) = config.template_dir(config_path) {
            dummy.set_base_directory(dir)?;
        }
        Ok(dummy)
    }

    /// Rendering options this engine was built with
    pub fn options(&self) -> EngineOptions {
        self.options
    }

    /// Canonical base directory, if one was set
    pub fn base_directory(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }

    /// Read templates (and their nested templates) relative to `dir`
    ///
    /// # Errors
    ///
    /// - `InvalidDirectory` if `dir` does not resolve to an existing directory
    /// - `BaseDirectoryAfterLoad` if a template was already loaded
    pub fn set_base_directory(&mut self, dir: impl AsRef<Path>) -> Result<(), TemplateError> {
        if !self.templates.is_empty() {
            return Err(TemplateError::BaseDirectoryAfterLoad);
        }

        let resolved = self.loader.resolve_dir(dir.as_ref())?;
        tracing::debug!(dir = %resolved.display(), "template dir set");
        self.base_dir = Some(resolved);
        Ok(())
    }

    /// Raw text of `filename`, read once and cached
    ///
    /// # Errors
    ///
    /// Returns `TemplateNotFound` if the file does not exist.
    pub fn load(&mut self, filename: &str) -> Result<String, TemplateError> {
        if let Some(template) = self.templates.get(filename) {
            return Ok(template.raw.clone());
        }

        let path = self.template_path(filename);
        let raw = self.loader.read(&path)?;
        tracing::debug!(template = filename, path = %path.display(), "template loaded");

        self.templates.insert(
            filename.to_string(),
            Template {
                raw: raw.clone(),
                resolved: None,
            },
        );
        Ok(raw)
    }

    /// Load `filename` and inline its nested templates, unless a template
    /// has already been resolved by this engine
    ///
    /// # Errors
    ///
    /// - `TemplateNotFound` if the template or any nested template is missing
    /// - `CyclicInclude` if nested templates include each other
    pub fn parse(&mut self, filename: &str) -> Result<(), TemplateError> {
        if let Some(primary) = &self.primary {
            if primary != filename {
                tracing::debug!(
                    requested = filename,
                    resolved = primary.as_str(),
                    "engine already holds a resolved template"
                );
            }
            return Ok(());
        }

        let raw = self.load(filename)?;
        let max_includes = self.options.max_includes;
        let resolved = resolve_includes(filename, &raw, |path| self.load(path), max_includes)?;

        if let Some(template) = self.templates.get_mut(filename) {
            template.resolved = Some(resolved);
        }
        self.primary = Some(filename.to_string());
        self.loops = None;
        Ok(())
    }

    /// The resolved template text
    ///
    /// On the first call this loads and resolves `filename`; afterwards it
    /// returns the current state of that first template, including all
    /// replacements and loops assigned so far.
    ///
    /// # Errors
    ///
    /// See [`Dummy::parse`].
    pub fn get(&mut self, filename: &str) -> Result<&str, TemplateError> {
        self.parse(filename)?;
        Ok(self.resolved().unwrap_or_default())
    }

    /// The resolved template text, if a template has been resolved
    pub fn resolved(&self) -> Option<&str> {
        let primary = self.primary.as_ref()?;
        self.templates.get(primary)?.resolved.as_deref()
    }

    /// Consume the engine, returning the resolved template text
    pub fn into_output(mut self) -> Option<String> {
        let primary = self.primary.take()?;
        self.templates.remove(&primary)?.resolved
    }

    /// Replace every `{name}` in the resolved template with `value`
    ///
    /// A placeholder that does not occur is not an error; neither is calling
    /// this before a template has been resolved.
    pub fn replace(&mut self, name: &str, value: impl Display) {
        let placeholder = format!("{{{}}}", name);
        let Some(text) = self.resolved_mut() else {
            return;
        };

        if text.contains(&placeholder) {
            *text = text.replace(&placeholder, &value.to_string());
            self.loops = None;
        }
    }

    /// Render the loop block `name` once per record, in place
    ///
    /// Only the first copy of the block is rendered. When the template holds
    /// identical copies, each later call renders the next one.
    ///
    /// Returns `Ok(false)`, leaving the template untouched, when the resolved
    /// template has no loop with that name.
    ///
    /// # Errors
    ///
    /// Returns `NestedLoop` if the resolved template contains a loop inside
    /// another loop.
    pub fn assign_loop(&mut self, name: &str, records: &[Record]) -> Result<bool, TemplateError> {
        let Some(block) = self.loops()?.get(name).cloned() else {
            return Ok(false);
        };

        let rendered = render_loop(&block, records, self.options.missing_field);
        let mut consumed = true;
        if let Some(text) = self.resolved_mut() {
            if let Some(at) = text.find(&block) {
                text.replace_range(at..at + block.len(), &rendered);
            }
            // An identical copy of the block stays assignable
            consumed = !text.contains(&block);
        }
        if consumed {
            if let Some(loops) = self.loops.as_mut() {
                loops.remove(name);
            }
        }

        tracing::debug!(loop_name = name, records = records.len(), "loop assigned");
        Ok(true)
    }

    /// Names of the loop blocks still present in the resolved template
    ///
    /// # Errors
    ///
    /// Returns `NestedLoop` if a loop is opened inside another loop.
    pub fn loop_names(&mut self) -> Result<Vec<String>, TemplateError> {
        Ok(self.loops()?.keys().cloned().collect())
    }

    /// Plain `{name}` placeholders still present in the resolved template,
    /// in order of first appearance
    pub fn placeholders(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for token in TokenStream::new(self.resolved().unwrap_or_default()) {
            if let TokenKind::Placeholder { name } = token.kind {
                if !name.is_empty() && !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }

    fn loops(&mut self) -> Result<&LoopMap, TemplateError> {
        if self.loops.is_none() {
            let loops = extract_loops(self.resolved().unwrap_or_default())?;
            self.loops = Some(loops);
        }
        Ok(self.loops.get_or_insert_with(LoopMap::new))
    }

    fn resolved_mut(&mut self) -> Option<&mut String> {
        let primary = self.primary.as_ref()?;
        self.templates.get_mut(primary)?.resolved.as_mut()
    }

    fn template_path(&self, filename: &str) -> PathBuf {
        match &self.base_dir {
            Some(base) => base.join(filename.trim_start_matches('/')),
            None => PathBuf::from(filename),
        }
    }
}

impl Default for Dummy {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
