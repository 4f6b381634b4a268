//! Template file access
//!
//! The engine never touches the filesystem directly. It reads template text
//! and resolves base directories through a [`TemplateLoader`], so templates
//! can come from disk ([`FileSystemLoader`]) or from memory ([`MemoryLoader`]).

use crate::template::error::TemplateError;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

/// Source of template text
pub trait TemplateLoader {
    /// Read the full text stored at `path`
    ///
    /// # Errors
    ///
    /// Returns `TemplateNotFound` if nothing exists at `path`.
    fn read(&self, path: &Path) -> Result<String, TemplateError>;

    /// Resolve `path` to the canonical directory it names
    ///
    /// # Errors
    ///
    /// Returns `InvalidDirectory` if `path` does not name an existing directory.
    fn resolve_dir(&self, path: &Path) -> Result<PathBuf, TemplateError>;
}

/// Loader reading templates from the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSystemLoader;

impl FileSystemLoader {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateLoader for FileSystemLoader {
    fn read(&self, path: &Path) -> Result<String, TemplateError> {
        std::fs::read_to_string(path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => TemplateError::not_found(path),
            _ => TemplateError::Io {
                path: path.to_path_buf(),
                source,
            },
        })
    }

    fn resolve_dir(&self, path: &Path) -> Result<PathBuf, TemplateError> {
        let canonical = std::fs::canonicalize(path)
            .map_err(|e| TemplateError::invalid_directory(path, e.to_string()))?;

        if !canonical.is_dir() {
            return Err(TemplateError::invalid_directory(path, "not a directory"));
        }

        Ok(canonical)
    }
}

/// Loader serving templates from an in-memory map
///
/// Paths are normalized lexically, so `views/../shared/a.tpl` and
/// `shared/a.tpl` name the same entry. A directory exists when at least one
/// stored template lives below it.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    files: HashMap<PathBuf, String>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a template, builder style
    pub fn with(mut self, path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    /// Add or overwrite a template
    pub fn insert(&mut self, path: impl AsRef<Path>, content: impl Into<String>) {
        self.files.insert(normalize(path.as_ref()), content.into());
    }
}

impl TemplateLoader for MemoryLoader {
    fn read(&self, path: &Path) -> Result<String, TemplateError> {
        self.files
            .get(&normalize(path))
            .cloned()
            .ok_or_else(|| TemplateError::not_found(path))
    }

    fn resolve_dir(&self, path: &Path) -> Result<PathBuf, TemplateError> {
        let dir = normalize(path);

        if self.files.contains_key(&dir) {
            return Err(TemplateError::invalid_directory(path, "not a directory"));
        }

        let exists = dir.as_os_str().is_empty()
            || self.files.keys().any(|file| file.starts_with(&dir));
        if !exists {
            return Err(TemplateError::invalid_directory(path, "no such directory"));
        }

        Ok(dir)
    }
}

/// Lexically normalize a path: drop `.`, fold `..` into its parent
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let can_pop = matches!(out.components().next_back(), Some(Component::Normal(_)));
                if can_pop {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }

    out
}
