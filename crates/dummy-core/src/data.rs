//! Render data files
//!
//! A data file fills a template in one go. Every scalar top-level key becomes
//! a plain variable and every array of tables becomes a loop:
//!
//! ```toml
//! title = "Queen"
//!
//! [[artists]]
//! name = "Freddie"
//! age = 65
//!
//! [[artists]]
//! name = "Brian"
//! age = 66
//! ```
//!
//! The same shape is accepted as JSON.

use crate::error::{DummyError, Result};
use crate::template::{Dummy, FieldValue, Record, TemplateError};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DataEntry {
    Records(Vec<Record>),
    Value(FieldValue),
}

/// Variables and loop records to apply to a resolved template
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderData {
    /// Plain variables, applied first
    pub vars: Vec<(String, String)>,
    /// Loop records by loop name, applied after the variables
    pub loops: Vec<(String, Vec<Record>)>,
}

impl RenderData {
    /// Read a `.toml` or `.json` data file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| DummyError::DataRead {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&content),
            Some("json") => Self::from_json_str(&content),
            _ => Err(DummyError::DataUnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let entries: BTreeMap<String, DataEntry> = toml::from_str(content)?;
        Ok(Self::from_entries(entries))
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let entries: BTreeMap<String, DataEntry> = serde_json::from_str(content)?;
        Ok(Self::from_entries(entries))
    }

    fn from_entries(entries: BTreeMap<String, DataEntry>) -> Self {
        let mut data = Self::default();
        for (key, entry) in entries {
            match entry {
                DataEntry::Records(records) => data.loops.push((key, records)),
                DataEntry::Value(value) => data.vars.push((key, value.to_string())),
            }
        }
        data
    }

    /// Set a plain variable, overriding any value already read for it
    pub fn set(&mut self, name: impl Into<String>, value: impl ToString) {
        let name = name.into();
        let value = value.to_string();

        match self.vars.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, current)) => *current = value,
            None => self.vars.push((name, value)),
        }
    }

    /// Apply variables, then loops, to the engine's resolved template
    ///
    /// Returns the names of loops the template does not contain.
    pub fn apply(&self, dummy: &mut Dummy) -> std::result::Result<Vec<String>, TemplateError> {
        for (name, value) in &self.vars {
            dummy.replace(name, value);
        }

        let mut unknown = Vec::new();
        for (name, records) in &self.loops {
            if !dummy.assign_loop(name, records)? {
                unknown.push(name.clone());
            }
        }

        Ok(unknown)
    }
}
