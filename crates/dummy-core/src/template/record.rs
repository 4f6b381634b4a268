//! Loop records

use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::fmt;

/// One set of named values for a single loop iteration
///
/// Fields keep their insertion order. Inserting a name that already exists
/// replaces its value in place.
///
/// ```rust
/// use dummy_core::Record;
///
/// let freddie = Record::from([("name", "Freddie"), ("age", "65")]);
/// assert_eq!(freddie.get("name"), Some("Freddie"));
///
/// let brian = Record::new().with("name", "Brian").with("age", 66);
/// assert_eq!(brian.get("age"), Some("66"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field, builder style
    pub fn with(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.insert(name, value);
        self
    }

    /// Set a field, returning the previous value if it was already present
    pub fn insert(&mut self, name: impl Into<String>, value: impl ToString) -> Option<String> {
        let name = name.into();
        let value = value.to_string();

        match self.fields.iter_mut().find(|(field, _)| *field == name) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.fields.push((name, value));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over `(name, value)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (name, value) in iter {
            record.insert(name, value);
        }
        record
    }
}

impl<K: Into<String>, V: ToString, const N: usize> From<[(K, V); N]> for Record {
    fn from(fields: [(K, V); N]) -> Self {
        fields.into_iter().collect()
    }
}

/// Scalar value accepted for a record field or a plain variable
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Null,
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => f.write_str(s),
            FieldValue::Integer(i) => write!(f, "{}", i),
            FieldValue::Float(x) => write!(f, "{}", x),
            FieldValue::Boolean(b) => write!(f, "{}", b),
            FieldValue::Null => Ok(()),
        }
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Tables are read through a sorted map, so fields come out by name
        let fields = BTreeMap::<String, FieldValue>::deserialize(deserializer)?;
        Ok(fields.into_iter().collect())
    }
}
