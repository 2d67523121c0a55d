//! Row records: an integer id plus a name → typed value mapping.

use std::collections::HashMap;
use std::fmt;

use crate::common::Key;
use crate::schema::Value;

/// A record stored in a leaf, keyed by its integer id.
///
/// Field names must match schema columns; the tree engine validates this on
/// insert (full row required) and update (partial rows allowed).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    id: Key,
    fields: HashMap<String, Value>,
}

impl Row {
    /// Create an empty row with the given id.
    pub fn new(id: Key) -> Self {
        Self {
            id,
            fields: HashMap::new(),
        }
    }

    /// Create a row from an id and a prepared field map.
    pub fn with_fields(id: Key, fields: HashMap<String, Value>) -> Self {
        Self { id, fields }
    }

    pub fn id(&self) -> Key {
        self.id
    }

    /// Set a field value, replacing any previous value.
    pub fn set(&mut self, column: impl Into<String>, value: Value) -> &mut Self {
        self.fields.insert(column.into(), value);
        self
    }

    /// Get a field value by column name.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.fields.get(column)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.fields.contains_key(column)
    }

    /// Iterate the field names present in this row.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Merge another field map into this row, overwriting on collision.
    /// Columns absent from `updates` keep their current values.
    pub fn merge(&mut self, updates: &HashMap<String, Value>) {
        for (name, value) in updates {
            self.fields.insert(name.clone(), value.clone());
        }
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Row{{id={}", self.id)?;
        // Sort for a stable rendering; HashMap iteration order is arbitrary.
        let mut names: Vec<&str> = self.fields.keys().map(String::as_str).collect();
        names.sort_unstable();
        for name in names {
            write!(f, ", {}={:?}", name, self.fields[name])?;
        }
        write!(f, "}}")
    }
}
