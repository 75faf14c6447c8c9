//! Records and artifacts
//!
//! - [`Record`]: one row, an insertion-ordered mapping from column name to [`Value`]
//! - [`Artifact`]: a named, ordered sequence of records persisted as one file
//!
//! Records in one artifact do not need to share a column set. The column
//! order of an artifact is the order in which column names are first seen
//! while walking the rows top to bottom.

use crate::error::{Error, Result};
use crate::value::Value;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// One row of an artifact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    fields: IndexMap<String, Value>,
}

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    ///
    /// ```
    /// use runarchive_core::{Record, Value};
    ///
    /// let row = Record::new().with("Name", "John").with("Age", 28);
    /// assert_eq!(row.get("Age"), Some(&Value::Int(28)));
    /// ```
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(column, value);
        self
    }

    /// Insert or replace a field. A replaced field keeps its position.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(column.into(), value.into());
    }

    /// Get a field value
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.fields.get(column)
    }

    /// Column names in insertion order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Build a record from a JSON object, keeping key order.
    pub fn from_json(json: &serde_json::Value) -> Result<Self> {
        match json {
            serde_json::Value::Object(map) => Ok(map
                .iter()
                .map(|(k, v)| (k.clone(), Value::from_json(v)))
                .collect()),
            other => Err(Error::InvalidInput(format!(
                "expected a JSON object for a record, got {}",
                json_kind(other)
            ))),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Record {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// A named table produced during a run.
///
/// Names are not required to be unique within a run. Two artifacts with the
/// same name target the same file and the later save overwrites the earlier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    /// Identifier used in the output file name
    pub name: String,
    /// Ordered rows
    pub rows: Vec<Record>,
}

impl Artifact {
    /// Create an artifact with no rows
    pub fn new(name: impl Into<String>) -> Self {
        Artifact {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    /// Create an artifact from existing rows
    pub fn with_rows(name: impl Into<String>, rows: Vec<Record>) -> Self {
        Artifact {
            name: name.into(),
            rows,
        }
    }

    /// Append a row
    pub fn push(&mut self, row: Record) {
        self.rows.push(row);
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Column names in first-seen order across all rows
    pub fn columns(&self) -> Vec<&str> {
        let mut seen: IndexSet<&str> = IndexSet::new();
        for row in &self.rows {
            seen.extend(row.columns());
        }
        seen.into_iter().collect()
    }

    /// Build an artifact from a JSON array of objects.
    pub fn from_json(name: impl Into<String>, json: &serde_json::Value) -> Result<Self> {
        let items = json.as_array().ok_or_else(|| {
            Error::InvalidInput(format!(
                "expected a JSON array of objects, got {}",
                json_kind(json)
            ))
        })?;
        let rows = items
            .iter()
            .map(Record::from_json)
            .collect::<Result<Vec<_>>>()?;
        Ok(Artifact::with_rows(name, rows))
    }
}

fn json_kind(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_keeps_insertion_order() {
        let row = Record::new().with("b", 1).with("a", 2).with("c", 3);
        let cols: Vec<_> = row.columns().collect();
        assert_eq!(cols, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_record_replace_keeps_position() {
        let mut row = Record::new().with("a", 1).with("b", 2);
        row.insert("a", 10);
        let cols: Vec<_> = row.columns().collect();
        assert_eq!(cols, vec!["a", "b"]);
        assert_eq!(row.get("a"), Some(&Value::Int(10)));
    }

    #[test]
    fn test_columns_first_seen_order() {
        let artifact = Artifact::with_rows(
            "t",
            vec![
                Record::new().with("A", 1),
                Record::new().with("C", 2).with("A", 3),
                Record::new().with("B", 4).with("C", 5),
            ],
        );
        assert_eq!(artifact.columns(), vec!["A", "C", "B"]);
    }

    #[test]
    fn test_columns_empty_artifact() {
        assert!(Artifact::new("empty").columns().is_empty());
    }

    #[test]
    fn test_artifact_from_json_preserves_key_order() {
        let json = json!([{"Name": "John", "Age": 28}, {"Name": "Sara", "Age": 24}]);
        let artifact = Artifact::from_json("people", &json).unwrap();
        assert_eq!(artifact.row_count(), 2);
        assert_eq!(artifact.columns(), vec!["Name", "Age"]);
        assert_eq!(
            artifact.rows[1].get("Name"),
            Some(&Value::String("Sara".into()))
        );
    }

    #[test]
    fn test_artifact_from_json_rejects_non_array() {
        let err = Artifact::from_json("x", &json!({"a": 1})).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_artifact_from_json_rejects_non_object_row() {
        let err = Artifact::from_json("x", &json!([{"a": 1}, 2])).unwrap_err();
        assert!(err.to_string().contains("a number"));
    }

    #[test]
    fn test_record_from_iter() {
        let row: Record = vec![("x", Value::Int(1)), ("y", Value::Null)]
            .into_iter()
            .collect();
        assert_eq!(row.len(), 2);
        assert_eq!(row.get("y"), Some(&Value::Null));
    }
}
