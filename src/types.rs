//! Core data model types for extraction.
//!
//! A [`Schema`] is an ordered list of [`SchemaField`]s derived from a file's header row. Data
//! rows are paired positionally with their file's header to build [`Record`]s.

use serde_json::{json, Map, Value};

/// A single parsed CSV row: ordered text fields.
pub type Row = Vec<String>;

/// Logical data type for a schema field.
///
/// Column types are not inferred; every field is declared as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataType {
    /// UTF-8 string.
    #[default]
    Utf8,
}

impl DataType {
    /// JSON-schema type list for this data type. Values may be absent, so `null` is allowed.
    pub fn json_schema_type(&self) -> Value {
        match self {
            Self::Utf8 => json!(["string", "null"]),
        }
    }
}

/// A single named, typed field in a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaField {
    /// Field/column name.
    pub name: String,
    /// Field data type.
    pub data_type: DataType,
}

impl SchemaField {
    /// Create a new field.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }

    /// Create a text field.
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, DataType::Utf8)
    }
}

/// Ordered list of fields describing the shape of a stream's records.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schema {
    /// Ordered list of fields.
    pub fields: Vec<SchemaField>,
}

impl Schema {
    /// Create a new schema from fields.
    pub fn new(fields: Vec<SchemaField>) -> Self {
        Self { fields }
    }

    /// Build an all-text schema from a header row, preserving header order.
    pub fn from_header(header: &[String]) -> Self {
        Self::new(header.iter().map(SchemaField::text).collect())
    }

    /// Iterate field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Returns the index of a field by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Render as a JSON-schema object (`{"type": "object", "properties": {...}}`).
    pub fn to_json_schema(&self) -> Value {
        let mut properties = Map::new();
        for field in &self.fields {
            properties.insert(
                field.name.clone(),
                json!({ "type": field.data_type.json_schema_type() }),
            );
        }
        json!({
            "type": "object",
            "properties": properties,
        })
    }
}

/// One emitted row: field name (from the header) to field value (from the data row).
///
/// Fields keep header order. If a header repeats a name, the later value wins and the first
/// position is kept.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    /// Pair `header` and `row` positionally; pairing stops at the shorter of the two.
    pub fn zip(header: &[String], row: Row) -> Self {
        let mut record = Self {
            fields: Vec::with_capacity(header.len().min(row.len())),
        };
        for (name, value) in header.iter().zip(row) {
            record.insert(name.clone(), value);
        }
        record
    }

    fn insert(&mut self, name: String, value: String) {
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Value for `name`, if the record has that field.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Number of fields in the record.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate `(name, value)` pairs in header order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Render as a JSON object of string values.
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .fields
            .iter()
            .map(|(n, v)| (n.clone(), Value::String(v.clone())))
            .collect();
        Value::Object(map)
    }
}
