//! Records and record identity
//!
//! A [`Record`] is one row of caller data: an open map from field name to
//! JSON value. The engine never imposes a schema on it; the only structural
//! requirement is a stable `id` field (string or number) used for identity.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// An open, schema-less row of caller data
///
/// # Example
/// ```
/// use listwise::core::record::Record;
/// use serde_json::json;
///
/// let record = Record::from_value(json!({
///     "id": 1,
///     "status": "open",
///     "doctor": { "name": "Martin" },
/// })).unwrap();
///
/// assert_eq!(record.get("status"), Some(&json!("open")));
/// assert_eq!(record.get_path("doctor.name"), Some(&json!("Martin")));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    /// Create a record from a field map
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Create a record from a JSON value; `None` unless the value is an object
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self { fields }),
            _ => None,
        }
    }

    /// Get a top-level field value
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Get a field value by dot path (e.g. `"case.type"`)
    ///
    /// Used by filter remapping rules, where a filter key reads a nested
    /// attribute instead of a same-named top-level field.
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let mut current = self.fields.get(segments.next()?)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// The record's identity, extracted from its `id` field
    pub fn id(&self) -> Option<RecordId> {
        self.fields.get("id").and_then(RecordId::from_value)
    }

    /// All fields of the record
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}

/// A record identity: the `id` field, string or integer
///
/// Identity is used only by selection and deletion. Filtering, sorting and
/// search never consult it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl RecordId {
    /// Extract an identity from a JSON value
    ///
    /// Strings and integers map directly; other numbers fall back to their
    /// string form so identity stays hashable. Structured values are not
    /// identities.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Number(n) => Some(
                n.as_i64()
                    .map_or_else(|| Self::Text(n.to_string()), Self::Int),
            ),
            _ => None,
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(n) => write!(f, "{}", n),
            RecordId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}
