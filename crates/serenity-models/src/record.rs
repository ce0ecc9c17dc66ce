//! Educational resource records.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field holding the human-readable title of a resource.
pub const DEFAULT_TITLE_FIELD: &str = "title";

/// Label used in logs when a record carries no usable title.
pub const UNKNOWN_TITLE: &str = "Unknown";

/// One educational resource as read from the import file.
///
/// The record is an unordered mapping of field name to JSON value. Apart from
/// the title (used for logging only) no field is interpreted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceRecord(Map<String, Value>);

impl ResourceRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Builder-style field insertion.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    /// Check whether the record has a field, regardless of its value.
    pub fn contains_field(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Get a field value.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// The title stored under `field`, if it is a string.
    pub fn title(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }

    /// Title for log lines, falling back to [`UNKNOWN_TITLE`].
    pub fn label(&self, field: &str) -> &str {
        self.title(field).unwrap_or(UNKNOWN_TITLE)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for ResourceRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}
