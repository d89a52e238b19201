//! Host document records.
//!
//! A host document carries the entry's nested data under `data` plus
//! top-level fields (`name`, and anything else the host stores beside it)
//! that the entry's own schema does not own.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::entry_kind::EntryKind;
use crate::error::DomainError;
use crate::ids::DocumentId;

/// Field name -> required value. Matched by equality against a document's
/// nested `data` fields.
pub type Criteria = BTreeMap<String, Value>;

/// A document as the host persists it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDocument {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub name: String,
    #[serde(default)]
    pub data: Value,
    /// Remaining top-level fields (`img`, `flags`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawDocument {
    pub fn new(id: DocumentId, kind: EntryKind, name: impl Into<String>, data: Value) -> Self {
        Self {
            id,
            kind,
            name: name.into(),
            data,
            extra: Map::new(),
        }
    }

    /// True when every criterion equals the same-named nested data field.
    pub fn matches(&self, criteria: &Criteria) -> bool {
        criteria
            .iter()
            .all(|(key, expected)| self.data.get(key) == Some(expected))
    }
}

/// Create request for one document, tagged with its kind and name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDocument {
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub name: String,
    pub data: Value,
}

impl NewDocument {
    /// Tag a raw record. The name is taken from the record's own `name`
    /// field, falling back to the kind's default name.
    ///
    /// Records must be JSON objects; anything else could not be read back
    /// as an entry.
    pub fn from_record(kind: EntryKind, record: Value) -> Result<Self, DomainError> {
        if !record.is_object() {
            return Err(DomainError::invalid_payload(format!(
                "record must be an object, got {}",
                record
            )));
        }
        let name = record
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| kind.default_name());
        Ok(Self {
            kind,
            name,
            data: record,
        })
    }
}

/// Persistence record for a bulk update: `{_id, data, ...top_level}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentBlob(Map<String, Value>);

impl DocumentBlob {
    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Target document id, if the `_id` key holds a valid one.
    pub fn id(&self) -> Option<DocumentId> {
        self.0
            .get("_id")
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.0
    }
}
