//! Live entries - the in-memory view of a host document.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::document::RawDocument;
use crate::entry_kind::EntryKind;
use crate::error::DomainError;
use crate::ids::DocumentId;

/// Pending document-level fields of an entry's hosting document.
///
/// `name` mirrors the document's top-level name; `extra` holds every other
/// top-level field that will be written alongside the entry's data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopLevelOverrides {
    pub name: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}

/// An entry loaded from a host document.
///
/// The entry owns its nested fields and its own name. The hosting document's
/// top-level fields are tracked separately so the two names can be reconciled
/// before the next write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveEntry {
    id: DocumentId,
    kind: EntryKind,
    name: String,
    fields: Map<String, Value>,
    top_level: TopLevelOverrides,
    last_known_doc_name: String,
}

impl LiveEntry {
    /// Build an entry from a persisted document.
    ///
    /// The entry name comes from the nested `name` field when present, else
    /// from the document name. The document name is snapshotted as the last
    /// known name.
    pub fn from_document(doc: &RawDocument) -> Result<Self, DomainError> {
        let fields = match &doc.data {
            Value::Object(map) => map.clone(),
            Value::Null => Map::new(),
            other => {
                return Err(DomainError::invalid_payload(format!(
                    "document {} data must be an object, got {}",
                    doc.id, other
                )))
            }
        };
        let name = fields
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| doc.name.clone());

        Ok(Self {
            id: doc.id,
            kind: doc.kind,
            name,
            fields,
            top_level: TopLevelOverrides {
                name: doc.name.clone(),
                extra: doc.extra.clone(),
            },
            last_known_doc_name: doc.name.clone(),
        })
    }

    pub fn id(&self) -> DocumentId {
        self.id
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Set one nested data field. `name` is routed to the entry name.
    pub fn set_field(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        if key == "name" {
            if let Value::String(name) = &value {
                self.name = name.clone();
                return;
            }
        }
        self.fields.insert(key, value);
    }

    pub fn top_level(&self) -> &TopLevelOverrides {
        &self.top_level
    }

    pub fn top_level_mut(&mut self) -> &mut TopLevelOverrides {
        &mut self.top_level
    }

    pub fn last_known_doc_name(&self) -> &str {
        &self.last_known_doc_name
    }

    /// Serialize the entry's own fields, its name included.
    pub fn save(&self) -> Value {
        let mut fields = self.fields.clone();
        fields.insert("name".to_string(), Value::String(self.name.clone()));
        Value::Object(fields)
    }
}

/// Result of reading one document through a collection wrapper.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GetResult {
    pub id: DocumentId,
    /// Raw persisted nested fields.
    pub data: Value,
    pub entity: LiveEntry,
    pub kind: EntryKind,
}

impl GetResult {
    pub fn from_document(doc: RawDocument) -> Result<Self, DomainError> {
        let entity = LiveEntry::from_document(&doc)?;
        Ok(Self {
            id: doc.id,
            data: doc.data,
            entity,
            kind: doc.kind,
        })
    }

    pub fn into_entity(self) -> LiveEntry {
        self.entity
    }
}
