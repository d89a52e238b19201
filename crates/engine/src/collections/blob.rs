//! Persistence blobs for bulk updates.
//!
//! An entry's own name and its hosting document's top-level name can both be
//! edited independently. Before every write the two are reconciled, then the
//! entry's data and the document-level fields are merged into one record.

use docsource_domain::{DocumentBlob, LiveEntry};
use serde_json::{Map, Value};

/// Reconcile the entry name with the document's top-level name.
///
/// A top-level name that moved away from the load-time snapshot wins over the
/// entry. Otherwise a changed entry name wins and is copied to the top level.
pub fn reconcile_names(entry: &mut LiveEntry) {
    let top_level_name = entry.top_level().name.clone();
    if top_level_name != entry.last_known_doc_name() {
        entry.set_name(top_level_name);
    } else if entry.name() != entry.last_known_doc_name() {
        let entry_name = entry.name().to_string();
        entry.top_level_mut().name = entry_name;
    }
}

/// Build the update record `{_id, data, ...top_level}` for one entry.
///
/// Top-level keys are written last and take precedence over `_id`/`data`.
pub fn document_blob(entry: &mut LiveEntry) -> DocumentBlob {
    reconcile_names(entry);

    let mut fields = Map::new();
    fields.insert("_id".to_string(), Value::String(entry.id().to_string()));
    fields.insert("data".to_string(), entry.save());

    let top_level = entry.top_level();
    fields.insert("name".to_string(), Value::String(top_level.name.clone()));
    for (key, value) in &top_level.extra {
        fields.insert(key.clone(), value.clone());
    }

    DocumentBlob::from_map(fields)
}
