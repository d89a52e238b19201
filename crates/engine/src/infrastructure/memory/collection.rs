//! In-memory live collection.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use docsource_domain::{DocumentBlob, DocumentId, NewDocument, RawDocument};
use serde_json::Value;

use super::snapshot::DocumentSnapshot;
use crate::infrastructure::ports::{ActorDocument, LiveCollection, StoreError, WriteContext};

struct Slot {
    seq: u64,
    doc: RawDocument,
}

/// Documents keyed by id, enumerated in insertion order.
///
/// Actor documents get an embedded item collection on first access.
#[derive(Default)]
pub struct MemoryCollection {
    docs: DashMap<DocumentId, Slot>,
    next_seq: AtomicU64,
    embedded: DashMap<DocumentId, Arc<MemoryCollection>>,
}

impl MemoryCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a document, keeping its id.
    pub fn insert(&self, doc: RawDocument) -> DocumentId {
        let id = doc.id;
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.docs.insert(id, Slot { seq, doc });
        id
    }

    /// Insert an actor document together with its embedded items.
    pub fn insert_actor(&self, doc: RawDocument, items: Vec<RawDocument>) -> DocumentId {
        let id = self.insert(doc);
        let embedded = self.embedded_items(id);
        for item in items {
            embedded.insert(item);
        }
        id
    }

    /// Actor document `id`, if present and of an actor-like kind.
    pub fn actor(&self, id: DocumentId) -> Option<Arc<MemoryActor>> {
        let is_actor = self
            .docs
            .get(&id)
            .map(|slot| slot.doc.kind.is_actor_like())
            .unwrap_or(false);
        is_actor.then(|| {
            Arc::new(MemoryActor {
                id,
                items: self.embedded_items(id),
            })
        })
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Documents in insertion order, embedded items attached to actors.
    pub fn snapshot(&self) -> Vec<DocumentSnapshot> {
        self.ordered()
            .into_iter()
            .map(|doc| {
                let items = self
                    .embedded
                    .get(&doc.id)
                    .map(|items| items.ordered())
                    .unwrap_or_default();
                DocumentSnapshot {
                    document: doc,
                    items,
                }
            })
            .collect()
    }

    fn embedded_items(&self, id: DocumentId) -> Arc<MemoryCollection> {
        self.embedded.entry(id).or_default().value().clone()
    }

    fn ordered(&self) -> Vec<RawDocument> {
        let mut slots: Vec<(u64, RawDocument)> = self
            .docs
            .iter()
            .map(|slot| (slot.seq, slot.doc.clone()))
            .collect();
        slots.sort_by_key(|(seq, _)| *seq);
        slots.into_iter().map(|(_, doc)| doc).collect()
    }

    pub(super) fn create(&self, records: Vec<NewDocument>) -> Vec<RawDocument> {
        records
            .into_iter()
            .map(|record| {
                let doc =
                    RawDocument::new(DocumentId::new(), record.kind, record.name, record.data);
                self.insert(doc.clone());
                doc
            })
            .collect()
    }

    /// Apply every blob or none: all targets are checked before any write.
    pub(super) fn update(&self, blobs: Vec<DocumentBlob>) -> Result<(), StoreError> {
        let mut targets = Vec::with_capacity(blobs.len());
        for blob in &blobs {
            let id = blob
                .id()
                .ok_or_else(|| StoreError::backend("update_documents", "blob without _id"))?;
            if !self.docs.contains_key(&id) {
                return Err(StoreError::not_found("Document", id));
            }
            targets.push(id);
        }

        for (id, blob) in targets.into_iter().zip(blobs) {
            if let Some(mut slot) = self.docs.get_mut(&id) {
                apply_blob(&mut slot.doc, blob);
            }
        }
        Ok(())
    }

    pub(super) fn delete(&self, ids: Vec<DocumentId>) -> Result<(), StoreError> {
        if let Some(missing) = ids.iter().find(|id| !self.docs.contains_key(*id)) {
            return Err(StoreError::not_found("Document", missing));
        }
        for id in ids {
            self.docs.remove(&id);
            self.embedded.remove(&id);
        }
        Ok(())
    }
}

fn apply_blob(doc: &mut RawDocument, blob: DocumentBlob) {
    for (key, value) in blob.into_fields() {
        match key.as_str() {
            // Identity and kind are fixed once a document exists
            "_id" | "type" => {}
            "name" => {
                if let Value::String(name) = value {
                    doc.name = name;
                }
            }
            "data" => doc.data = value,
            _ => {
                doc.extra.insert(key, value);
            }
        }
    }
}

#[async_trait]
impl LiveCollection for MemoryCollection {
    fn get(&self, id: DocumentId) -> Option<RawDocument> {
        self.docs.get(&id).map(|slot| slot.doc.clone())
    }

    fn contents(&self) -> Vec<RawDocument> {
        self.ordered()
    }

    async fn create_documents(
        &self,
        records: Vec<NewDocument>,
        context: WriteContext,
    ) -> Result<Vec<RawDocument>, StoreError> {
        tracing::debug!(count = records.len(), %context, "Creating documents");
        Ok(self.create(records))
    }

    async fn update_documents(
        &self,
        blobs: Vec<DocumentBlob>,
        context: WriteContext,
    ) -> Result<(), StoreError> {
        tracing::debug!(count = blobs.len(), %context, "Updating documents");
        self.update(blobs)
    }

    async fn delete_documents(
        &self,
        ids: Vec<DocumentId>,
        context: WriteContext,
    ) -> Result<(), StoreError> {
        tracing::debug!(count = ids.len(), %context, "Deleting documents");
        self.delete(ids)
    }
}

/// Actor document with its embedded item collection.
pub struct MemoryActor {
    id: DocumentId,
    items: Arc<MemoryCollection>,
}

impl ActorDocument for MemoryActor {
    fn id(&self) -> DocumentId {
        self.id
    }

    fn items(&self) -> Arc<dyn LiveCollection> {
        self.items.clone()
    }
}
