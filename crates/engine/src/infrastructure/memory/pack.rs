//! In-memory pack.

use std::sync::Arc;

use async_trait::async_trait;
use docsource_domain::{
    Criteria, DocumentBlob, DocumentId, EntryKind, NewDocument, PackId, RawDocument,
};

use super::collection::MemoryCollection;
use crate::infrastructure::ports::{
    ActorDocument, LiveCollection, PackCollection, StoreError, WriteContext,
};

/// Pack of mixed-kind documents, served through the asynchronous pack API.
pub struct MemoryPack {
    id: PackId,
    documents: MemoryCollection,
}

impl MemoryPack {
    pub fn new(id: PackId) -> Self {
        Self {
            id,
            documents: MemoryCollection::new(),
        }
    }

    pub fn documents(&self) -> &MemoryCollection {
        &self.documents
    }
}

#[async_trait]
impl PackCollection for MemoryPack {
    fn pack_id(&self) -> PackId {
        self.id.clone()
    }

    async fn get_document(&self, id: DocumentId) -> Result<Option<RawDocument>, StoreError> {
        Ok(self.documents.get(id))
    }

    async fn get_documents(
        &self,
        criteria: Criteria,
        kind: EntryKind,
    ) -> Result<Vec<RawDocument>, StoreError> {
        Ok(self
            .documents
            .contents()
            .into_iter()
            .filter(|doc| doc.kind == kind && doc.matches(&criteria))
            .collect())
    }

    async fn get_actor(
        &self,
        id: DocumentId,
    ) -> Result<Option<Arc<dyn ActorDocument>>, StoreError> {
        Ok(self
            .documents
            .actor(id)
            .map(|actor| actor as Arc<dyn ActorDocument>))
    }

    async fn create_documents(
        &self,
        records: Vec<NewDocument>,
        context: WriteContext,
    ) -> Result<Vec<RawDocument>, StoreError> {
        tracing::debug!(
            pack = %self.id,
            count = records.len(),
            %context,
            "Creating pack documents"
        );
        Ok(self.documents.create(records))
    }

    async fn update_documents(
        &self,
        blobs: Vec<DocumentBlob>,
        context: WriteContext,
    ) -> Result<(), StoreError> {
        tracing::debug!(pack = %self.id, count = blobs.len(), %context, "Updating pack documents");
        self.documents.update(blobs)
    }

    async fn delete_documents(
        &self,
        ids: Vec<DocumentId>,
        context: WriteContext,
    ) -> Result<(), StoreError> {
        tracing::debug!(pack = %self.id, count = ids.len(), %context, "Deleting pack documents");
        self.documents.delete(ids)
    }
}
