//! Host port traits - the collections and registries the host owns.

use std::sync::Arc;

use async_trait::async_trait;
use docsource_domain::{
    Criteria, DocumentBlob, DocumentId, EntryKind, NewDocument, PackId, RawDocument, SceneId,
    TokenId,
};

use super::error::StoreError;
use super::types::WriteContext;

// =============================================================================
// Collections
// =============================================================================

/// A live, synchronously readable collection: world actors, world items, or
/// an actor's embedded items.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LiveCollection: Send + Sync {
    fn get(&self, id: DocumentId) -> Option<RawDocument>;
    fn contents(&self) -> Vec<RawDocument>;

    async fn create_documents(
        &self,
        records: Vec<NewDocument>,
        context: WriteContext,
    ) -> Result<Vec<RawDocument>, StoreError>;
    async fn update_documents(
        &self,
        blobs: Vec<DocumentBlob>,
        context: WriteContext,
    ) -> Result<(), StoreError>;
    async fn delete_documents(
        &self,
        ids: Vec<DocumentId>,
        context: WriteContext,
    ) -> Result<(), StoreError>;
}

/// A pack: an asynchronously queried container of documents of mixed kinds.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PackCollection: Send + Sync {
    fn pack_id(&self) -> PackId;

    async fn get_document(&self, id: DocumentId) -> Result<Option<RawDocument>, StoreError>;
    /// Documents of `kind` whose nested data matches every criterion.
    async fn get_documents(
        &self,
        criteria: Criteria,
        kind: EntryKind,
    ) -> Result<Vec<RawDocument>, StoreError>;
    /// Actor document stored in this pack, with access to its embedded items.
    async fn get_actor(&self, id: DocumentId) -> Result<Option<Arc<dyn ActorDocument>>, StoreError>;

    async fn create_documents(
        &self,
        records: Vec<NewDocument>,
        context: WriteContext,
    ) -> Result<Vec<RawDocument>, StoreError>;
    async fn update_documents(
        &self,
        blobs: Vec<DocumentBlob>,
        context: WriteContext,
    ) -> Result<(), StoreError>;
    async fn delete_documents(
        &self,
        ids: Vec<DocumentId>,
        context: WriteContext,
    ) -> Result<(), StoreError>;
}

// =============================================================================
// Documents owning collections
// =============================================================================

#[cfg_attr(test, mockall::automock)]
pub trait ActorDocument: Send + Sync {
    fn id(&self) -> DocumentId;
    fn items(&self) -> Arc<dyn LiveCollection>;
}

#[cfg_attr(test, mockall::automock)]
pub trait TokenDocument: Send + Sync {
    fn id(&self) -> TokenId;
    /// The actor this token represents, or `None` once that actor is deleted.
    fn actor(&self) -> Option<Arc<dyn ActorDocument>>;
}

#[cfg_attr(test, mockall::automock)]
pub trait SceneDocument: Send + Sync {
    fn id(&self) -> SceneId;
    fn token(&self, id: TokenId) -> Option<Arc<dyn TokenDocument>>;
}

// =============================================================================
// Registries
// =============================================================================

/// World-level collections.
#[cfg_attr(test, mockall::automock)]
pub trait WorldDirectory: Send + Sync {
    fn actors(&self) -> Arc<dyn LiveCollection>;
    fn items(&self) -> Arc<dyn LiveCollection>;
    fn actor(&self, id: DocumentId) -> Option<Arc<dyn ActorDocument>>;
}

#[cfg_attr(test, mockall::automock)]
pub trait PackRegistry: Send + Sync {
    fn pack(&self, id: &PackId) -> Option<Arc<dyn PackCollection>>;
}

#[cfg_attr(test, mockall::automock)]
pub trait SceneRegistry: Send + Sync {
    fn scene(&self, id: SceneId) -> Option<Arc<dyn SceneDocument>>;
}

/// Host services injected into collection resolution.
#[derive(Clone)]
pub struct HostServices {
    pub world: Arc<dyn WorldDirectory>,
    pub packs: Arc<dyn PackRegistry>,
    pub scenes: Arc<dyn SceneRegistry>,
}

impl HostServices {
    pub fn new(
        world: Arc<dyn WorldDirectory>,
        packs: Arc<dyn PackRegistry>,
        scenes: Arc<dyn SceneRegistry>,
    ) -> Self {
        Self {
            world,
            packs,
            scenes,
        }
    }
}
