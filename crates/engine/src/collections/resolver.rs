//! Collection resolution - from a source descriptor to a concrete host
//! collection.

use std::fmt;
use std::sync::Arc;

use docsource_domain::{EntryKind, PackId, SourceDescriptor};

use crate::infrastructure::ports::{
    HostServices, LiveCollection, PackCollection, ParentRef, StoreError, WriteContext,
};

/// Backend shape of a resolved collection.
#[derive(Clone)]
pub enum Backend {
    /// Synchronously readable: world collections and embedded items.
    Live(Arc<dyn LiveCollection>),
    /// Asynchronously queried pack.
    Pack(Arc<dyn PackCollection>),
}

/// A resolved collection plus the parent/pack context writes must carry.
///
/// Pack-sourced handles never carry a scene and scene-sourced handles never
/// carry a pack.
#[derive(Clone)]
pub struct CollectionHandle {
    backend: Backend,
    parent: Option<ParentRef>,
    pack: Option<PackId>,
}

impl CollectionHandle {
    /// A world collection with no owner.
    pub fn world(collection: Arc<dyn LiveCollection>) -> Self {
        Self {
            backend: Backend::Live(collection),
            parent: None,
            pack: None,
        }
    }

    /// An actor's embedded items. `pack` is set when the actor lives in a pack.
    pub fn embedded(
        items: Arc<dyn LiveCollection>,
        parent: ParentRef,
        pack: Option<PackId>,
    ) -> Self {
        debug_assert!(
            parent.scene_id.is_none() || pack.is_none(),
            "embedded collection cannot be both scene- and pack-sourced"
        );
        Self {
            backend: Backend::Live(items),
            parent: Some(parent),
            pack,
        }
    }

    /// A pack itself.
    pub fn pack(pack: Arc<dyn PackCollection>) -> Self {
        let pack_id = pack.pack_id();
        Self {
            backend: Backend::Pack(pack),
            parent: None,
            pack: Some(pack_id),
        }
    }

    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    pub fn is_pack_backed(&self) -> bool {
        matches!(self.backend, Backend::Pack(_))
    }

    pub fn parent(&self) -> Option<&ParentRef> {
        self.parent.as_ref()
    }

    pub fn pack_id(&self) -> Option<&PackId> {
        self.pack.as_ref()
    }

    /// Context for bulk writes against this collection.
    pub fn write_context(&self) -> WriteContext {
        WriteContext {
            parent: self.parent,
            pack: self.pack.clone(),
        }
    }
}

impl fmt::Debug for CollectionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let backend = match self.backend {
            Backend::Live(_) => "live",
            Backend::Pack(_) => "pack",
        };
        f.debug_struct("CollectionHandle")
            .field("backend", &backend)
            .field("parent", &self.parent)
            .field("pack", &self.pack)
            .finish()
    }
}

/// Resolves (entry kind, source descriptor) pairs against the host.
#[derive(Clone)]
pub struct CollectionResolver {
    services: HostServices,
}

impl CollectionResolver {
    pub fn new(services: HostServices) -> Self {
        Self { services }
    }

    #[tracing::instrument(skip(self, source), fields(source = %source))]
    pub async fn resolve(
        &self,
        kind: EntryKind,
        source: &SourceDescriptor,
    ) -> Result<CollectionHandle, StoreError> {
        let handle = match source {
            SourceDescriptor::CompendiumActor {
                pack_id,
                actor_token_id,
            } => {
                let pack = self.find_pack(pack_id)?;
                let actor = pack
                    .get_actor(*actor_token_id)
                    .await?
                    .ok_or_else(|| StoreError::not_found("Actor", actor_token_id))?;
                CollectionHandle::embedded(
                    actor.items(),
                    ParentRef::actor(actor.id()),
                    Some(pack_id.clone()),
                )
            }
            SourceDescriptor::WorldActor { actor_id } => {
                let actor = self
                    .services
                    .world
                    .actor(*actor_id)
                    .ok_or_else(|| StoreError::not_found("Actor", actor_id))?;
                CollectionHandle::embedded(actor.items(), ParentRef::actor(actor.id()), None)
            }
            SourceDescriptor::SceneToken { scene_id, token_id } => {
                let scene = self
                    .services
                    .scenes
                    .scene(*scene_id)
                    .ok_or_else(|| StoreError::not_found("Scene", scene_id))?;
                let token = scene
                    .token(*token_id)
                    .ok_or_else(|| StoreError::not_found("Token", token_id))?;
                let actor = token
                    .actor()
                    .ok_or_else(|| StoreError::broken_reference(scene_id, token_id))?;
                tracing::debug!(scene = %scene.id(), token = %token.id(), "Found token actor");
                CollectionHandle::embedded(
                    actor.items(),
                    ParentRef::token(actor.id(), scene.id(), token.id()),
                    None,
                )
            }
            SourceDescriptor::Compendium { pack_id } => {
                CollectionHandle::pack(self.find_pack(pack_id)?)
            }
            SourceDescriptor::CorePack => {
                CollectionHandle::pack(self.find_pack(&kind.core_pack_id())?)
            }
            SourceDescriptor::World => {
                if kind.is_actor_like() {
                    CollectionHandle::world(self.services.world.actors())
                } else {
                    CollectionHandle::world(self.services.world.items())
                }
            }
            // Per-token parent context is supplied through `SceneToken`
            SourceDescriptor::Scene { .. } => CollectionHandle::world(self.services.world.actors()),
        };

        tracing::debug!(handle = ?handle, "Resolved collection");
        Ok(handle)
    }

    fn find_pack(&self, pack_id: &PackId) -> Result<Arc<dyn PackCollection>, StoreError> {
        self.services
            .packs
            .pack(pack_id)
            .ok_or_else(|| StoreError::not_found("Pack", pack_id))
    }
}
