//! In-memory host: world collections plus pack and scene registries.

use std::sync::Arc;

use dashmap::DashMap;
use docsource_domain::{DocumentId, PackId, SceneId};

use super::collection::MemoryCollection;
use super::pack::MemoryPack;
use super::scene::MemoryScene;
use super::snapshot::{HostSnapshot, PackSnapshot, SceneSnapshot, TokenSnapshot};
use crate::infrastructure::ports::{
    ActorDocument, HostServices, LiveCollection, PackCollection, PackRegistry, SceneDocument,
    SceneRegistry, WorldDirectory,
};

#[derive(Default)]
pub struct MemoryHost {
    actors: Arc<MemoryCollection>,
    items: Arc<MemoryCollection>,
    packs: DashMap<PackId, Arc<MemoryPack>>,
    scenes: DashMap<SceneId, Arc<MemoryScene>>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: HostSnapshot) -> Self {
        let host = Self::new();
        for actor in snapshot.actors {
            host.actors.insert_actor(actor.document, actor.items);
        }
        for item in snapshot.items {
            host.items.insert(item);
        }
        for pack in snapshot.packs {
            let memory_pack = host.add_pack(pack.id);
            for doc in pack.documents {
                memory_pack.documents().insert_actor(doc.document, doc.items);
            }
        }
        for scene in snapshot.scenes {
            let memory_scene = host.add_scene(scene.id);
            for token in scene.tokens {
                memory_scene.place_token(token.id, token.actor_id);
            }
        }
        host
    }

    /// Current contents. Packs and scenes are ordered by id.
    pub fn snapshot(&self) -> HostSnapshot {
        let mut packs: Vec<PackSnapshot> = self
            .packs
            .iter()
            .map(|pack| PackSnapshot {
                id: pack.key().clone(),
                documents: pack.documents().snapshot(),
            })
            .collect();
        packs.sort_by(|a, b| a.id.cmp(&b.id));

        let mut scenes: Vec<SceneSnapshot> = self
            .scenes
            .iter()
            .map(|scene| SceneSnapshot {
                id: *scene.key(),
                tokens: scene
                    .placements()
                    .into_iter()
                    .map(|(id, actor_id)| TokenSnapshot { id, actor_id })
                    .collect(),
            })
            .collect();
        scenes.sort_by_key(|scene| scene.id);

        HostSnapshot {
            actors: self.actors.snapshot(),
            items: self.items.snapshot().into_iter().map(|s| s.document).collect(),
            packs,
            scenes,
        }
    }

    /// Wire this host behind the port traits.
    pub fn services(self: &Arc<Self>) -> HostServices {
        HostServices::new(self.clone(), self.clone(), self.clone())
    }

    pub fn world_actors(&self) -> &Arc<MemoryCollection> {
        &self.actors
    }

    pub fn world_items(&self) -> &Arc<MemoryCollection> {
        &self.items
    }

    /// Register an empty pack, or return the existing one.
    pub fn add_pack(&self, id: PackId) -> Arc<MemoryPack> {
        self.packs
            .entry(id.clone())
            .or_insert_with(|| Arc::new(MemoryPack::new(id)))
            .value()
            .clone()
    }

    pub fn memory_pack(&self, id: &PackId) -> Option<Arc<MemoryPack>> {
        self.packs.get(id).map(|pack| pack.value().clone())
    }

    /// Register an empty scene, or return the existing one.
    pub fn add_scene(&self, id: SceneId) -> Arc<MemoryScene> {
        self.scenes
            .entry(id)
            .or_insert_with(|| Arc::new(MemoryScene::new(id, self.actors.clone())))
            .value()
            .clone()
    }
}

impl WorldDirectory for MemoryHost {
    fn actors(&self) -> Arc<dyn LiveCollection> {
        self.actors.clone()
    }

    fn items(&self) -> Arc<dyn LiveCollection> {
        self.items.clone()
    }

    fn actor(&self, id: DocumentId) -> Option<Arc<dyn ActorDocument>> {
        self.actors
            .actor(id)
            .map(|actor| actor as Arc<dyn ActorDocument>)
    }
}

impl PackRegistry for MemoryHost {
    fn pack(&self, id: &PackId) -> Option<Arc<dyn PackCollection>> {
        self.memory_pack(id)
            .map(|pack| pack as Arc<dyn PackCollection>)
    }
}

impl SceneRegistry for MemoryHost {
    fn scene(&self, id: SceneId) -> Option<Arc<dyn SceneDocument>> {
        self.scenes
            .get(&id)
            .map(|scene| scene.value().clone() as Arc<dyn SceneDocument>)
    }
}
