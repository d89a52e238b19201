//! In-memory scenes and tokens.

use std::sync::Arc;

use dashmap::DashMap;
use docsource_domain::{DocumentId, SceneId, TokenId};

use super::collection::MemoryCollection;
use crate::infrastructure::ports::{ActorDocument, SceneDocument, TokenDocument};

/// Scene holding token placements of world actors.
pub struct MemoryScene {
    id: SceneId,
    tokens: DashMap<TokenId, DocumentId>,
    actors: Arc<MemoryCollection>,
}

impl MemoryScene {
    pub(super) fn new(id: SceneId, actors: Arc<MemoryCollection>) -> Self {
        Self {
            id,
            tokens: DashMap::new(),
            actors,
        }
    }

    /// Place a token for `actor_id`. The actor need not exist.
    pub fn place_token(&self, token_id: TokenId, actor_id: DocumentId) {
        self.tokens.insert(token_id, actor_id);
    }

    /// Token placements ordered by token id.
    pub fn placements(&self) -> Vec<(TokenId, DocumentId)> {
        let mut placements: Vec<_> = self
            .tokens
            .iter()
            .map(|entry| (*entry.key(), *entry.value()))
            .collect();
        placements.sort();
        placements
    }
}

impl SceneDocument for MemoryScene {
    fn id(&self) -> SceneId {
        self.id
    }

    fn token(&self, id: TokenId) -> Option<Arc<dyn TokenDocument>> {
        let actor_id = *self.tokens.get(&id)?;
        Some(Arc::new(MemoryToken {
            id,
            actor_id,
            actors: self.actors.clone(),
        }))
    }
}

/// Token whose actor is looked up live, so deleting the actor breaks it.
struct MemoryToken {
    id: TokenId,
    actor_id: DocumentId,
    actors: Arc<MemoryCollection>,
}

impl TokenDocument for MemoryToken {
    fn id(&self) -> TokenId {
        self.id
    }

    fn actor(&self) -> Option<Arc<dyn ActorDocument>> {
        self.actors
            .actor(self.actor_id)
            .map(|actor| actor as Arc<dyn ActorDocument>)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsource_domain::{EntryKind, RawDocument};
    use serde_json::json;

    #[test]
    fn token_actor_disappears_when_actor_is_deleted() {
        let actors = Arc::new(MemoryCollection::new());
        let actor_id = actors.insert(RawDocument::new(
            DocumentId::new(),
            EntryKind::Npc,
            "Goblin",
            json!({}),
        ));
        let scene = MemoryScene::new(SceneId::new(), actors.clone());
        let token_id = TokenId::new();
        scene.place_token(token_id, actor_id);

        let token = scene.token(token_id).expect("token placed");
        assert_eq!(token.actor().map(|a| a.id()), Some(actor_id));

        actors.delete(vec![actor_id]).expect("actor exists");
        assert!(token.actor().is_none());
    }

    #[test]
    fn unknown_token_is_absent() {
        let scene = MemoryScene::new(SceneId::new(), Arc::new(MemoryCollection::new()));
        assert!(scene.token(TokenId::new()).is_none());
    }
}
