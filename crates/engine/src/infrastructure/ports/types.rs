//! Types passed across the host port boundary.

use std::fmt;

use docsource_domain::{DocumentId, PackId, SceneId, TokenId};

/// Owning actor of an embedded collection.
///
/// `scene_id`/`token_id` are set only when the actor was reached through a
/// placed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParentRef {
    pub actor_id: DocumentId,
    pub scene_id: Option<SceneId>,
    pub token_id: Option<TokenId>,
}

impl ParentRef {
    pub fn actor(actor_id: DocumentId) -> Self {
        Self {
            actor_id,
            scene_id: None,
            token_id: None,
        }
    }

    pub fn token(actor_id: DocumentId, scene_id: SceneId, token_id: TokenId) -> Self {
        Self {
            actor_id,
            scene_id: Some(scene_id),
            token_id: Some(token_id),
        }
    }
}

/// Context attached to every bulk write: which parent and which pack the
/// target collection belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct WriteContext {
    pub parent: Option<ParentRef>,
    pub pack: Option<PackId>,
}

impl fmt::Display for WriteContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.parent, &self.pack) {
            (Some(parent), Some(pack)) => write!(f, "actor {} in pack {}", parent.actor_id, pack),
            (Some(parent), None) => write!(f, "actor {}", parent.actor_id),
            (None, Some(pack)) => write!(f, "pack {}", pack),
            (None, None) => f.write_str("world"),
        }
    }
}
