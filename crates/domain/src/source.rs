//! Source descriptors - where a set of entries lives in the host.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ids::{DocumentId, PackId, SceneId, TokenId};

/// Declarative description of a backing collection.
///
/// Each variant carries exactly the keys needed to locate its collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum SourceDescriptor {
    /// Embedded items of an actor stored inside a pack.
    CompendiumActor {
        pack_id: PackId,
        actor_token_id: DocumentId,
    },
    /// Embedded items of a world actor.
    WorldActor { actor_id: DocumentId },
    /// Embedded items of the actor behind a placed token.
    SceneToken { scene_id: SceneId, token_id: TokenId },
    /// A pack, addressed by id.
    Compendium { pack_id: PackId },
    /// The core pack of the wrapper's entry kind.
    CorePack,
    /// The world actor or item collection, by entry kind.
    World,
    /// World actors as seen from a scene. Not scoped to any token.
    Scene { scene_id: SceneId },
}

impl SourceDescriptor {
    pub fn compendium_actor(pack_id: impl Into<PackId>, actor_token_id: DocumentId) -> Self {
        Self::CompendiumActor {
            pack_id: pack_id.into(),
            actor_token_id,
        }
    }

    pub fn world_actor(actor_id: DocumentId) -> Self {
        Self::WorldActor { actor_id }
    }

    pub fn scene_token(scene_id: SceneId, token_id: TokenId) -> Self {
        Self::SceneToken { scene_id, token_id }
    }

    pub fn compendium(pack_id: impl Into<PackId>) -> Self {
        Self::Compendium {
            pack_id: pack_id.into(),
        }
    }

    pub fn scene(scene_id: SceneId) -> Self {
        Self::Scene { scene_id }
    }

    /// Whether creation through this source would target a token.
    pub fn is_token_scoped(&self) -> bool {
        matches!(self, Self::SceneToken { .. } | Self::Scene { .. })
    }

    /// Stable variant name, as used in the serialized `source` tag.
    pub fn label(&self) -> &'static str {
        match self {
            Self::CompendiumActor { .. } => "compendium_actor",
            Self::WorldActor { .. } => "world_actor",
            Self::SceneToken { .. } => "scene_token",
            Self::Compendium { .. } => "compendium",
            Self::CorePack => "core_pack",
            Self::World => "world",
            Self::Scene { .. } => "scene",
        }
    }
}

impl fmt::Display for SourceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CompendiumActor {
                pack_id,
                actor_token_id,
            } => write!(f, "compendium_actor({}/{})", pack_id, actor_token_id),
            Self::WorldActor { actor_id } => write!(f, "world_actor({})", actor_id),
            Self::SceneToken { scene_id, token_id } => {
                write!(f, "scene_token({}/{})", scene_id, token_id)
            }
            Self::Compendium { pack_id } => write!(f, "compendium({})", pack_id),
            Self::CorePack => f.write_str("core_pack"),
            Self::World => f.write_str("world"),
            Self::Scene { scene_id } => write!(f, "scene({})", scene_id),
        }
    }
}
