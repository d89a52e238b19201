//! JSON snapshot of an in-memory host.

use std::path::Path;

use docsource_domain::{DocumentId, PackId, RawDocument, SceneId, TokenId};
use serde::{Deserialize, Serialize};

use crate::infrastructure::ports::StoreError;

/// Whole-host snapshot: world collections, packs and scenes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostSnapshot {
    #[serde(default)]
    pub actors: Vec<DocumentSnapshot>,
    #[serde(default)]
    pub items: Vec<RawDocument>,
    #[serde(default)]
    pub packs: Vec<PackSnapshot>,
    #[serde(default)]
    pub scenes: Vec<SceneSnapshot>,
}

/// A document and, for actors, its embedded items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    pub document: RawDocument,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<RawDocument>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackSnapshot {
    pub id: PackId,
    #[serde(default)]
    pub documents: Vec<DocumentSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub id: SceneId,
    #[serde(default)]
    pub tokens: Vec<TokenSnapshot>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TokenSnapshot {
    pub id: TokenId,
    pub actor_id: DocumentId,
}

impl HostSnapshot {
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        serde_json::from_str(json).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, StoreError> {
        serde_json::to_string_pretty(self).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    pub async fn load(path: &Path) -> Result<Self, StoreError> {
        let json = tokio::fs::read_to_string(path).await.map_err(|e| {
            StoreError::backend("load_snapshot", format!("{}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    pub async fn save(&self, path: &Path) -> Result<(), StoreError> {
        let json = self.to_json()?;
        tokio::fs::write(path, json)
            .await
            .map_err(|e| StoreError::backend("save_snapshot", format!("{}: {}", path.display(), e)))
    }
}
