//! Error types for host store operations.

use docsource_domain::{DomainError, EntryKind};

/// Host store errors with context for diagnosis.
///
/// `Clone` so one resolution result can be handed to every operation that
/// awaited it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    /// Pack, actor, scene, token or document absent - includes the type and ID.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// A token still exists but its actor was deleted.
    #[error("Token {token_id} in scene {scene_id} references a deleted actor")]
    BrokenReference { scene_id: String, token_id: String },

    /// Operation is not supported through this source.
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// A document's kind disagrees with the collection's entry kind.
    #[error("Kind mismatch: expected {expected}, found {found}")]
    KindMismatch {
        expected: EntryKind,
        found: EntryKind,
    },

    /// Host backend call failed - includes operation name for tracing.
    #[error("Backend error in {operation}: {message}")]
    Backend {
        operation: &'static str,
        message: String,
    },

    /// A record handed to a create was rejected before anything was written.
    #[error("Record {index} rejected: {reason}")]
    InvalidRecord { index: usize, reason: String },

    /// Document payload could not be read into an entry.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    /// Create a NotFound error with entity type and ID context.
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    pub fn broken_reference(scene_id: impl ToString, token_id: impl ToString) -> Self {
        Self::BrokenReference {
            scene_id: scene_id.to_string(),
            token_id: token_id.to_string(),
        }
    }

    pub fn unsupported(message: impl ToString) -> Self {
        Self::UnsupportedOperation(message.to_string())
    }

    pub fn invalid_record(index: usize, reason: impl ToString) -> Self {
        Self::InvalidRecord {
            index,
            reason: reason.to_string(),
        }
    }

    /// Create a Backend error with operation context.
    pub fn backend(operation: &'static str, message: impl ToString) -> Self {
        Self::Backend {
            operation,
            message: message.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Resolution failures reject every operation on a collection.
    pub fn is_resolution_failure(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::BrokenReference { .. })
    }
}

impl From<DomainError> for StoreError {
    fn from(err: DomainError) -> Self {
        Self::Serialization(err.to_string())
    }
}
