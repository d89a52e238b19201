//! Error types for the domain vocabulary.

use thiserror::Error;

/// Errors raised while building or parsing domain values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Invalid ID format
    #[error("Invalid ID format: {0}")]
    InvalidId(String),

    /// Unknown entry kind name
    #[error("Unknown entry kind: {0}")]
    UnknownKind(String),

    /// Document payload has the wrong shape
    #[error("Invalid document payload: {0}")]
    InvalidPayload(String),
}

impl DomainError {
    pub fn invalid_payload(msg: impl Into<String>) -> Self {
        Self::InvalidPayload(msg.into())
    }
}
