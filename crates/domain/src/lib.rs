//! Document source vocabulary.
//!
//! Shared types for addressing host-managed entry collections: entry kinds,
//! source descriptors, raw host documents and the live entries built from them.

pub mod document;
pub mod entry;
pub mod entry_kind;
pub mod error;
pub mod ids;
pub mod source;

pub use document::{Criteria, DocumentBlob, NewDocument, RawDocument};
pub use entry::{GetResult, LiveEntry, TopLevelOverrides};
pub use entry_kind::{DocumentClass, EntryKind};
pub use error::DomainError;
pub use ids::{DocumentId, PackId, SceneId, TokenId};
pub use source::SourceDescriptor;
