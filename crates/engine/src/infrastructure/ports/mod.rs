//! Port traits for the host boundary.
//!
//! These are the only abstractions in the engine. Everything behind them is
//! owned by the host:
//! - World collections (synchronous lookup)
//! - Packs (asynchronous, query-capable)
//! - Actor, scene and token registries

mod error;
mod host;
pub mod types;

// =============================================================================
// Host Ports
// =============================================================================
pub use host::{
    ActorDocument, HostServices, LiveCollection, PackCollection, PackRegistry, SceneDocument,
    SceneRegistry, TokenDocument, WorldDirectory,
};

pub use types::{ParentRef, WriteContext};

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use host::{
    MockActorDocument, MockLiveCollection, MockPackCollection, MockPackRegistry,
    MockSceneDocument, MockSceneRegistry, MockTokenDocument, MockWorldDirectory,
};

// =============================================================================
// Error Types
// =============================================================================
pub use error::StoreError;
