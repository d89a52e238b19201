//! In-memory host adapter.
//!
//! Implements every host port over concurrent maps. Backs the `docsource`
//! binary (loaded from a JSON snapshot) and the integration tests.

mod collection;
mod host;
mod pack;
mod scene;
mod snapshot;

pub use collection::{MemoryActor, MemoryCollection};
pub use host::MemoryHost;
pub use pack::MemoryPack;
pub use scene::MemoryScene;
pub use snapshot::{DocumentSnapshot, HostSnapshot, PackSnapshot, SceneSnapshot, TokenSnapshot};
