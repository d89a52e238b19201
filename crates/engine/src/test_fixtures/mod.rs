//! Test fixtures loader for JSON fixture files and common test helpers.
//!
//! Fixtures live in the `test_data/` directory of this crate.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_fixtures::{fixture_host, ids};
//!
//! #[tokio::test]
//! async fn pilot_has_items() {
//!     let app = App::new(fixture_host().services());
//!     // ... test logic
//! }
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use crate::infrastructure::memory::{HostSnapshot, MemoryHost};

// =============================================================================
// Fixture Loading
// =============================================================================

/// Load a JSON fixture from test_data/ directory.
///
/// # Panics
///
/// Panics if the fixture file cannot be read or parsed.
pub fn load_fixture<T: serde::de::DeserializeOwned>(path: &str) -> T {
    let fixture_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_data")
        .join(path);
    let content = std::fs::read_to_string(&fixture_path).unwrap_or_else(|e| {
        panic!(
            "Failed to read fixture '{}': {}",
            fixture_path.display(),
            e
        )
    });
    serde_json::from_str(&content).unwrap_or_else(|e| {
        panic!(
            "Failed to parse fixture '{}': {}",
            fixture_path.display(),
            e
        )
    })
}

/// In-memory host seeded from `host_snapshot.json`.
pub fn fixture_host() -> Arc<MemoryHost> {
    let snapshot: HostSnapshot = load_fixture("host_snapshot.json");
    Arc::new(MemoryHost::from_snapshot(snapshot))
}

// =============================================================================
// Fixture IDs
// =============================================================================

/// Well-known IDs from `host_snapshot.json`.
pub mod ids {
    use docsource_domain::{DocumentId, SceneId, TokenId};

    fn parse<T: std::str::FromStr>(s: &str) -> T
    where
        T::Err: std::fmt::Debug,
    {
        s.parse().expect("fixture id is a valid uuid")
    }

    /// World pilot "Ace": embedded skill "Hack" and talent "Ace Pilot".
    pub fn pilot_ace() -> DocumentId {
        parse("11111111-1111-4111-8111-111111111111")
    }

    /// World npc "Goblin": embedded skill "Sneak".
    pub fn npc_goblin() -> DocumentId {
        parse("22222222-2222-4222-8222-222222222222")
    }

    /// Mech "Everest" inside pack `world.mech`.
    pub fn mech_everest() -> DocumentId {
        parse("33333333-3333-4333-8333-333333333333")
    }

    /// Skill "Hack" embedded in pilot "Ace".
    pub fn skill_hack() -> DocumentId {
        parse("a1111111-1111-4111-8111-111111111111")
    }

    /// World skill "Spot".
    pub fn skill_spot() -> DocumentId {
        parse("b1111111-1111-4111-8111-111111111111")
    }

    /// World talent "Brawler".
    pub fn talent_brawler() -> DocumentId {
        parse("b3333333-3333-4333-8333-333333333333")
    }

    /// Skill "Spot" inside pack `world.skill`.
    pub fn pack_skill_spot() -> DocumentId {
        parse("c1111111-1111-4111-8111-111111111111")
    }

    pub fn scene() -> SceneId {
        parse("44444444-4444-4444-8444-444444444444")
    }

    /// Token for npc "Goblin".
    pub fn goblin_token() -> TokenId {
        parse("55555555-5555-4555-8555-555555555555")
    }

    /// Token whose actor does not exist.
    pub fn orphan_token() -> TokenId {
        parse("66666666-6666-4666-8666-666666666666")
    }
}
