//! Document source engine.
//!
//! Resolves source descriptors to host-managed collections and serves one
//! CRUD surface over all of them.
//!
//! ## Structure
//!
//! - `collections/` - resolver, blob builder and the entry collection wrapper
//! - `infrastructure/` - host ports and the in-memory host adapter
//! - `app` - Application composition

pub mod app;
pub mod collections;
pub mod infrastructure;

/// Test fixtures module for integration testing.
#[cfg(test)]
pub mod test_fixtures;

pub use app::App;
pub use collections::EntryCollection;
