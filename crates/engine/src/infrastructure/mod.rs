//! Infrastructure implementations.
//!
//! Contains the host port traits and the in-memory host adapter.

pub mod memory;
pub mod ports;
