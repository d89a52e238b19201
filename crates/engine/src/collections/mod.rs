//! Entry collections over host-managed stores.
//!
//! - `resolver` - source descriptor -> resolved host collection
//! - `blob` - name reconciliation and update records
//! - `wrapper` - the CRUD surface callers use

pub mod blob;
pub mod resolver;
pub mod wrapper;


pub use blob::{document_blob, reconcile_names};
pub use resolver::{Backend, CollectionHandle, CollectionResolver};
pub use wrapper::EntryCollection;
