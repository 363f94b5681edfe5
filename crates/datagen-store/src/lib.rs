//! Record catalog for csv-datagen.
//!
//! Stores schemas and dataset generation runs behind the [`CatalogStore`]
//! trait so the service layer does not depend on a particular backend.
//!
//! ## Storage Backends
//!
//! - `MemoryStore` - Keeps the catalog in memory, for tests and one-shot use
//! - `FilesystemStore` - Keeps the catalog in a single JSON document that
//!   several processes may share; commits are serialized by a file lock
//!
//! A schema replacement swaps the
//! schema attributes and its whole column set in one step, and deleting a
//! schema deletes its runs.

mod catalog;
mod filesystem;
mod memory;
pub mod store;


pub use catalog::Catalog;
pub use filesystem::{FilesystemStore, CATALOG_FILE_NAME, LOCK_FILE_NAME};
pub use memory::MemoryStore;
pub use store::{CatalogStore, StoreError, StoredSchema};
