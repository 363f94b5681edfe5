//! Durable storage for finished dataset files.
//!
//! A dataset is written to a staging file first and only handed to an
//! [`ArtifactStorage`] once complete. The storage returns a reference string
//! that is recorded on the run.
//!
//! # Example
//!
//! ```ignore
//! use datagen_file::{ArtifactStorage, LocalArtifactStorage};
//!
//! let storage = LocalArtifactStorage::new("media");
//! let reference = storage.persist("users_2024-01-01T00-00-00.000000Z.csv", staging.path()).await?;
//! ```

mod local;

use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;

pub use local::LocalArtifactStorage;

/// Storage backend for finished dataset files.
#[async_trait]
pub trait ArtifactStorage: Send + Sync {
    /// Store the file at `source` under `file_name` and return a durable
    /// reference to it. `source` is left in place.
    async fn persist(&self, file_name: &str, source: &Path) -> Result<String>;
}
