//! csv-datagen Library
//!
//! Generates synthetic CSV datasets from user-defined schemas.
//!
//! # Features
//!
//! - Typed columns: dates, ranged integers, names, e-mails, text, phones,
//!   companies, job titles and domains
//! - Batch schema edits: a schema and its whole column set are validated and
//!   replaced together, with per-column error messages
//! - Generation runs: each run is tracked from PROCESSING to READY and is
//!   reproducible from its recorded seed
//!
//! # Workspace Crates
//!
//! - `datagen_core` - schemas, batch validation, run records
//! - `datagen_generator` - value generators and the seeded row generator
//! - `datagen_csv` - delimited file writer
//! - `datagen_store` - schema and run catalog
//! - `datagen_file` - storage for finished files
//!
//! # CLI Usage
//!
//! ```bash
//! # Save a schema from a YAML document
//! csv-datagen schema create --file demos/users.yaml
//!
//! # Generate 1000 rows for schema 1
//! csv-datagen generate 1 --rows 1000
//!
//! # Inspect runs
//! csv-datagen runs list --schema 1
//! ```

pub mod config;
pub mod service;

pub use config::DatagenOpts;
pub use service::{DatasetService, ServiceError};

use anyhow::Context;
use datagen_file::LocalArtifactStorage;
use datagen_store::FilesystemStore;

/// Service backed by the on-disk catalog and media directory.
pub type LocalDatasetService = DatasetService<FilesystemStore, LocalArtifactStorage>;

impl LocalDatasetService {
    /// Open the catalog in `opts.data_dir` and store files in `opts.media_dir`.
    pub fn open(opts: &DatagenOpts) -> anyhow::Result<Self> {
        let store = FilesystemStore::open(&opts.data_dir).with_context(|| {
            format!("Failed to open catalog in {}", opts.data_dir.display())
        })?;
        let storage = LocalArtifactStorage::new(&opts.media_dir);
        Ok(DatasetService::new(store, storage).with_write_delay(opts.write_delay))
    }
}
