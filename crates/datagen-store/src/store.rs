//! Catalog storage trait and types
//!
//! This module defines the CatalogStore trait for backend-agnostic
//! schema and run storage, plus shared types.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use datagen_core::{DatasetRun, RunId, Schema, SchemaId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned by catalog backends.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The referenced record does not exist.
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: u64 },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog document could not be encoded or decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    pub fn schema_not_found(id: SchemaId) -> Self {
        StoreError::NotFound { kind: "Schema", id }
    }

    pub fn run_not_found(id: RunId) -> Self {
        StoreError::NotFound { kind: "Run", id }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

/// Schema record as kept in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSchema {
    pub id: SchemaId,
    pub schema: Schema,
    /// Timestamp when the schema was first saved
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last replacement
    pub updated_at: DateTime<Utc>,
}

/// Trait for catalog storage operations.
///
/// This trait abstracts the storage backend for schemas and runs,
/// allowing the same service logic to work with:
/// - In-memory storage (`MemoryStore`)
/// - A JSON document on disk (`FilesystemStore`)
///
/// Every method is atomic: it either applies completely or leaves the
/// catalog unchanged.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Save a new schema and assign its id.
    async fn insert_schema(&self, schema: Schema) -> Result<StoredSchema, StoreError>;

    /// Read a schema. Returns None if it doesn't exist.
    async fn get_schema(&self, id: SchemaId) -> Result<Option<StoredSchema>, StoreError>;

    /// All schemas, ordered by id.
    async fn list_schemas(&self) -> Result<Vec<StoredSchema>, StoreError>;

    /// Replace a schema's attributes and complete column set.
    async fn replace_schema(&self, id: SchemaId, schema: Schema)
        -> Result<StoredSchema, StoreError>;

    /// Delete a schema together with its runs.
    async fn delete_schema(&self, id: SchemaId) -> Result<(), StoreError>;

    /// Save a new run and assign its id. The run's schema must exist.
    async fn insert_run(&self, run: DatasetRun) -> Result<DatasetRun, StoreError>;

    /// Overwrite a stored run.
    async fn update_run(&self, run: &DatasetRun) -> Result<(), StoreError>;

    /// Read a run. Returns None if it doesn't exist.
    async fn get_run(&self, id: RunId) -> Result<Option<DatasetRun>, StoreError>;

    /// Runs ordered by id, optionally only those of one schema.
    async fn list_runs(&self, schema_id: Option<SchemaId>) -> Result<Vec<DatasetRun>, StoreError>;
}
