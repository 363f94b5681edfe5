//! In-memory catalog storage.

use async_trait::async_trait;
use datagen_core::{DatasetRun, RunId, Schema, SchemaId};
use tokio::sync::Mutex;

use crate::catalog::Catalog;
use crate::store::{CatalogStore, StoreError, StoredSchema};

/// In-memory implementation of CatalogStore trait.
///
/// Nothing survives the process.
#[derive(Default)]
pub struct MemoryStore {
    catalog: Mutex<Catalog>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn insert_schema(&self, schema: Schema) -> Result<StoredSchema, StoreError> {
        Ok(self.catalog.lock().await.insert_schema(schema))
    }

    async fn get_schema(&self, id: SchemaId) -> Result<Option<StoredSchema>, StoreError> {
        Ok(self.catalog.lock().await.get_schema(id).cloned())
    }

    async fn list_schemas(&self) -> Result<Vec<StoredSchema>, StoreError> {
        Ok(self.catalog.lock().await.schemas().cloned().collect())
    }

    async fn replace_schema(
        &self,
        id: SchemaId,
        schema: Schema,
    ) -> Result<StoredSchema, StoreError> {
        self.catalog.lock().await.replace_schema(id, schema)
    }

    async fn delete_schema(&self, id: SchemaId) -> Result<(), StoreError> {
        let removed_runs = self.catalog.lock().await.delete_schema(id)?;
        tracing::debug!("Deleted schema {id} and {removed_runs} run(s)");
        Ok(())
    }

    async fn insert_run(&self, run: DatasetRun) -> Result<DatasetRun, StoreError> {
        self.catalog.lock().await.insert_run(run)
    }

    async fn update_run(&self, run: &DatasetRun) -> Result<(), StoreError> {
        self.catalog.lock().await.update_run(run)
    }

    async fn get_run(&self, id: RunId) -> Result<Option<DatasetRun>, StoreError> {
        Ok(self.catalog.lock().await.get_run(id).cloned())
    }

    async fn list_runs(&self, schema_id: Option<SchemaId>) -> Result<Vec<DatasetRun>, StoreError> {
        Ok(self.catalog.lock().await.runs(schema_id).cloned().collect())
    }
}
