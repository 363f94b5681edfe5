//! In-memory catalog document shared by the store backends.

use crate::store::{StoreError, StoredSchema};
use chrono::Utc;
use datagen_core::{DatasetRun, RunId, Schema, SchemaId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// All schemas and runs, plus the id counters.
///
/// Ids start at 1 and are never reused, even after deletes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    last_schema_id: SchemaId,
    #[serde(default)]
    last_run_id: RunId,
    #[serde(default)]
    schemas: BTreeMap<SchemaId, StoredSchema>,
    #[serde(default)]
    runs: BTreeMap<RunId, DatasetRun>,
}

impl Catalog {
    pub fn insert_schema(&mut self, schema: Schema) -> StoredSchema {
        self.last_schema_id += 1;
        let now = Utc::now();
        let stored = StoredSchema {
            id: self.last_schema_id,
            schema,
            created_at: now,
            updated_at: now,
        };
        self.schemas.insert(stored.id, stored.clone());
        stored
    }

    pub fn get_schema(&self, id: SchemaId) -> Option<&StoredSchema> {
        self.schemas.get(&id)
    }

    pub fn schemas(&self) -> impl Iterator<Item = &StoredSchema> {
        self.schemas.values()
    }

    pub fn replace_schema(
        &mut self,
        id: SchemaId,
        schema: Schema,
    ) -> Result<StoredSchema, StoreError> {
        let stored = self
            .schemas
            .get_mut(&id)
            .ok_or_else(|| StoreError::schema_not_found(id))?;
        stored.schema = schema;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    /// Remove a schema and its runs. Returns the number of runs removed.
    pub fn delete_schema(&mut self, id: SchemaId) -> Result<usize, StoreError> {
        self.schemas
            .remove(&id)
            .ok_or_else(|| StoreError::schema_not_found(id))?;
        let before = self.runs.len();
        self.runs.retain(|_, run| run.schema_id != id);
        Ok(before - self.runs.len())
    }

    pub fn insert_run(&mut self, mut run: DatasetRun) -> Result<DatasetRun, StoreError> {
        if !self.schemas.contains_key(&run.schema_id) {
            return Err(StoreError::schema_not_found(run.schema_id));
        }
        self.last_run_id += 1;
        run.id = self.last_run_id;
        self.runs.insert(run.id, run.clone());
        Ok(run)
    }

    pub fn update_run(&mut self, run: &DatasetRun) -> Result<(), StoreError> {
        let stored = self
            .runs
            .get_mut(&run.id)
            .ok_or_else(|| StoreError::run_not_found(run.id))?;
        *stored = run.clone();
        Ok(())
    }

    pub fn get_run(&self, id: RunId) -> Option<&DatasetRun> {
        self.runs.get(&id)
    }

    pub fn runs(&self, schema_id: Option<SchemaId>) -> impl Iterator<Item = &DatasetRun> {
        self.runs
            .values()
            .filter(move |run| schema_id.map_or(true, |id| run.schema_id == id))
    }
}
