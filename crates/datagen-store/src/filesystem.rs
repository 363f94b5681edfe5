//! Filesystem-based catalog storage implementation.

use async_trait::async_trait;
use datagen_core::{DatasetRun, RunId, Schema, SchemaId};
use fs4::fs_std::FileExt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use crate::catalog::Catalog;
use crate::store::{CatalogStore, StoreError, StoredSchema};

/// Name of the catalog document inside the data directory.
pub const CATALOG_FILE_NAME: &str = "catalog.json";

/// Lock file guarding commits to the catalog document.
pub const LOCK_FILE_NAME: &str = "catalog.lock";

/// Filesystem implementation of CatalogStore trait.
///
/// Stores the whole catalog as one JSON document in a directory that may be
/// shared by several processes. A mutation holds an exclusive lock on
/// [`LOCK_FILE_NAME`] while it re-reads the document, applies the change,
/// writes a uniquely named temporary file and renames it over the document.
/// Reads always see the last committed document.
pub struct FilesystemStore {
    dir: PathBuf,
    commits: Mutex<()>,
}

impl FilesystemStore {
    /// Open the catalog in `dir`. A missing document reads as an empty
    /// catalog; an unreadable one is an error.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        let path = dir.join(CATALOG_FILE_NAME);
        read_catalog(&path)?;
        tracing::debug!("Opened catalog at {}", path.display());
        Ok(Self {
            dir,
            commits: Mutex::new(()),
        })
    }

    fn load(&self) -> Result<Catalog, StoreError> {
        read_catalog(&self.dir.join(CATALOG_FILE_NAME))
    }

    /// Block until this handle holds the catalog lock. Released when the
    /// returned file is dropped.
    fn lock(&self) -> Result<File, StoreError> {
        std::fs::create_dir_all(&self.dir)?;
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(self.dir.join(LOCK_FILE_NAME))?;
        file.lock_exclusive()?;
        Ok(file)
    }

    fn write_catalog(&self, catalog: &Catalog) -> Result<(), StoreError> {
        let path = self.dir.join(CATALOG_FILE_NAME);
        let mut tmp = tempfile::Builder::new()
            .prefix(CATALOG_FILE_NAME)
            .suffix(".tmp")
            .tempfile_in(&self.dir)?;
        tmp.write_all(serde_json::to_string_pretty(catalog)?.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| e.error)?;
        tracing::trace!("Stored catalog to {}", path.display());
        Ok(())
    }

    /// Apply `op` to the latest committed catalog and write the result if
    /// both the operation and the write succeed.
    async fn commit<T>(
        &self,
        op: impl FnOnce(&mut Catalog) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let _local = self.commits.lock().await;
        let _lock = self.lock()?;
        let mut catalog = self.load()?;
        let result = op(&mut catalog)?;
        self.write_catalog(&catalog)?;
        Ok(result)
    }
}

fn read_catalog(path: &Path) -> Result<Catalog, StoreError> {
    if !path.exists() {
        return Ok(Catalog::default());
    }
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

#[async_trait]
impl CatalogStore for FilesystemStore {
    async fn insert_schema(&self, schema: Schema) -> Result<StoredSchema, StoreError> {
        self.commit(|catalog| Ok(catalog.insert_schema(schema))).await
    }

    async fn get_schema(&self, id: SchemaId) -> Result<Option<StoredSchema>, StoreError> {
        Ok(self.load()?.get_schema(id).cloned())
    }

    async fn list_schemas(&self) -> Result<Vec<StoredSchema>, StoreError> {
        Ok(self.load()?.schemas().cloned().collect())
    }

    async fn replace_schema(
        &self,
        id: SchemaId,
        schema: Schema,
    ) -> Result<StoredSchema, StoreError> {
        self.commit(|catalog| catalog.replace_schema(id, schema)).await
    }

    async fn delete_schema(&self, id: SchemaId) -> Result<(), StoreError> {
        let removed_runs = self.commit(|catalog| catalog.delete_schema(id)).await?;
        tracing::info!("Deleted schema {id} and {removed_runs} run(s)");
        Ok(())
    }

    async fn insert_run(&self, run: DatasetRun) -> Result<DatasetRun, StoreError> {
        self.commit(|catalog| catalog.insert_run(run)).await
    }

    async fn update_run(&self, run: &DatasetRun) -> Result<(), StoreError> {
        self.commit(|catalog| catalog.update_run(run)).await
    }

    async fn get_run(&self, id: RunId) -> Result<Option<DatasetRun>, StoreError> {
        Ok(self.load()?.get_run(id).cloned())
    }

    async fn list_runs(&self, schema_id: Option<SchemaId>) -> Result<Vec<DatasetRun>, StoreError> {
        Ok(self.load()?.runs(schema_id).cloned().collect())
    }
}
