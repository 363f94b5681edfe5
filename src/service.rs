//! Schema management and dataset generation runs.
//!
//! [`DatasetService`] ties the pieces together: batch-validated schema
//! edits go to the [`CatalogStore`], and a generation run streams rows from
//! a [`DataGenerator`] through a [`DatasetWriter`] into a staging file that
//! is handed to the [`ArtifactStorage`] once complete.

use datagen_core::{DatasetRun, RunId, RunStateError, SchemaForm, SchemaId, ValidationErrors};
use datagen_csv::{DatasetWriter, DatasetWriterError, DEFAULT_BUFFER_SIZE};
use datagen_file::ArtifactStorage;
use datagen_generator::{DataGenerator, GeneratorError};
use datagen_store::{CatalogStore, StoreError, StoredSchema};
use std::io::{BufWriter, Write};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// Message for a requested row count below one.
pub const ROW_COUNT_MIN: &str = "Ensure this value is greater than or equal to 1.";

/// Errors returned by [`DatasetService`].
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The request was rejected; nothing was changed.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: u64 },

    #[error("Generation failed: {0}")]
    Generation(#[from] DatasetWriterError),

    #[error("Artifact storage failed: {0:#}")]
    Artifact(anyhow::Error),

    #[error("Storage error: {0}")]
    Storage(StoreError),

    #[error(transparent)]
    RunState(#[from] RunStateError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { kind, id } => ServiceError::NotFound { kind, id },
            other => ServiceError::Storage(other),
        }
    }
}

impl From<GeneratorError> for ServiceError {
    fn from(err: GeneratorError) -> Self {
        ServiceError::Generation(DatasetWriterError::Generator(err))
    }
}

impl ServiceError {
    fn schema_not_found(id: SchemaId) -> Self {
        ServiceError::NotFound { kind: "Schema", id }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::NotFound { .. })
    }

    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            ServiceError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

/// Schema catalog operations and dataset generation.
pub struct DatasetService<S, A> {
    store: S,
    storage: A,
    write_delay: Duration,
}

impl<S: CatalogStore, A: ArtifactStorage> DatasetService<S, A> {
    pub fn new(store: S, storage: A) -> Self {
        Self {
            store,
            storage,
            write_delay: Duration::ZERO,
        }
    }

    /// Pause between writing a dataset and storing it.
    pub fn with_write_delay(mut self, write_delay: Duration) -> Self {
        self.write_delay = write_delay;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validate a batch and save it as a new schema.
    pub async fn create_schema(&self, form: &SchemaForm) -> Result<StoredSchema, ServiceError> {
        let schema = form.validate()?;
        let stored = self.store.insert_schema(schema).await?;
        info!(
            "Created schema {} '{}' with {} column(s)",
            stored.id,
            stored.schema.name,
            stored.schema.columns.len()
        );
        Ok(stored)
    }

    /// Validate a batch and replace the schema's attributes and columns with
    /// it. Either everything is replaced or nothing is.
    pub async fn edit_schema(
        &self,
        id: SchemaId,
        form: &SchemaForm,
    ) -> Result<StoredSchema, ServiceError> {
        self.get_schema(id).await?;
        let schema = form.validate()?;
        let stored = self.store.replace_schema(id, schema).await?;
        info!(
            "Updated schema {} '{}' with {} column(s)",
            stored.id,
            stored.schema.name,
            stored.schema.columns.len()
        );
        Ok(stored)
    }

    pub async fn get_schema(&self, id: SchemaId) -> Result<StoredSchema, ServiceError> {
        self.store
            .get_schema(id)
            .await?
            .ok_or_else(|| ServiceError::schema_not_found(id))
    }

    pub async fn list_schemas(&self) -> Result<Vec<StoredSchema>, ServiceError> {
        Ok(self.store.list_schemas().await?)
    }

    /// Delete a schema and all of its runs.
    pub async fn delete_schema(&self, id: SchemaId) -> Result<(), ServiceError> {
        self.store.delete_schema(id).await?;
        info!("Deleted schema {id}");
        Ok(())
    }

    pub async fn get_run(&self, id: RunId) -> Result<DatasetRun, ServiceError> {
        self.store
            .get_run(id)
            .await?
            .ok_or(ServiceError::NotFound { kind: "Run", id })
    }

    pub async fn list_runs(
        &self,
        schema_id: Option<SchemaId>,
    ) -> Result<Vec<DatasetRun>, ServiceError> {
        Ok(self.store.list_runs(schema_id).await?)
    }

    /// Generate a dataset of `row_count` rows for a schema.
    ///
    /// `row_count` must be at least 1. Without a `seed` a random one is
    /// drawn; it is recorded on the run either way.
    pub async fn generate(
        &self,
        schema_id: SchemaId,
        row_count: i64,
        seed: Option<u64>,
    ) -> Result<DatasetRun, ServiceError> {
        let row_count = match u64::try_from(row_count) {
            Ok(n) if n > 0 => n,
            _ => return Err(ValidationErrors::field("row_count", ROW_COUNT_MIN).into()),
        };
        let seed = seed.unwrap_or_else(rand::random);
        self.execute_run(schema_id, row_count, seed).await
    }

    /// Run the generation pipeline.
    ///
    /// Any `row_count` is accepted here; zero produces a header-only file.
    /// If writing or storing the file fails the run stays PROCESSING with no
    /// file attached, and the error is returned.
    pub async fn execute_run(
        &self,
        schema_id: SchemaId,
        row_count: u64,
        seed: u64,
    ) -> Result<DatasetRun, ServiceError> {
        let stored = self.get_schema(schema_id).await?;
        let mut run = self
            .store
            .insert_run(DatasetRun::start(schema_id, &stored.schema, row_count, seed))
            .await?;
        info!(
            "Started run {} for schema {} '{}': {} rows, seed {}",
            run.id, schema_id, run.schema_name, row_count, seed
        );

        let writer = DatasetWriter::for_schema(&stored.schema);
        let output_file = match self.produce(&run, writer).await {
            Ok(output_file) => output_file,
            Err(e) => {
                warn!("Run {} left PROCESSING: {e}", run.id);
                return Err(e);
            }
        };

        run.mark_ready(output_file)?;
        if let Err(e) = self.store.update_run(&run).await {
            warn!("Run {} could not be marked READY: {e}", run.id);
            return Err(e.into());
        }

        info!(
            "Run {} READY: {}",
            run.id,
            run.output_file.as_deref().unwrap_or_default()
        );
        Ok(run)
    }

    /// Write the run's rows to a staging file and store it. Returns the
    /// storage reference. The staging file is removed on every path.
    async fn produce(
        &self,
        run: &DatasetRun,
        writer: DatasetWriter,
    ) -> Result<String, ServiceError> {
        let mut generator = DataGenerator::new(&run.columns, run.seed)?;

        let mut staging = tempfile::Builder::new()
            .prefix("csv-datagen-")
            .suffix(".csv")
            .tempfile()?;
        {
            let mut out = BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, staging.as_file_mut());
            let metrics = writer.write(&mut generator, run.row_count, &mut out)?;
            out.flush()?;
            info!(
                "Run {}: wrote {} rows in {:?} ({:.2} rows/sec)",
                run.id,
                metrics.rows_written,
                metrics.total_duration,
                metrics.rows_per_second()
            );
        }

        if !self.write_delay.is_zero() {
            tokio::time::sleep(self.write_delay).await;
        }

        self.storage
            .persist(&run.file_name(), staging.path())
            .await
            .map_err(ServiceError::Artifact)
    }
}
