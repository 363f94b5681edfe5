//! Dataset generation run records.
//!
//! A run is created in [`RunStatus::Processing`] and moves to
//! [`RunStatus::Ready`] exactly once, when its output file has been written
//! and persisted. It never moves back.

use crate::schema::{ColumnDefinition, Schema};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a stored schema.
pub type SchemaId = u64;

/// Identifier of a stored run.
pub type RunId = u64;

/// Format of the timestamp part of generated file names.
pub const FILE_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H-%M-%S%.6fZ";

/// Lifecycle state of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunStatus {
    Processing,
    Ready,
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunStatus::Processing => f.write_str("PROCESSING"),
            RunStatus::Ready => f.write_str("READY"),
        }
    }
}

/// Invalid state transition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RunStateError {
    #[error("Run {0} is already READY")]
    AlreadyReady(RunId),
}

/// One execution producing a dataset file for a schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetRun {
    /// Assigned by the catalog on insert (0 until then)
    pub id: RunId,

    pub schema_id: SchemaId,

    /// Schema name at run start, used for the file name
    pub schema_name: String,

    /// Ordered columns at run start
    pub columns: Vec<ColumnDefinition>,

    pub status: RunStatus,

    /// Number of data rows requested
    pub row_count: u64,

    /// Seed of the random number generator used for this run
    pub seed: u64,

    /// Durable reference to the output file, set on READY
    pub output_file: Option<String>,

    pub created_at: DateTime<Utc>,

    pub completed_at: Option<DateTime<Utc>>,
}

impl DatasetRun {
    /// Start a run, snapshotting the schema's ordered columns.
    pub fn start(schema_id: SchemaId, schema: &Schema, row_count: u64, seed: u64) -> Self {
        Self {
            id: 0,
            schema_id,
            schema_name: schema.name.clone(),
            columns: schema.ordered_columns().into_iter().cloned().collect(),
            status: RunStatus::Processing,
            row_count,
            seed,
            output_file: None,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == RunStatus::Ready
    }

    /// Column names in output order.
    pub fn header(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// File name for the run's output: `{schema_name}_{created_at}.csv`.
    ///
    /// Path separators in the schema name are replaced with `_`.
    pub fn file_name(&self) -> String {
        let safe_name: String = self
            .schema_name
            .chars()
            .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
            .collect();
        format!(
            "{}_{}.csv",
            safe_name,
            self.created_at.format(FILE_TIMESTAMP_FORMAT)
        )
    }

    /// Attach the output file and move to READY.
    pub fn mark_ready(&mut self, output_file: impl Into<String>) -> Result<(), RunStateError> {
        if self.is_ready() {
            return Err(RunStateError::AlreadyReady(self.id));
        }
        self.output_file = Some(output_file.into());
        self.status = RunStatus::Ready;
        self.completed_at = Some(Utc::now());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ColumnKind;
    use crate::types::{Delimiter, QuoteChar};
    use chrono::TimeZone;

    fn schema() -> Schema {
        Schema::new(
            "people/v2",
            Delimiter::Comma,
            QuoteChar::Single,
            vec![
                ColumnDefinition::new(2, "second", ColumnKind::Phone),
                ColumnDefinition::new(1, "first", ColumnKind::Email),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_start_snapshots_ordered_columns() {
        let run = DatasetRun::start(7, &schema(), 10, 42);

        assert_eq!(run.schema_id, 7);
        assert_eq!(run.status, RunStatus::Processing);
        assert_eq!(run.header(), vec!["first", "second"]);
        assert!(run.output_file.is_none());
    }

    #[test]
    fn test_mark_ready_once() {
        let mut run = DatasetRun::start(1, &schema(), 1, 0);

        run.mark_ready("media/out.csv").unwrap();
        assert!(run.is_ready());
        assert_eq!(run.output_file.as_deref(), Some("media/out.csv"));
        assert!(run.completed_at.is_some());

        let err = run.mark_ready("media/other.csv").unwrap_err();
        assert_eq!(err, RunStateError::AlreadyReady(run.id));
        assert_eq!(run.output_file.as_deref(), Some("media/out.csv"));
    }

    #[test]
    fn test_file_name() {
        let mut run = DatasetRun::start(1, &schema(), 1, 0);
        run.created_at = Utc.with_ymd_and_hms(2022, 1, 2, 3, 4, 5).unwrap();

        assert_eq!(
            run.file_name(),
            "people_v2_2022-01-02T03-04-05.000000Z.csv"
        );
    }

    #[test]
    fn test_status_serde() {
        assert_eq!(
            serde_json::to_string(&RunStatus::Processing).unwrap(),
            "\"PROCESSING\""
        );
        assert_eq!(RunStatus::Ready.to_string(), "READY");
    }
}
