//! End-to-end tests for schema management and dataset generation.

use async_trait::async_trait;
use csv_datagen::service::ROW_COUNT_MIN;
use csv_datagen::{DatasetService, ServiceError};
use datagen_core::error::{AT_LEAST_ONE_COLUMN, DISTINCT_ORDERS};
use datagen_core::{RunStatus, SchemaForm};
use datagen_file::{ArtifactStorage, LocalArtifactStorage};
use datagen_store::{CatalogStore, FilesystemStore, MemoryStore};
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

const TEXT_SCHEMA: &str = r#"
name: notes
delimiter: ","
quote_character: "'"
columns:
  - order: 1
    name: a
    type: TEXT
    sentence_count: 2
"#;

const USERS_SCHEMA: &str = r#"
name: users
delimiter: ";"
quote_character: '"'
columns:
  - order: 3
    name: joined
    type: DATE
  - order: 1
    name: full_name
    type: FULLNAME
  - order: 2
    name: age
    type: RANGED_INT
    lower_bound: 18
    upper_bound: 65
  - order: 4
    name: email
    type: EMAIL
"#;

/// Storage that always fails, to check runs stay PROCESSING.
struct FailingStorage;

#[async_trait]
impl ArtifactStorage for FailingStorage {
    async fn persist(&self, _file_name: &str, _source: &Path) -> anyhow::Result<String> {
        anyhow::bail!("storage unavailable")
    }
}

fn local_service(media: &TempDir) -> DatasetService<MemoryStore, LocalArtifactStorage> {
    DatasetService::new(MemoryStore::new(), LocalArtifactStorage::new(media.path()))
}

fn form(yaml: &str) -> SchemaForm {
    SchemaForm::from_yaml(yaml).unwrap()
}

fn read_records(path: &str, delimiter: u8, quote: u8) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(delimiter)
        .quote(quote)
        .from_path(path)
        .unwrap();
    reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect()
}

#[tokio::test]
async fn test_generate_text_dataset() {
    let media = TempDir::new().unwrap();
    let service = local_service(&media);
    let schema = service.create_schema(&form(TEXT_SCHEMA)).await.unwrap();

    let run = service.generate(schema.id, 3, Some(42)).await.unwrap();
    assert_eq!(run.status, RunStatus::Ready);
    assert_eq!(run.row_count, 3);
    assert!(run.completed_at.is_some());

    let output = run.output_file.clone().unwrap();
    assert!(output.starts_with(media.path().to_str().unwrap()));
    assert!(Path::new(&output)
        .file_name()
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("notes_"));

    let content = std::fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = content.split_terminator("\r\n").collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "a");
    for line in &lines[1..] {
        assert!(line.ends_with('.'));
        let sentences: Vec<&str> = line.trim_end_matches('.').split(". ").collect();
        assert_eq!(sentences.len(), 2);
        for sentence in sentences {
            assert!(sentence.chars().next().unwrap().is_ascii_uppercase());
        }
    }

    // The stored run matches the returned one.
    let stored = service.get_run(run.id).await.unwrap();
    assert_eq!(stored, run);
}

#[tokio::test]
async fn test_generate_orders_columns_and_uses_format() {
    let media = TempDir::new().unwrap();
    let service = local_service(&media);
    let schema = service.create_schema(&form(USERS_SCHEMA)).await.unwrap();

    let run = service.generate(schema.id, 50, Some(7)).await.unwrap();
    let records = read_records(run.output_file.as_deref().unwrap(), b';', b'"');

    assert_eq!(records.len(), 51);
    assert_eq!(records[0], vec!["full_name", "age", "joined", "email"]);
    for record in &records[1..] {
        assert_eq!(record.len(), 4);
        assert_eq!(record[0].split(' ').count(), 2);
        let age: i64 = record[1].parse().unwrap();
        assert!((18..=65).contains(&age));
        assert!(
            chrono::NaiveDateTime::parse_from_str(&record[2], "%Y-%m-%d %H:%M:%S%.f").is_ok()
        );
        assert!(record[3].ends_with("@example.com"));
    }
}

#[tokio::test]
async fn test_same_seed_same_rows() {
    let media = TempDir::new().unwrap();
    let service = local_service(&media);
    let schema = service.create_schema(&form(TEXT_SCHEMA)).await.unwrap();

    let first = service.generate(schema.id, 5, Some(99)).await.unwrap();
    let second = service.generate(schema.id, 5, Some(99)).await.unwrap();
    assert_ne!(first.output_file, second.output_file);

    let a = std::fs::read_to_string(first.output_file.unwrap()).unwrap();
    let b = std::fs::read_to_string(second.output_file.unwrap()).unwrap();
    assert_eq!(a, b);
}

#[tokio::test]
async fn test_row_count_must_be_positive() {
    let media = TempDir::new().unwrap();
    let service = local_service(&media);
    let schema = service.create_schema(&form(TEXT_SCHEMA)).await.unwrap();

    for rows in [0, -5] {
        let err = service.generate(schema.id, rows, None).await.unwrap_err();
        let errors = err.validation_errors().unwrap();
        assert_eq!(errors.fields["row_count"], ROW_COUNT_MIN);
    }
    assert!(service.list_runs(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_execute_run_with_zero_rows() {
    let media = TempDir::new().unwrap();
    let service = local_service(&media);
    let schema = service.create_schema(&form(USERS_SCHEMA)).await.unwrap();

    let run = service.execute_run(schema.id, 0, 1).await.unwrap();
    assert!(run.is_ready());
    let content = std::fs::read_to_string(run.output_file.unwrap()).unwrap();
    assert_eq!(content, "full_name;age;joined;email\r\n");
}

#[tokio::test]
async fn test_row_count_law() {
    let media = TempDir::new().unwrap();
    let service = local_service(&media);
    let schema = service.create_schema(&form(USERS_SCHEMA)).await.unwrap();

    for rows in [0u64, 1, 50] {
        let run = service.execute_run(schema.id, rows, rows).await.unwrap();
        let records = read_records(run.output_file.as_deref().unwrap(), b';', b'"');
        assert_eq!(records.len() as u64, rows + 1);
    }
}

#[tokio::test]
async fn test_failing_storage_leaves_run_processing() {
    let service = DatasetService::new(MemoryStore::new(), FailingStorage);
    let schema = service.create_schema(&form(TEXT_SCHEMA)).await.unwrap();

    let err = service.generate(schema.id, 3, Some(1)).await.unwrap_err();
    assert!(matches!(err, ServiceError::Artifact(_)));
    assert!(err.to_string().contains("storage unavailable"));

    let runs = service.list_runs(Some(schema.id)).await.unwrap();
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].status, RunStatus::Processing);
    assert!(runs[0].output_file.is_none());
    assert!(runs[0].completed_at.is_none());
}

#[tokio::test]
async fn test_missing_schema_and_run() {
    let media = TempDir::new().unwrap();
    let service = local_service(&media);

    assert!(service.generate(12, 5, None).await.unwrap_err().is_not_found());
    assert!(service.get_schema(12).await.unwrap_err().is_not_found());
    assert!(service.get_run(3).await.unwrap_err().is_not_found());
    assert!(service
        .edit_schema(12, &form(TEXT_SCHEMA))
        .await
        .unwrap_err()
        .is_not_found());
    assert!(service.delete_schema(12).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_schema_batch_validation() {
    let media = TempDir::new().unwrap();
    let service = local_service(&media);

    let duplicate_orders = form(
        r#"
name: dup
columns:
  - order: 1
    name: a
    type: EMAIL
  - order: 1
    name: b
    type: PHONE
"#,
    );
    let err = service.create_schema(&duplicate_orders).await.unwrap_err();
    assert_eq!(
        err.validation_errors().unwrap().non_field_errors,
        vec![DISTINCT_ORDERS]
    );

    let only_empty = form(
        r#"
name: empty
columns:
  - {}
"#,
    );
    let err = service.create_schema(&only_empty).await.unwrap_err();
    assert_eq!(
        err.validation_errors().unwrap().non_field_errors,
        vec![AT_LEAST_ONE_COLUMN]
    );

    let one_empty_one_full = form(
        r#"
name: mixed
columns:
  - {}
  - order: 1
    name: company
    type: COMPANY
"#,
    );
    let stored = service.create_schema(&one_empty_one_full).await.unwrap();
    assert_eq!(stored.schema.columns.len(), 1);
    assert_eq!(stored.schema.columns[0].name, "company");

    assert_eq!(service.list_schemas().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_edit_replaces_columns_atomically() {
    let media = TempDir::new().unwrap();
    let service = local_service(&media);
    let stored = service.create_schema(&form(USERS_SCHEMA)).await.unwrap();

    // A bad batch changes nothing.
    let bad = form(
        r#"
name: renamed
columns:
  - order: 1
    name: phone
    type: PHONE
  - order: 2
    name: n
    type: RANGED_INT
    lower_bound: 5
"#,
    );
    let err = service.edit_schema(stored.id, &bad).await.unwrap_err();
    let errors = err.validation_errors().unwrap();
    assert!(errors.columns[&1].contains_key("upper_bound"));
    assert_eq!(service.get_schema(stored.id).await.unwrap(), stored);

    // A good batch replaces the name and every column; deleted drafts go away.
    let good = form(
        r#"
name: renamed
delimiter: "|"
columns:
  - order: 1
    name: phone
    type: PHONE
  - order: 2
    name: email
    type: EMAIL
    delete: true
"#,
    );
    let edited = service.edit_schema(stored.id, &good).await.unwrap();
    assert_eq!(edited.schema.name, "renamed");
    assert_eq!(edited.schema.header(), vec!["phone"]);

    let run = service.generate(stored.id, 2, Some(3)).await.unwrap();
    let content = std::fs::read_to_string(run.output_file.unwrap()).unwrap();
    assert!(content.starts_with("phone\r\n+380"));
}

#[tokio::test]
async fn test_run_keeps_column_snapshot() {
    let media = TempDir::new().unwrap();
    let service = local_service(&media);
    let stored = service.create_schema(&form(USERS_SCHEMA)).await.unwrap();
    let run = service.generate(stored.id, 1, Some(5)).await.unwrap();

    service
        .edit_schema(stored.id, &form(TEXT_SCHEMA))
        .await
        .unwrap();

    let loaded = service.get_run(run.id).await.unwrap();
    assert_eq!(loaded.schema_name, "users");
    let names: Vec<&str> = loaded.columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["full_name", "age", "joined", "email"]);
}

#[tokio::test]
async fn test_delete_schema_cascades_runs() {
    let media = TempDir::new().unwrap();
    let service = local_service(&media);
    let users = service.create_schema(&form(USERS_SCHEMA)).await.unwrap();
    let notes = service.create_schema(&form(TEXT_SCHEMA)).await.unwrap();

    let run = service.generate(users.id, 1, None).await.unwrap();
    service.generate(notes.id, 1, None).await.unwrap();

    service.delete_schema(users.id).await.unwrap();
    assert!(service.get_run(run.id).await.unwrap_err().is_not_found());
    assert_eq!(service.list_runs(None).await.unwrap().len(), 1);
    assert!(service.store().get_schema(users.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_filesystem_service_survives_restart() {
    let data = TempDir::new().unwrap();
    let media = TempDir::new().unwrap();

    let (schema_id, run_id) = {
        let service = DatasetService::new(
            FilesystemStore::open(data.path()).unwrap(),
            LocalArtifactStorage::new(media.path()),
        )
        .with_write_delay(Duration::from_millis(10));
        let stored = service.create_schema(&form(TEXT_SCHEMA)).await.unwrap();
        let run = service.generate(stored.id, 2, Some(8)).await.unwrap();
        (stored.id, run.id)
    };

    let service = DatasetService::new(
        FilesystemStore::open(data.path()).unwrap(),
        LocalArtifactStorage::new(media.path()),
    );
    let run = service.get_run(run_id).await.unwrap();
    assert_eq!(run.schema_id, schema_id);
    assert!(run.is_ready());
    assert!(Path::new(run.output_file.as_deref().unwrap()).exists());
}

#[tokio::test]
async fn test_overlapping_runs_on_shared_catalog() {
    let data = TempDir::new().unwrap();
    let media = TempDir::new().unwrap();
    let open = || {
        DatasetService::new(
            FilesystemStore::open(data.path()).unwrap(),
            LocalArtifactStorage::new(media.path()),
        )
        .with_write_delay(Duration::from_millis(20))
    };

    let first = open();
    let second = open();
    let stored = first.create_schema(&form(TEXT_SCHEMA)).await.unwrap();

    // Both runs are PROCESSING at the same time before either finishes.
    let (a, b) = tokio::join!(
        first.execute_run(stored.id, 2, 1),
        second.execute_run(stored.id, 3, 2)
    );
    let (a, b) = (a.unwrap(), b.unwrap());
    assert_ne!(a.id, b.id);
    assert_ne!(a.output_file, b.output_file);

    let runs = open().list_runs(Some(stored.id)).await.unwrap();
    assert_eq!(runs.len(), 2);
    assert!(runs.iter().all(|r| r.is_ready()));
    for run in runs {
        let content = std::fs::read_to_string(run.output_file.unwrap()).unwrap();
        assert_eq!(content.split_terminator("\r\n").count() as u64, run.row_count + 1);
    }
}

#[tokio::test]
async fn test_demo_schema_generates() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/users.yaml");
    let demo = SchemaForm::from_file(path).unwrap();

    let media = TempDir::new().unwrap();
    let service = local_service(&media);
    let stored = service.create_schema(&demo).await.unwrap();
    assert_eq!(stored.schema.columns.len(), 9);

    let run = service.generate(stored.id, 20, Some(2024)).await.unwrap();
    let records = read_records(run.output_file.as_deref().unwrap(), b',', b'"');
    assert_eq!(records.len(), 21);
    assert!(records.iter().all(|r| r.len() == 9));
}
