//! Core types for the csv-datagen workspace.
//!
//! This crate provides the foundational types shared by the generator, the
//! writer, the catalog and the service layer:
//!
//! - [`Schema`] / [`ColumnDefinition`] / [`ColumnKind`] - what to generate
//! - [`SchemaForm`] / [`ColumnDraft`] - batch create/edit requests and their validation
//! - [`ValidationErrors`] - structured field → message errors
//! - [`DatasetRun`] - a generation run and its PROCESSING → READY lifecycle
//! - [`GeneratedValue`] - one generated cell
//!
//! # Architecture
//!
//! ```text
//! datagen-core (this crate)
//!    │
//!    ├─── datagen-generator  (values from column definitions)
//!    ├─── datagen-csv        (writes rows to delimited files)
//!    └─── datagen-store      (persists schemas and runs)
//! ```
//!
//! # Example
//!
//! ```rust
//! use datagen_core::{SchemaForm, ColumnType};
//!
//! let form = SchemaForm::from_yaml(r#"
//! name: users
//! columns:
//!   - order: 1
//!     name: email
//!     type: EMAIL
//! "#).unwrap();
//!
//! let schema = form.validate().unwrap();
//! assert_eq!(schema.types(), vec![ColumnType::Email]);
//! ```

pub mod batch;
pub mod error;
pub mod run;
pub mod schema;
pub mod types;
pub mod values;

// Re-exports for convenience
pub use batch::{ColumnDraft, SchemaForm};
pub use error::ValidationErrors;
pub use run::{DatasetRun, RunId, RunStateError, RunStatus, SchemaId};
pub use schema::{ColumnDefinition, ColumnKind, Schema, SchemaError};
pub use types::{ColumnType, Delimiter, ParseOptionError, QuoteChar};
pub use values::GeneratedValue;
