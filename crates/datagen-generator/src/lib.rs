//! Synthetic value generation for csv-datagen.
//!
//! This crate provides the `DataGenerator`, which produces rows of values
//! for an ordered set of columns. Each column type maps to one generator
//! function; randomness comes from a single seeded RNG so runs can be
//! reproduced.
//!
//! # Architecture
//!
//! ```text
//! Schema (ordered ColumnDefinitions)
//!        │
//!        ▼
//! ┌──────────────────────┐
//! │    DataGenerator     │
//! │                      │
//! │  - ColumnGenerator[] │
//! │  - rng (StdRng)      │
//! │  - now               │
//! └──────────┬───────────┘
//!            │
//!            ▼
//!     Vec<GeneratedValue>  (one per column, in order)
//! ```
//!
//! # Example
//!
//! ```rust
//! use datagen_generator::DataGenerator;
//! use datagen_core::Schema;
//!
//! let schema = Schema::from_yaml(r#"
//! name: staff
//! columns:
//!   - order: 1
//!     name: title
//!     type: JOB
//!   - order: 2
//!     name: phone
//!     type: PHONE
//! "#).unwrap();
//!
//! let mut generator = DataGenerator::for_schema(&schema, 42).unwrap();
//! for row in generator.rows(3) {
//!     assert_eq!(row.len(), 2);
//! }
//! ```
//!
//! # Generators
//!
//! - `DATE` - now minus 0..=3650 days
//! - `RANGED_INT` - integer in `[lower_bound, upper_bound]`
//! - `FULLNAME` - two capitalized random words
//! - `EMAIL` - `{6..15 letters}@example.com`
//! - `TEXT` - `sentence_count` capitalized sentences of 30..150 letters
//! - `PHONE` - `+380` and nine digits
//! - `COMPANY` - `{Name} and co.`
//! - `JOB` - `{level} {language} developer`
//! - `DOMAIN` - `{6..20 letters}.ua`

pub mod generator;
pub mod generators;

// Re-exports for convenience
pub use generator::{DataGenerator, GeneratorError, RowIterator};
pub use generators::ColumnGenerator;
