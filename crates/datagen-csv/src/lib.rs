//! Delimited file writer for generated datasets.
//!
//! Writes a header row followed by generated rows, using the schema's
//! delimiter and quote character. Fields are quoted only when they contain
//! the delimiter, the quote character or a line break; rows end with CRLF.
//!
//! # Example
//!
//! ```ignore
//! use datagen_csv::{DatasetWriter, DEFAULT_BUFFER_SIZE};
//! use datagen_generator::DataGenerator;
//!
//! let mut generator = DataGenerator::for_schema(&schema, 42)?;
//! let writer = DatasetWriter::for_schema(&schema);
//! let file = std::fs::File::create("/tmp/users.csv")?;
//! let out = std::io::BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, file);
//! let metrics = writer.write(&mut generator, 1000, out)?;
//! ```

mod error;
mod writer;

pub use error::DatasetWriterError;
pub use writer::{DatasetWriter, WriteMetrics, DEFAULT_BUFFER_SIZE};
