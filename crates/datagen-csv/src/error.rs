//! Error types for the dataset writer.

use thiserror::Error;

/// Errors that can occur while writing a dataset.
#[derive(Error, Debug)]
pub enum DatasetWriterError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Generator error.
    #[error("Generator error: {0}")]
    Generator(#[from] datagen_generator::GeneratorError),
}
