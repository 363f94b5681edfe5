//! Dataset file writer.

use crate::error::DatasetWriterError;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use datagen_core::{Delimiter, QuoteChar, Schema};
use datagen_generator::DataGenerator;
use std::io::Write;
use std::time::{Duration, Instant};
use tracing::debug;

/// Default buffer size for file output.
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

/// Metrics from a write operation.
#[derive(Debug, Clone, Default)]
pub struct WriteMetrics {
    /// Number of data rows written, not counting the header.
    pub rows_written: u64,
    /// Total time taken.
    pub total_duration: Duration,
    /// Time spent generating data.
    pub generation_duration: Duration,
    /// Time spent writing data.
    pub write_duration: Duration,
}

impl WriteMetrics {
    /// Calculate rows per second.
    pub fn rows_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.rows_written as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Writes generated rows in a schema's delimited format.
#[derive(Debug, Clone, Copy)]
pub struct DatasetWriter {
    delimiter: Delimiter,
    quote: QuoteChar,
}

impl DatasetWriter {
    pub fn new(delimiter: Delimiter, quote: QuoteChar) -> Self {
        Self { delimiter, quote }
    }

    /// Writer using the schema's delimiter and quote character.
    pub fn for_schema(schema: &Schema) -> Self {
        Self::new(schema.delimiter, schema.quote_character)
    }

    fn builder(&self) -> WriterBuilder {
        let mut builder = WriterBuilder::new();
        builder
            .delimiter(self.delimiter.as_byte())
            .quote(self.quote.as_byte())
            .quote_style(QuoteStyle::Necessary)
            .double_quote(true)
            .terminator(Terminator::CRLF);
        builder
    }

    /// Write the header and `count` generated rows to `out`.
    pub fn write<W: Write>(
        &self,
        generator: &mut DataGenerator,
        count: u64,
        out: W,
    ) -> Result<WriteMetrics, DatasetWriterError> {
        let start_time = Instant::now();
        let mut metrics = WriteMetrics::default();
        let mut writer = self.builder().from_writer(out);

        let mut generation_time = Duration::ZERO;
        let mut write_time = Duration::ZERO;

        let write_start = Instant::now();
        writer.write_record(generator.header())?;
        write_time += write_start.elapsed();

        let mut rows = generator.rows(count);
        loop {
            let gen_start = Instant::now();
            let Some(row) = rows.next() else {
                break;
            };
            generation_time += gen_start.elapsed();

            let write_start = Instant::now();
            writer.write_record(row.iter().map(|value| value.to_string()))?;
            write_time += write_start.elapsed();

            metrics.rows_written += 1;

            if metrics.rows_written % 10000 == 0 {
                debug!("Written {} rows", metrics.rows_written);
            }
        }

        let mut inner = writer
            .into_inner()
            .map_err(|e| DatasetWriterError::Io(std::io::Error::other(e.to_string())))?;
        inner.flush()?;

        metrics.total_duration = start_time.elapsed();
        metrics.generation_duration = generation_time;
        metrics.write_duration = write_time;
        Ok(metrics)
    }
}
