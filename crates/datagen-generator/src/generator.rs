//! Row generator for a schema.

use crate::generators::ColumnGenerator;
use chrono::{Local, NaiveDateTime};
use datagen_core::{ColumnDefinition, GeneratedValue, Schema};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Error type for generator operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeneratorError {
    #[error("Lower bound {lower} is greater than upper bound {upper}")]
    InvalidBounds { lower: i64, upper: i64 },

    #[error("Cannot generate rows without columns")]
    NoColumns,
}

/// Produces rows of generated values for a fixed, ordered set of columns.
///
/// The column order is resolved once at construction and never changes,
/// so later edits to the source schema do not affect a generator in use.
/// All randomness comes from one seeded RNG: the same columns, seed and
/// `now` give the same rows.
pub struct DataGenerator {
    /// Column names and generators, ordered by column `order`
    columns: Vec<(String, ColumnGenerator)>,
    /// Seeded random number generator for reproducibility
    rng: StdRng,
    /// Anchor for date values
    now: NaiveDateTime,
    /// Number of rows produced so far
    index: u64,
}

impl DataGenerator {
    /// Create a generator for the given columns.
    pub fn new(columns: &[ColumnDefinition], seed: u64) -> Result<Self, GeneratorError> {
        if columns.is_empty() {
            return Err(GeneratorError::NoColumns);
        }

        let mut ordered: Vec<&ColumnDefinition> = columns.iter().collect();
        ordered.sort_by_key(|c| c.order);

        let columns = ordered
            .into_iter()
            .map(|c| Ok((c.name.clone(), ColumnGenerator::for_kind(&c.kind)?)))
            .collect::<Result<Vec<_>, GeneratorError>>()?;

        Ok(Self {
            columns,
            rng: StdRng::seed_from_u64(seed),
            now: Local::now().naive_local(),
            index: 0,
        })
    }

    /// Create a generator for all columns of a schema.
    pub fn for_schema(schema: &Schema, seed: u64) -> Result<Self, GeneratorError> {
        Self::new(&schema.columns, seed)
    }

    /// Fix the moment date values are generated relative to.
    pub fn with_now(mut self, now: NaiveDateTime) -> Self {
        self.now = now;
        self
    }

    /// Column names in output order.
    pub fn header(&self) -> Vec<&str> {
        self.columns.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows generated so far.
    pub fn current_index(&self) -> u64 {
        self.index
    }

    /// Generate the next row, one value per column in output order.
    pub fn next_row(&mut self) -> Vec<GeneratedValue> {
        let now = self.now;
        let rng = &mut self.rng;
        let row = self
            .columns
            .iter()
            .map(|(_, generator)| generator.generate(rng, now))
            .collect();
        self.index += 1;
        row
    }

    /// Lazily generate `count` rows.
    pub fn rows(&mut self, count: u64) -> RowIterator<'_> {
        RowIterator {
            generator: self,
            remaining: count,
        }
    }
}

/// Iterator that lazily generates rows.
pub struct RowIterator<'a> {
    generator: &'a mut DataGenerator,
    remaining: u64,
}

impl Iterator for RowIterator<'_> {
    type Item = Vec<GeneratedValue>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.generator.next_row())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for RowIterator<'_> {}
