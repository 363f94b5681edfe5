//! Numeric value generators.

use crate::GeneratorError;
use datagen_core::GeneratedValue;
use rand::Rng;

/// Inclusive integer range with `lower <= upper`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntRange {
    lower: i64,
    upper: i64,
}

impl IntRange {
    pub fn new(lower: i64, upper: i64) -> Result<Self, GeneratorError> {
        if lower > upper {
            return Err(GeneratorError::InvalidBounds { lower, upper });
        }
        Ok(Self { lower, upper })
    }
}

/// Generate a random integer in the given range (inclusive).
pub fn generate_int_range<R: Rng>(rng: &mut R, range: &IntRange) -> GeneratedValue {
    GeneratedValue::Int(rng.random_range(range.lower..=range.upper))
}
