//! Individual value generators for the supported column types.
//!
//! [`ColumnGenerator`] is the validated, ready-to-call form of a column's
//! [`ColumnKind`]; building it is the only step that can fail.

pub mod composite;
pub mod job;
pub mod numeric;
pub mod phone;
pub mod string;
pub mod timestamp;

use crate::GeneratorError;
use chrono::NaiveDateTime;
use datagen_core::{ColumnKind, GeneratedValue};
use numeric::IntRange;
use rand::Rng;

/// Generator for one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnGenerator {
    Date,
    RangedInt(IntRange),
    FullName,
    Email,
    Text { sentence_count: u32 },
    Phone,
    Company,
    Job,
    Domain,
}

impl ColumnGenerator {
    /// Validate the column parameters and build its generator.
    pub fn for_kind(kind: &ColumnKind) -> Result<Self, GeneratorError> {
        Ok(match *kind {
            ColumnKind::Date => ColumnGenerator::Date,
            ColumnKind::RangedInt {
                lower_bound,
                upper_bound,
            } => ColumnGenerator::RangedInt(IntRange::new(lower_bound, upper_bound)?),
            ColumnKind::FullName => ColumnGenerator::FullName,
            ColumnKind::Email => ColumnGenerator::Email,
            ColumnKind::Text { sentence_count } => ColumnGenerator::Text { sentence_count },
            ColumnKind::Phone => ColumnGenerator::Phone,
            ColumnKind::Company => ColumnGenerator::Company,
            ColumnKind::Job => ColumnGenerator::Job,
            ColumnKind::Domain => ColumnGenerator::Domain,
        })
    }

    /// Generate one value. `now` anchors the date window.
    pub fn generate<R: Rng>(&self, rng: &mut R, now: NaiveDateTime) -> GeneratedValue {
        match self {
            ColumnGenerator::Date => GeneratedValue::DateTime(timestamp::generate_date(rng, now)),
            ColumnGenerator::RangedInt(range) => numeric::generate_int_range(rng, range),
            ColumnGenerator::FullName => GeneratedValue::Text(composite::generate_full_name(rng)),
            ColumnGenerator::Email => GeneratedValue::Text(composite::generate_email(rng)),
            ColumnGenerator::Text { sentence_count } => {
                GeneratedValue::Text(composite::generate_text(rng, *sentence_count))
            }
            ColumnGenerator::Phone => GeneratedValue::Text(phone::generate_phone(rng)),
            ColumnGenerator::Company => GeneratedValue::Text(composite::generate_company(rng)),
            ColumnGenerator::Job => GeneratedValue::Text(job::generate_job_title(rng)),
            ColumnGenerator::Domain => GeneratedValue::Text(composite::generate_domain(rng)),
        }
    }
}
