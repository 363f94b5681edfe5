//! Structured validation errors.
//!
//! Validation failures carry enough structure (field name → message) for a
//! caller to re-render a corrected request. They serialize to JSON as-is.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Message used for every missing required field.
pub const REQUIRED_FIELD: &str = "This field is required";

/// Batch-level message when no column survives validation.
pub const AT_LEAST_ONE_COLUMN: &str = "Should be at least one column in schema";

/// Batch-level message for repeated `order` values.
pub const DISTINCT_ORDERS: &str = "Orders in one schema must have distinct values";

/// Batch-level message for repeated `name` values.
pub const DISTINCT_NAMES: &str = "Names in one schema must be different";

/// A collection of validation failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("validation failed: {}", self.summary())]
pub struct ValidationErrors {
    /// Errors that apply to the request as a whole.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub non_field_errors: Vec<String>,

    /// Errors on top-level request fields, keyed by field name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, String>,

    /// Errors on individual column drafts, keyed by their position in the batch.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub columns: BTreeMap<usize, BTreeMap<String, String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single error on a top-level field.
    pub fn field(name: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add_field(name, message);
        errors
    }

    /// Single request-level error.
    pub fn non_field(message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add_non_field(message);
        errors
    }

    pub fn add_field(&mut self, name: impl Into<String>, message: impl Into<String>) {
        self.fields.insert(name.into(), message.into());
    }

    pub fn add_non_field(&mut self, message: impl Into<String>) {
        self.non_field_errors.push(message.into());
    }

    pub fn add_column(&mut self, index: usize, errors: BTreeMap<String, String>) {
        if !errors.is_empty() {
            self.columns.entry(index).or_default().extend(errors);
        }
    }

    pub fn has_column_errors(&self) -> bool {
        !self.columns.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.non_field_errors.is_empty() && self.fields.is_empty() && self.columns.is_empty()
    }

    /// Convert into `Err(self)` when any error was recorded.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// One-line description used by `Display`.
    pub fn summary(&self) -> String {
        let mut parts: Vec<String> = self.non_field_errors.clone();
        parts.extend(self.fields.iter().map(|(k, v)| format!("{k}: {v}")));
        for (index, errors) in &self.columns {
            for (k, v) in errors {
                parts.push(format!("columns[{index}].{k}: {v}"));
            }
        }
        parts.join("; ")
    }
}
