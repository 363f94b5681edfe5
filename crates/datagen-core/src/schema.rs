//! Schema definitions for dataset generation.
//!
//! A [`Schema`] is a named, ordered set of [`ColumnDefinition`]s plus the
//! output formatting options. Column behaviour is a closed set of variants
//! ([`ColumnKind`]), each carrying exactly the parameters its generator needs.
//!
//! Schemas can be loaded from YAML:
//!
//! ```yaml
//! name: customers
//! delimiter: ","
//! quote_character: "'"
//! columns:
//!   - order: 1
//!     name: full_name
//!     type: FULLNAME
//!   - order: 2
//!     name: age
//!     type: RANGED_INT
//!     lower_bound: 18
//!     upper_bound: 80
//! ```

use crate::types::{ColumnType, Delimiter, QuoteChar};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ============================================================================
// Error Types
// ============================================================================

/// Error type for schema operations.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Error reading schema file
    #[error("Failed to read schema file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Schema name must not be empty")]
    EmptyName,

    #[error("Schema must have at least one column")]
    NoColumns,

    #[error("Column order {0} is used more than once")]
    DuplicateOrder(i32),

    #[error("Column name '{0}' is used more than once")]
    DuplicateName(String),

    #[error("Column '{column}': lower bound {lower} is greater than upper bound {upper}")]
    InvalidBounds {
        column: String,
        lower: i64,
        upper: i64,
    },
}

// ============================================================================
// Columns
// ============================================================================

/// Type-specific column behaviour.
///
/// Serialized with an internal `type` tag so that a column reads as
/// `{ order, name, type, <parameters> }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ColumnKind {
    Date,
    RangedInt {
        lower_bound: i64,
        upper_bound: i64,
    },
    #[serde(rename = "FULLNAME")]
    FullName,
    Email,
    Text {
        sentence_count: u32,
    },
    Phone,
    Company,
    Job,
    Domain,
}

impl ColumnKind {
    /// The parameter-free type tag of this kind.
    pub fn column_type(&self) -> ColumnType {
        match self {
            ColumnKind::Date => ColumnType::Date,
            ColumnKind::RangedInt { .. } => ColumnType::RangedInt,
            ColumnKind::FullName => ColumnType::FullName,
            ColumnKind::Email => ColumnType::Email,
            ColumnKind::Text { .. } => ColumnType::Text,
            ColumnKind::Phone => ColumnType::Phone,
            ColumnKind::Company => ColumnType::Company,
            ColumnKind::Job => ColumnType::Job,
            ColumnKind::Domain => ColumnType::Domain,
        }
    }
}

/// One typed column of a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    /// Position of the column in the output (ascending)
    pub order: i32,

    /// Column name, written as the header
    pub name: String,

    /// Type and generator parameters
    #[serde(flatten)]
    pub kind: ColumnKind,
}

impl ColumnDefinition {
    pub fn new(order: i32, name: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            order,
            name: name.into(),
            kind,
        }
    }

    pub fn column_type(&self) -> ColumnType {
        self.kind.column_type()
    }

    /// Check the type-specific parameters.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if let ColumnKind::RangedInt {
            lower_bound,
            upper_bound,
        } = self.kind
        {
            if lower_bound > upper_bound {
                return Err(SchemaError::InvalidBounds {
                    column: self.name.clone(),
                    lower: lower_bound,
                    upper: upper_bound,
                });
            }
        }
        Ok(())
    }
}

// ============================================================================
// Schema
// ============================================================================

/// A named, ordered set of columns plus output formatting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Schema name, also used to name generated files
    pub name: String,

    /// Field separator
    #[serde(default)]
    pub delimiter: Delimiter,

    /// Quote character for fields that need escaping
    #[serde(default)]
    pub quote_character: QuoteChar,

    /// Column definitions, in any order
    pub columns: Vec<ColumnDefinition>,
}

impl Schema {
    /// Create a validated schema.
    pub fn new(
        name: impl Into<String>,
        delimiter: Delimiter,
        quote_character: QuoteChar,
        columns: Vec<ColumnDefinition>,
    ) -> Result<Self, SchemaError> {
        let schema = Self {
            name: name.into(),
            delimiter,
            quote_character,
            columns,
        };
        schema.validate()?;
        Ok(schema)
    }

    /// Parse and validate a schema from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, SchemaError> {
        let schema: Schema = serde_yaml::from_str(yaml)?;
        schema.validate()?;
        Ok(schema)
    }

    /// Check the schema invariants: non-empty name, at least one column,
    /// distinct orders and names, valid column parameters.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.name.trim().is_empty() {
            return Err(SchemaError::EmptyName);
        }
        if self.columns.is_empty() {
            return Err(SchemaError::NoColumns);
        }

        let mut orders = HashSet::new();
        let mut names = HashSet::new();
        for column in &self.columns {
            if !orders.insert(column.order) {
                return Err(SchemaError::DuplicateOrder(column.order));
            }
            if !names.insert(column.name.as_str()) {
                return Err(SchemaError::DuplicateName(column.name.clone()));
            }
            column.validate()?;
        }
        Ok(())
    }

    /// Columns sorted by `order` ascending.
    pub fn ordered_columns(&self) -> Vec<&ColumnDefinition> {
        let mut columns: Vec<&ColumnDefinition> = self.columns.iter().collect();
        columns.sort_by_key(|c| c.order);
        columns
    }

    /// Column names in output order.
    pub fn header(&self) -> Vec<String> {
        self.ordered_columns()
            .into_iter()
            .map(|c| c.name.clone())
            .collect()
    }

    /// Column types in output order.
    pub fn types(&self) -> Vec<ColumnType> {
        self.ordered_columns()
            .into_iter()
            .map(|c| c.column_type())
            .collect()
    }

    /// Get a column by name.
    pub fn get_column(&self, name: &str) -> Option<&ColumnDefinition> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String, SchemaError> {
        Ok(serde_yaml::to_string(self)?)
    }
}
