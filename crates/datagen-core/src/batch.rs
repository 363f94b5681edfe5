//! Batch editing of a schema's columns.
//!
//! A [`SchemaForm`] is what a caller submits when creating or editing a
//! schema: the schema attributes plus a list of [`ColumnDraft`]s whose fields
//! are all optional. [`SchemaForm::validate`] turns it into a [`Schema`] or a
//! structured [`ValidationErrors`].
//!
//! Rules:
//! - a draft with every field empty is dropped, as is a draft marked `delete`
//! - a partially filled draft reports each missing required field
//! - `order` and `name` must be distinct across the kept drafts
//! - at least one draft must be kept

use crate::error::{
    ValidationErrors, AT_LEAST_ONE_COLUMN, DISTINCT_NAMES, DISTINCT_ORDERS, REQUIRED_FIELD,
};
use crate::schema::{ColumnDefinition, ColumnKind, Schema, SchemaError};
use crate::types::{ColumnType, Delimiter, QuoteChar};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

/// A column as submitted, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnDraft {
    pub order: Option<i32>,

    pub name: Option<String>,

    #[serde(rename = "type")]
    pub column_type: Option<ColumnType>,

    pub lower_bound: Option<i64>,

    pub upper_bound: Option<i64>,

    pub sentence_count: Option<i64>,

    /// Remove this column from the schema
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub delete: bool,
}

impl ColumnDraft {
    fn name_value(&self) -> Option<&str> {
        self.name.as_deref().map(str::trim).filter(|n| !n.is_empty())
    }

    /// True when no field carries a value.
    pub fn is_empty(&self) -> bool {
        self.order.is_none()
            && self.name_value().is_none()
            && self.column_type.is_none()
            && self.lower_bound.is_none()
            && self.upper_bound.is_none()
            && self.sentence_count.is_none()
    }

    /// Whether this draft is skipped instead of validated.
    pub fn is_dropped(&self) -> bool {
        self.delete || self.is_empty()
    }

    /// Required fields that carry no value, given the declared type.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.order.is_none() {
            missing.push("order");
        }
        if self.name_value().is_none() {
            missing.push("name");
        }
        match self.column_type {
            None => missing.push("type"),
            Some(ColumnType::RangedInt) => {
                if self.lower_bound.is_none() {
                    missing.push("lower_bound");
                }
                if self.upper_bound.is_none() {
                    missing.push("upper_bound");
                }
            }
            Some(ColumnType::Text) => {
                if self.sentence_count.is_none() {
                    missing.push("sentence_count");
                }
            }
            Some(_) => {}
        }
        missing
    }

    /// Build the column definition, or the per-field errors for this draft.
    pub fn to_definition(&self) -> Result<ColumnDefinition, BTreeMap<String, String>> {
        let missing = self.missing_fields();
        let required = || -> BTreeMap<String, String> {
            missing
                .iter()
                .map(|f| (f.to_string(), REQUIRED_FIELD.to_string()))
                .collect()
        };

        let (Some(order), Some(name), Some(column_type)) =
            (self.order, self.name_value(), self.column_type)
        else {
            return Err(required());
        };
        if !missing.is_empty() {
            return Err(required());
        }

        let kind = match column_type {
            ColumnType::Date => ColumnKind::Date,
            ColumnType::RangedInt => {
                let lower_bound = self.lower_bound.unwrap_or_default();
                let upper_bound = self.upper_bound.unwrap_or_default();
                if lower_bound > upper_bound {
                    return Err(BTreeMap::from([(
                        "upper_bound".to_string(),
                        format!(
                            "Upper bound ({upper_bound}) must not be less than lower bound ({lower_bound})"
                        ),
                    )]));
                }
                ColumnKind::RangedInt {
                    lower_bound,
                    upper_bound,
                }
            }
            ColumnType::FullName => ColumnKind::FullName,
            ColumnType::Email => ColumnKind::Email,
            ColumnType::Text => {
                let count = self.sentence_count.unwrap_or_default();
                let sentence_count = u32::try_from(count).map_err(|_| {
                    BTreeMap::from([(
                        "sentence_count".to_string(),
                        "Ensure this value is greater than or equal to 0".to_string(),
                    )])
                })?;
                ColumnKind::Text { sentence_count }
            }
            ColumnType::Phone => ColumnKind::Phone,
            ColumnType::Company => ColumnKind::Company,
            ColumnType::Job => ColumnKind::Job,
            ColumnType::Domain => ColumnKind::Domain,
        };

        Ok(ColumnDefinition::new(order, name, kind))
    }
}

impl From<&ColumnDefinition> for ColumnDraft {
    fn from(column: &ColumnDefinition) -> Self {
        let mut draft = ColumnDraft {
            order: Some(column.order),
            name: Some(column.name.clone()),
            column_type: Some(column.column_type()),
            ..Default::default()
        };
        match column.kind {
            ColumnKind::RangedInt {
                lower_bound,
                upper_bound,
            } => {
                draft.lower_bound = Some(lower_bound);
                draft.upper_bound = Some(upper_bound);
            }
            ColumnKind::Text { sentence_count } => {
                draft.sentence_count = Some(i64::from(sentence_count));
            }
            _ => {}
        }
        draft
    }
}

/// A schema create/edit request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaForm {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub delimiter: Delimiter,

    #[serde(default)]
    pub quote_character: QuoteChar,

    #[serde(default)]
    pub columns: Vec<ColumnDraft>,
}

impl SchemaForm {
    /// Load a form from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SchemaError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, SchemaError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Validate the whole batch and build the resulting schema.
    ///
    /// Column-level errors are reported first; the batch-level checks
    /// (distinct orders and names, at least one column) only run once every
    /// kept draft is individually valid.
    pub fn validate(&self) -> Result<Schema, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.add_field("name", REQUIRED_FIELD);
        }

        let mut columns = Vec::new();
        for (index, draft) in self.columns.iter().enumerate() {
            if draft.is_dropped() {
                continue;
            }
            match draft.to_definition() {
                Ok(column) => columns.push(column),
                Err(column_errors) => errors.add_column(index, column_errors),
            }
        }

        if errors.has_column_errors() {
            return Err(errors);
        }

        if columns.is_empty() {
            errors.add_non_field(AT_LEAST_ONE_COLUMN);
        }

        let mut orders = HashSet::new();
        if !columns.iter().all(|c| orders.insert(c.order)) {
            errors.add_non_field(DISTINCT_ORDERS);
        }
        let mut names = HashSet::new();
        if !columns.iter().all(|c| names.insert(c.name.as_str())) {
            errors.add_non_field(DISTINCT_NAMES);
        }

        errors.into_result()?;

        Schema::new(name, self.delimiter, self.quote_character, columns)
            .map_err(|e| ValidationErrors::non_field(e.to_string()))
    }
}

impl From<&Schema> for SchemaForm {
    fn from(schema: &Schema) -> Self {
        Self {
            name: schema.name.clone(),
            delimiter: schema.delimiter,
            quote_character: schema.quote_character,
            columns: schema
                .ordered_columns()
                .into_iter()
                .map(ColumnDraft::from)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full(order: i32, name: &str, column_type: ColumnType) -> ColumnDraft {
        ColumnDraft {
            order: Some(order),
            name: Some(name.to_string()),
            column_type: Some(column_type),
            ..Default::default()
        }
    }

    fn form(columns: Vec<ColumnDraft>) -> SchemaForm {
        SchemaForm {
            name: "test".to_string(),
            columns,
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_draft_is_dropped() {
        let result = form(vec![ColumnDraft::default(), full(1, "email", ColumnType::Email)])
            .validate()
            .unwrap();

        assert_eq!(result.columns.len(), 1);
        assert_eq!(result.columns[0].name, "email");
    }

    #[test]
    fn test_blank_name_counts_as_empty() {
        let draft = ColumnDraft {
            name: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(draft.is_empty());
    }

    #[test]
    fn test_deleted_draft_is_dropped() {
        let mut deleted = full(1, "gone", ColumnType::Phone);
        deleted.delete = true;

        let result = form(vec![deleted, full(1, "kept", ColumnType::Phone)])
            .validate()
            .unwrap();
        assert_eq!(result.header(), vec!["kept"]);
    }

    #[test]
    fn test_partial_draft_reports_missing_fields() {
        let draft = ColumnDraft {
            name: Some("age".to_string()),
            column_type: Some(ColumnType::RangedInt),
            lower_bound: Some(1),
            ..Default::default()
        };

        let errors = form(vec![draft]).validate().unwrap_err();
        let column = &errors.columns[&0];
        assert_eq!(column.len(), 2);
        assert_eq!(column["order"], REQUIRED_FIELD);
        assert_eq!(column["upper_bound"], REQUIRED_FIELD);
        assert!(errors.non_field_errors.is_empty());
    }

    #[test]
    fn test_missing_type_only_requires_base_fields() {
        let draft = ColumnDraft {
            order: Some(1),
            lower_bound: Some(5),
            ..Default::default()
        };
        assert_eq!(draft.missing_fields(), vec!["name", "type"]);
    }

    #[test]
    fn test_text_requires_sentence_count() {
        let draft = full(1, "bio", ColumnType::Text);
        assert_eq!(draft.missing_fields(), vec!["sentence_count"]);
    }

    #[test]
    fn test_zero_values_are_populated() {
        let draft = ColumnDraft {
            order: Some(0),
            name: Some("n".to_string()),
            column_type: Some(ColumnType::RangedInt),
            lower_bound: Some(0),
            upper_bound: Some(0),
            ..Default::default()
        };
        assert!(draft.missing_fields().is_empty());
        assert!(draft.to_definition().is_ok());
    }

    #[test]
    fn test_duplicate_order_is_batch_error() {
        let errors = form(vec![
            full(1, "a", ColumnType::Email),
            full(1, "b", ColumnType::Email),
        ])
        .validate()
        .unwrap_err();

        assert_eq!(errors.non_field_errors, vec![DISTINCT_ORDERS.to_string()]);
    }

    #[test]
    fn test_duplicate_name_is_batch_error() {
        let errors = form(vec![
            full(1, "a", ColumnType::Email),
            full(2, "a", ColumnType::Email),
        ])
        .validate()
        .unwrap_err();

        assert_eq!(errors.non_field_errors, vec![DISTINCT_NAMES.to_string()]);
    }

    #[test]
    fn test_no_columns_is_batch_error() {
        let errors = form(vec![ColumnDraft::default(), ColumnDraft::default()])
            .validate()
            .unwrap_err();
        assert_eq!(errors.non_field_errors, vec![AT_LEAST_ONE_COLUMN.to_string()]);
    }

    #[test]
    fn test_inverted_bounds_is_field_error() {
        let draft = ColumnDraft {
            lower_bound: Some(10),
            upper_bound: Some(1),
            ..full(1, "n", ColumnType::RangedInt)
        };
        let errors = form(vec![draft]).validate().unwrap_err();
        assert!(errors.columns[&0].contains_key("upper_bound"));
    }

    #[test]
    fn test_negative_sentence_count_is_field_error() {
        let draft = ColumnDraft {
            sentence_count: Some(-2),
            ..full(1, "t", ColumnType::Text)
        };
        let errors = form(vec![draft]).validate().unwrap_err();
        assert!(errors.columns[&0].contains_key("sentence_count"));
    }

    #[test]
    fn test_missing_schema_name() {
        let mut f = form(vec![full(1, "a", ColumnType::Job)]);
        f.name = " ".to_string();
        let errors = f.validate().unwrap_err();
        assert_eq!(errors.fields["name"], REQUIRED_FIELD);
    }

    #[test]
    fn test_irrelevant_parameters_are_ignored() {
        let draft = ColumnDraft {
            lower_bound: Some(1),
            sentence_count: Some(3),
            ..full(1, "mail", ColumnType::Email)
        };
        let schema = form(vec![draft]).validate().unwrap();
        assert_eq!(schema.columns[0].kind, ColumnKind::Email);
    }

    #[test]
    fn test_form_from_yaml() {
        let yaml = r#"
name: staff
delimiter: "|"
columns:
  - order: 2
    name: title
    type: JOB
  - {}
  - order: 1
    name: bio
    type: TEXT
    sentence_count: 3
"#;
        let schema = SchemaForm::from_yaml(yaml).unwrap().validate().unwrap();
        assert_eq!(schema.delimiter, Delimiter::Pipe);
        assert_eq!(schema.header(), vec!["bio", "title"]);
    }

    #[test]
    fn test_form_from_schema_roundtrip() {
        let schema = form(vec![
            ColumnDraft {
                lower_bound: Some(-5),
                upper_bound: Some(5),
                ..full(2, "n", ColumnType::RangedInt)
            },
            full(1, "d", ColumnType::Date),
        ])
        .validate()
        .unwrap();

        let rebuilt = SchemaForm::from(&schema).validate().unwrap();
        assert_eq!(rebuilt.header(), schema.header());
        assert_eq!(rebuilt.get_column("n"), schema.get_column("n"));
    }
}
