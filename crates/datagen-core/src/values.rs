//! Generated cell values.

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Format used when a date value is rendered into a dataset file.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Format for date values without a sub-second part.
pub const DATE_FORMAT_WHOLE_SECONDS: &str = "%Y-%m-%d %H:%M:%S";

/// A single generated value, before it is rendered into a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum GeneratedValue {
    Int(i64),
    Text(String),
    DateTime(NaiveDateTime),
}

impl GeneratedValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            GeneratedValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            GeneratedValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            GeneratedValue::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }
}

/// Textual rendering written to the dataset file.
impl fmt::Display for GeneratedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneratedValue::Int(v) => write!(f, "{v}"),
            GeneratedValue::Text(s) => f.write_str(s),
            GeneratedValue::DateTime(dt) => {
                let format = if dt.nanosecond() / 1_000 == 0 {
                    DATE_FORMAT_WHOLE_SECONDS
                } else {
                    DATE_FORMAT
                };
                write!(f, "{}", dt.format(format))
            }
        }
    }
}

impl From<i64> for GeneratedValue {
    fn from(v: i64) -> Self {
        GeneratedValue::Int(v)
    }
}

impl From<String> for GeneratedValue {
    fn from(s: String) -> Self {
        GeneratedValue::Text(s)
    }
}

impl From<NaiveDateTime> for GeneratedValue {
    fn from(dt: NaiveDateTime) -> Self {
        GeneratedValue::DateTime(dt)
    }
}
