//! FILENAME: core/engine/src/value.rs
//! PURPOSE: Defines the value held by a single field of a source row.
//! CONTEXT: Loaders produce `FieldValue`s, the schema turns them into typed
//! `SalesRecord` fields, and exporters write them back out.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::number_format::format_general;

/// The raw content of one field, as read from a CSV or spreadsheet source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Empty,
    Number(f64),
    Text(String),
    Date(NaiveDate),
}

impl FieldValue {
    pub fn text(s: impl Into<String>) -> Self {
        FieldValue::Text(s.into())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Empty => true,
            FieldValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Returns the numeric content, parsing text when needed.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(s) => s.trim().parse::<f64>().ok(),
            FieldValue::Empty | FieldValue::Date(_) => None,
        }
    }

    /// Returns the display value of the field as a String.
    /// Dates are rendered ISO-style (`2023-02-01`), numbers without
    /// unnecessary decimal places.
    pub fn display_value(&self) -> String {
        match self {
            FieldValue::Empty => String::new(),
            FieldValue::Number(n) => format_general(*n),
            FieldValue::Text(s) => s.clone(),
            FieldValue::Date(d) => d.format("%Y-%m-%d").to_string(),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        FieldValue::Date(value)
    }
}
