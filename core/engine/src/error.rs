//! FILENAME: core/engine/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Row {row}: invalid date in column '{column}': {value:?}")]
    InvalidDate {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Row {row}: non-numeric value in column '{column}': {value:?}")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },
}
