//! FILENAME: core/persistence/src/error.rs

use sales_engine::EngineError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet read error: {0}")]
    SpreadsheetRead(#[from] calamine::Error),

    #[error("XLSX write error: {0}")]
    XlsxWrite(#[from] rust_xlsxwriter::XlsxError),

    #[error(transparent)]
    Schema(#[from] EngineError),

    #[error("Unknown text encoding: {0}")]
    UnknownEncoding(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid file format: {0}")]
    InvalidFormat(String),

    #[error("No data source: upload a file or configure a data path")]
    NoDataSource,
}
