//! FILENAME: core/persistence/src/source.rs
//! PURPOSE: Where sales data comes from and how to decode it.

use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use sales_engine::FieldValue;

use crate::PersistenceError;

// ============================================================================
// DATA SOURCE
// ============================================================================

/// An uploaded file: its original name (used to pick the format) and bytes.
#[derive(Debug, Clone)]
pub struct Upload {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// A file to load. Uploads take precedence over a configured path.
#[derive(Debug, Clone)]
pub enum DataSource {
    Path(PathBuf),
    Upload(Upload),
}

impl DataSource {
    /// Picks the upload when present, otherwise the configured path.
    /// There is no built-in fallback location.
    pub fn resolve(upload: Option<Upload>, configured: Option<&Path>) -> Result<Self, PersistenceError> {
        match (upload, configured) {
            (Some(upload), _) => Ok(DataSource::Upload(upload)),
            (None, Some(path)) => Ok(DataSource::Path(path.to_path_buf())),
            (None, None) => Err(PersistenceError::NoDataSource),
        }
    }

    /// File name used for format detection and log messages.
    pub fn name(&self) -> String {
        match self {
            DataSource::Path(path) => path.display().to_string(),
            DataSource::Upload(upload) => upload.name.clone(),
        }
    }

    pub fn format(&self) -> Result<SourceFormat, PersistenceError> {
        let name = self.name();
        let ext = Path::new(&name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");
        SourceFormat::from_extension(ext)
            .ok_or_else(|| PersistenceError::UnsupportedFormat(name.clone()))
    }
}

// ============================================================================
// FORMAT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceFormat {
    /// `csv` / `txt`
    Delimited,
    /// `xls` / `xlsx` / `xlsm` / `xlsb` / `ods`; the first worksheet is read.
    Spreadsheet,
}

impl SourceFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" | "txt" => Some(SourceFormat::Delimited),
            "xls" | "xlsx" | "xlsm" | "xlsb" | "ods" => Some(SourceFormat::Spreadsheet),
            _ => None,
        }
    }
}

// ============================================================================
// LOAD OPTIONS
// ============================================================================

/// Decoding options for delimited text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    /// WHATWG encoding label. `iso-8859-1` resolves to windows-1252.
    pub encoding: String,
    pub delimiter: char,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions {
            encoding: "iso-8859-1".to_string(),
            delimiter: ',',
        }
    }
}

impl LoadOptions {
    pub fn encoding(&self) -> Result<&'static Encoding, PersistenceError> {
        Encoding::for_label(self.encoding.trim().as_bytes())
            .ok_or_else(|| PersistenceError::UnknownEncoding(self.encoding.clone()))
    }

    pub fn delimiter_byte(&self) -> Result<u8, PersistenceError> {
        if self.delimiter.is_ascii() {
            Ok(self.delimiter as u8)
        } else {
            Err(PersistenceError::InvalidFormat(format!(
                "delimiter must be a single ASCII character, got {:?}",
                self.delimiter
            )))
        }
    }
}

// ============================================================================
// RAW TABLE
// ============================================================================

/// Headers and rows exactly as read, before normalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<FieldValue>>,
}
