//! FILENAME: core/persistence/src/csv_writer.rs

use log::info;
use sales_engine::{FieldValue, RecordTable, Tabular};
use std::fs;
use std::path::{Path, PathBuf};

use crate::csv_reader::{infer_numeric_columns, raw_field};
use crate::PersistenceError;

pub const CSV_MIME: &str = "text/csv";

/// A downloadable file produced on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportFile {
    /// Writes the file into `dir` under its own name.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, PersistenceError> {
        fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        fs::write(&path, &self.bytes)?;
        info!("wrote {} ({} bytes)", path.display(), self.bytes.len());
        Ok(path)
    }
}

/// UTF-8 CSV: header row then one line per table row, no index column.
pub fn to_csv_bytes<T: Tabular + ?Sized>(table: &T) -> Result<Vec<u8>, PersistenceError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(table.header())?;
    for row in table.rows() {
        writer.write_record(row.iter().map(FieldValue::display_value))?;
    }
    writer
        .into_inner()
        .map_err(|e| PersistenceError::Io(e.into_error()))
}

pub fn export_csv<T: Tabular + ?Sized>(
    table: &T,
    file_name: &str,
) -> Result<ExportFile, PersistenceError> {
    Ok(ExportFile {
        file_name: file_name.to_string(),
        mime: CSV_MIME,
        bytes: to_csv_bytes(table)?,
    })
}

/// Parses a UTF-8 CSV export back into a table. The first `key_columns`
/// columns are group labels and stay text. Any later column whose non-empty
/// fields are all finite numbers becomes numeric, and empty fields become
/// `FieldValue::Empty`.
pub fn read_csv_table(bytes: &[u8], key_columns: usize) -> Result<RecordTable, PersistenceError> {
    let mut reader = csv::Reader::from_reader(bytes);
    let header: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(record?.iter().map(raw_field).collect::<Vec<_>>());
    }
    infer_numeric_columns(&mut rows, key_columns.min(header.len())..header.len());
    Ok(RecordTable::new(header, rows))
}
