//! FILENAME: core/persistence/src/lib.rs
//! Sales Persistence Module
//!
//! Loads sales data from delimited text or spreadsheets and writes derived
//! tables back out as CSV downloads or a styled XLSX report.

mod csv_reader;
mod csv_writer;
mod error;
mod loader;
mod source;
mod xlsx_reader;
mod xlsx_writer;

pub use csv_reader::read_delimited;
pub use csv_writer::{export_csv, read_csv_table, to_csv_bytes, ExportFile, CSV_MIME};
pub use error::PersistenceError;
pub use loader::{load_sales, read_raw};
pub use source::{DataSource, LoadOptions, RawTable, SourceFormat, Upload};
pub use xlsx_reader::{load_spreadsheet, load_spreadsheet_bytes};
pub use xlsx_writer::{report_xlsx_bytes, save_report_xlsx, CellFill, SheetExport};
