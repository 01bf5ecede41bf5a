//! FILENAME: core/engine/src/lib.rs
//! PURPOSE: Main library entry point for the sales data engine.
//! CONTEXT: Re-exports the record model, date handling and filter predicates
//! used by the aggregator, the loaders and the dashboard.

pub mod date;
pub mod error;
pub mod filter;
pub mod number_format;
pub mod record;
pub mod schema;
pub mod table;
pub mod value;

// Re-export commonly used types at the crate root
pub use date::{
    from_excel_serial, parse_date, parse_day_first, DateBounds, DateOrder, MonthBucket,
    ParsedDate,
};
pub use error::EngineError;
pub use filter::{DateRange, FilterParams, FilteredSet, Selection};
pub use number_format::{format_currency, format_general};
pub use record::{Dimension, Measure, SalesRecord, SalesTable};
pub use schema::{normalize_column_name, normalize_headers, Schema, REQUIRED_COLUMNS};
pub use table::{RecordTable, Tabular};
pub use value::FieldValue;

#[cfg(test)]
mod tests;
