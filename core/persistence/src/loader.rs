//! FILENAME: core/persistence/src/loader.rs
//! PURPOSE: Loads a `SalesTable` from an upload or a configured path.

use log::info;
use sales_engine::SalesTable;
use std::fs;

use crate::csv_reader::read_delimited;
use crate::source::{DataSource, LoadOptions, RawTable, SourceFormat};
use crate::xlsx_reader::{load_spreadsheet, load_spreadsheet_bytes};
use crate::PersistenceError;

/// Reads the source into headers and rows without interpreting them.
pub fn read_raw(source: &DataSource, options: &LoadOptions) -> Result<RawTable, PersistenceError> {
    match (source.format()?, source) {
        (SourceFormat::Delimited, DataSource::Path(path)) => read_delimited(&fs::read(path)?, options),
        (SourceFormat::Delimited, DataSource::Upload(upload)) => read_delimited(&upload.bytes, options),
        (SourceFormat::Spreadsheet, DataSource::Path(path)) => load_spreadsheet(path),
        (SourceFormat::Spreadsheet, DataSource::Upload(upload)) => load_spreadsheet_bytes(&upload.bytes),
    }
}

/// Loads and validates a sales table. Any failure aborts the load.
pub fn load_sales(source: &DataSource, options: &LoadOptions) -> Result<SalesTable, PersistenceError> {
    let raw = read_raw(source, options)?;
    let table = SalesTable::from_raw(&raw.headers, raw.rows)?;
    info!(
        "loaded {} records ({} columns) from {}",
        table.len(),
        table.columns().len(),
        source.name()
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Upload;
    use crate::xlsx_writer::{save_report_xlsx, SheetExport};
    use chrono::NaiveDate;
    use sales_engine::{EngineError, FieldValue};
    use std::io::Write;

    const CSV: &str = "Row ID,Order Date,Region,State,City,Category,Sub-Category,Segment,Sales,Profit,Quantity\n\
1,01/02/2023,East,New York,New York City,Furniture,Chairs,Consumer,100,10,2\n\
2,15/03/2023,West,California,Los Angeles,Technology,Phones,Corporate,50.5,-3.25,1\n";

    fn upload(name: &str, bytes: &[u8]) -> DataSource {
        DataSource::Upload(Upload {
            name: name.to_string(),
            bytes: bytes.to_vec(),
        })
    }

    #[test]
    fn loads_uploaded_csv() {
        let table = load_sales(&upload("Superstore.csv", CSV.as_bytes()), &LoadOptions::default()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.columns()[1], "order_date");
        assert_eq!(
            table.records()[0].order_date,
            NaiveDate::from_ymd_opt(2023, 2, 1).unwrap()
        );
        assert_eq!(table.records()[1].profit, -3.25);
    }

    #[test]
    fn loads_csv_from_path() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(CSV.as_bytes()).unwrap();
        let table = load_sales(&DataSource::Path(file.path().to_path_buf()), &LoadOptions::default()).unwrap();
        assert_eq!(table.records()[1].city, "Los Angeles");
    }

    #[test]
    fn txt_files_are_delimited() {
        let table = load_sales(&upload("export.TXT", CSV.as_bytes()), &LoadOptions::default()).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn missing_column_fails_the_load() {
        let data = b"Order Date,Region\n01/02/2023,East\n";
        let err = load_sales(&upload("bad.csv", data), &LoadOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            PersistenceError::Schema(EngineError::MissingColumn(ref c)) if c == "state"
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let source = DataSource::Path("/definitely/not/here.csv".into());
        assert!(matches!(
            load_sales(&source, &LoadOptions::default()),
            Err(PersistenceError::Io(_))
        ));
    }

    #[test]
    fn loads_spreadsheet_round_trip() {
        let header: Vec<String> = CSV.lines().next().unwrap().split(',').map(str::to_string).collect();
        let rows = CSV
            .lines()
            .skip(1)
            .map(|line| {
                line.split(',')
                    .map(|f| match f.parse::<f64>() {
                        Ok(n) if !f.contains('/') => FieldValue::Number(n),
                        _ => FieldValue::text(f),
                    })
                    .collect()
            })
            .collect();
        let sheet = SheetExport {
            name: "Orders".to_string(),
            header,
            rows,
            fills: Vec::new(),
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("superstore.xlsx");
        save_report_xlsx(&[sheet], &path).unwrap();

        let table = load_sales(&DataSource::Path(path), &LoadOptions::default()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[0].region, "East");
        assert_eq!(table.records()[0].sales, 100.0);
        assert_eq!(
            table.records()[1].order_date,
            NaiveDate::from_ymd_opt(2023, 3, 15).unwrap()
        );
    }
}
