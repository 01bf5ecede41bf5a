//! FILENAME: core/persistence/src/xlsx_reader.rs

use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Range, Reader, Sheets};
use log::debug;
use sales_engine::{from_excel_serial, parse_day_first, FieldValue};
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use crate::source::RawTable;
use crate::PersistenceError;

/// Reads the first worksheet of a spreadsheet file.
pub fn load_spreadsheet(path: &Path) -> Result<RawTable, PersistenceError> {
    let mut workbook = open_workbook_auto(path)?;
    let range = first_sheet(&mut workbook)?;
    range_to_table(&range)
}

/// Reads the first worksheet of an uploaded spreadsheet.
pub fn load_spreadsheet_bytes(bytes: &[u8]) -> Result<RawTable, PersistenceError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
    let range = first_sheet(&mut workbook)?;
    range_to_table(&range)
}

fn first_sheet<RS: Read + Seek>(workbook: &mut Sheets<RS>) -> Result<Range<Data>, PersistenceError> {
    let sheet_names = workbook.sheet_names();
    let Some(first) = sheet_names.first() else {
        return Err(PersistenceError::InvalidFormat(
            "Workbook contains no sheets".to_string(),
        ));
    };
    debug!("reading worksheet {:?} of {}", first, sheet_names.len());
    Ok(workbook.worksheet_range(first)?)
}

fn range_to_table(range: &Range<Data>) -> Result<RawTable, PersistenceError> {
    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row.iter().map(|cell| cell.to_string()).collect(),
        None => {
            return Err(PersistenceError::InvalidFormat(
                "Worksheet is empty".to_string(),
            ))
        }
    };

    let rows: Vec<Vec<FieldValue>> = rows
        .filter(|row| row.iter().any(|cell| !matches!(cell, Data::Empty)))
        .map(|row| row.iter().map(convert_cell).collect())
        .collect();

    debug!("read {} spreadsheet rows with {} columns", rows.len(), headers.len());
    Ok(RawTable { headers, rows })
}

fn convert_cell(cell: &Data) -> FieldValue {
    match cell {
        Data::Empty => FieldValue::Empty,
        Data::String(s) => FieldValue::Text(s.clone()),
        Data::Float(f) => FieldValue::Number(*f),
        Data::Int(i) => FieldValue::Number(*i as f64),
        Data::Bool(b) => FieldValue::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
        Data::Error(e) => FieldValue::Text(format!("{:?}", e)),
        Data::DateTime(dt) => from_excel_serial(dt.as_f64())
            .map(FieldValue::Date)
            .unwrap_or(FieldValue::Number(dt.as_f64())),
        Data::DateTimeIso(s) => parse_day_first(s)
            .map(FieldValue::Date)
            .unwrap_or_else(|| FieldValue::Text(s.clone())),
        Data::DurationIso(s) => FieldValue::Text(s.clone()),
    }
}
