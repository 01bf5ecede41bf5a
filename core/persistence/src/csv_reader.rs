//! FILENAME: core/persistence/src/csv_reader.rs

use log::{debug, warn};
use sales_engine::FieldValue;
use std::ops::Range;

use crate::source::{LoadOptions, RawTable};
use crate::PersistenceError;

/// Decodes legacy single-byte text and splits it into header and rows.
/// Empty fields become `FieldValue::Empty`. Columns whose every non-empty
/// field parses as a number are stored as numbers, the rest as text.
pub fn read_delimited(bytes: &[u8], options: &LoadOptions) -> Result<RawTable, PersistenceError> {
    let encoding = options.encoding()?;
    let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
    if had_errors {
        warn!("input contained bytes not valid in {}", encoding.name());
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter_byte()?)
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(PersistenceError::InvalidFormat(
            "File has no header row".to_string(),
        ));
    }

    let width = headers.len();
    let mut rows = Vec::new();
    let mut padded = 0usize;
    for (idx, record) in reader.records().enumerate() {
        let record = record?;
        if record.len() > width {
            return Err(PersistenceError::InvalidFormat(format!(
                "Row {}: {} fields but the header has {}",
                idx + 1,
                record.len(),
                width
            )));
        }
        if record.len() < width {
            padded += 1;
        }
        let mut row: Vec<FieldValue> = record.iter().map(raw_field).collect();
        row.resize(width, FieldValue::Empty);
        rows.push(row);
    }

    if padded > 0 {
        warn!("{} short rows were padded with empty fields", padded);
    }
    let numeric = infer_numeric_columns(&mut rows, 0..width);
    debug!(
        "read {} delimited rows with {} columns ({} numeric)",
        rows.len(),
        width,
        numeric
    );
    Ok(RawTable { headers, rows })
}

pub(crate) fn raw_field(field: &str) -> FieldValue {
    if field.is_empty() {
        FieldValue::Empty
    } else {
        FieldValue::Text(field.to_string())
    }
}

/// Converts fully numeric columns in place and returns how many there were.
/// Only finite numbers count. A column with no values at all stays as it is.
pub(crate) fn infer_numeric_columns(rows: &mut [Vec<FieldValue>], columns: Range<usize>) -> usize {
    let mut converted = 0;
    for col in columns {
        let mut seen = false;
        let all_numeric = rows.iter().all(|row| match row.get(col) {
            Some(FieldValue::Text(s)) => {
                seen = true;
                parse_number(s).is_some()
            }
            _ => true,
        });
        if !(all_numeric && seen) {
            continue;
        }
        for row in rows.iter_mut() {
            if let Some(slot) = row.get_mut(col) {
                if let FieldValue::Text(s) = slot {
                    if let Some(n) = parse_number(s) {
                        *slot = FieldValue::Number(n);
                    }
                }
            }
        }
        converted += 1;
    }
    converted
}

fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_header_and_rows() {
        let data = b"Order Date,Region,Sales\n01/02/2023,East,100\n15/03/2023,West,\n";
        let raw = read_delimited(data, &LoadOptions::default()).unwrap();
        assert_eq!(raw.headers, vec!["Order Date", "Region", "Sales"]);
        assert_eq!(raw.rows.len(), 2);
        assert_eq!(raw.rows[0][1], FieldValue::text("East"));
        assert_eq!(raw.rows[1][2], FieldValue::Empty);
    }

    #[test]
    fn decodes_latin1_bytes() {
        // "Québec" with é as the single byte 0xE9
        let data = b"City\nQu\xe9bec\n";
        let raw = read_delimited(data, &LoadOptions::default()).unwrap();
        assert_eq!(raw.rows[0][0], FieldValue::text("Québec"));
    }

    #[test]
    fn quoted_fields_keep_commas() {
        let data = b"Product Name,Sales\n\"Chair, Black\",12.5\n";
        let raw = read_delimited(data, &LoadOptions::default()).unwrap();
        assert_eq!(raw.rows[0][0], FieldValue::text("Chair, Black"));
    }

    #[test]
    fn custom_delimiter() {
        let options = LoadOptions {
            delimiter: ';',
            ..LoadOptions::default()
        };
        let raw = read_delimited(b"a;b\n1;2\n", &options).unwrap();
        assert_eq!(raw.headers, vec!["a", "b"]);
        assert_eq!(raw.rows[0][1], FieldValue::Number(2.0));
    }

    #[test]
    fn only_fully_numeric_columns_become_numbers() {
        let data = b"Postal Code,Sales,Order ID\n10001,12.5,CA-1\n,3,2\n";
        let raw = read_delimited(data, &LoadOptions::default()).unwrap();
        assert_eq!(raw.rows[0][0], FieldValue::Number(10001.0));
        assert_eq!(raw.rows[1][0], FieldValue::Empty);
        assert_eq!(raw.rows[1][1], FieldValue::Number(3.0));
        // Mixed column stays text, including the numeric-looking field
        assert_eq!(raw.rows[1][2], FieldValue::text("2"));
    }

    #[test]
    fn overlong_rows_are_an_error() {
        let data = b"a,b\n1,2\n1,2,3\n";
        let err = read_delimited(data, &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, PersistenceError::InvalidFormat(ref m) if m.starts_with("Row 2:")));
    }

    #[test]
    fn short_rows_are_padded_with_empty() {
        let data = b"Region,City,Sales\nEast,New York City,10\nWest\n";
        let raw = read_delimited(data, &LoadOptions::default()).unwrap();
        assert_eq!(
            raw.rows[1],
            vec![FieldValue::text("West"), FieldValue::Empty, FieldValue::Empty]
        );
        assert_eq!(raw.rows[0][2], FieldValue::Number(10.0));
    }

    #[test]
    fn non_finite_numbers_stay_text() {
        let data = b"Key,Sales\nInf,1\nNaN,2\n";
        let raw = read_delimited(data, &LoadOptions::default()).unwrap();
        assert_eq!(raw.rows[0][0], FieldValue::text("Inf"));
        assert_eq!(raw.rows[1][1], FieldValue::Number(2.0));
    }
}
