//! FILENAME: core/persistence/src/xlsx_writer.rs
//! PURPOSE: Writes styled tables to an XLSX workbook, one worksheet each.

use log::info;
use rust_xlsxwriter::{Color, Format, Workbook as XlsxWorkbook, Worksheet};
use sales_engine::FieldValue;
use std::path::Path;

use crate::PersistenceError;

/// Excel caps worksheet names at 31 characters.
const MAX_SHEET_NAME: usize = 31;

/// Background and font colour of one cell, as `0xRRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellFill {
    pub background: u32,
    pub font: u32,
}

/// A table to write, with optional per-cell fills aligned to `rows`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetExport {
    pub name: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<FieldValue>>,
    pub fills: Vec<Vec<Option<CellFill>>>,
}

impl SheetExport {
    fn fill(&self, row: usize, col: usize) -> Option<CellFill> {
        self.fills.get(row).and_then(|r| r.get(col)).copied().flatten()
    }
}

pub fn save_report_xlsx(sheets: &[SheetExport], path: &Path) -> Result<(), PersistenceError> {
    let mut xlsx = build_workbook(sheets)?;
    xlsx.save(path)?;
    info!("wrote {} worksheets to {}", sheets.len(), path.display());
    Ok(())
}

/// The same workbook as `save_report_xlsx`, as bytes for a download.
pub fn report_xlsx_bytes(sheets: &[SheetExport]) -> Result<Vec<u8>, PersistenceError> {
    let mut xlsx = build_workbook(sheets)?;
    Ok(xlsx.save_to_buffer()?)
}

fn build_workbook(sheets: &[SheetExport]) -> Result<XlsxWorkbook, PersistenceError> {
    let mut xlsx = XlsxWorkbook::new();
    let header_format = Format::new().set_bold();

    for sheet in sheets {
        let worksheet = xlsx.add_worksheet();
        worksheet.set_name(sheet_name(&sheet.name))?;

        for (col, title) in sheet.header.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, title, &header_format)?;
            // Roughly one character unit per header character, with a floor
            worksheet.set_column_width(col as u16, (title.chars().count() as f64 + 2.0).max(10.0))?;
        }

        for (row_idx, row) in sheet.rows.iter().enumerate() {
            let xlsx_row = row_idx as u32 + 1;
            for (col_idx, value) in row.iter().enumerate() {
                let format = sheet.fill(row_idx, col_idx).map(fill_to_format);
                write_value(worksheet, xlsx_row, col_idx as u16, value, format.as_ref())?;
            }
        }
    }

    Ok(xlsx)
}

fn write_value(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &FieldValue,
    format: Option<&Format>,
) -> Result<(), PersistenceError> {
    match (value, format) {
        (FieldValue::Empty, Some(fmt)) => {
            worksheet.write_blank(row, col, fmt)?;
        }
        (FieldValue::Empty, None) => {}
        (FieldValue::Number(n), Some(fmt)) => {
            worksheet.write_number_with_format(row, col, *n, fmt)?;
        }
        (FieldValue::Number(n), None) => {
            worksheet.write_number(row, col, *n)?;
        }
        (other, Some(fmt)) => {
            worksheet.write_string_with_format(row, col, other.display_value(), fmt)?;
        }
        (other, None) => {
            worksheet.write_string(row, col, other.display_value())?;
        }
    }
    Ok(())
}

fn fill_to_format(fill: CellFill) -> Format {
    Format::new()
        .set_background_color(Color::RGB(fill.background))
        .set_font_color(Color::RGB(fill.font))
}

/// Strips characters Excel rejects in sheet names and truncates.
fn sheet_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\'))
        .take(MAX_SHEET_NAME)
        .collect();
    if cleaned.is_empty() {
        "Sheet".to_string()
    } else {
        cleaned
    }
}
