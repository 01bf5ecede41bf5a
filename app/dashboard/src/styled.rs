//! FILENAME: app/dashboard/src/styled.rs
//! PURPOSE: Tables with per-column background gradients.
//! CONTEXT: Styling is cosmetic. CSV exports are produced from the
//! underlying aggregate, never from a `StyledTable`.

use serde::{Deserialize, Serialize};
use sales_engine::{FieldValue, Tabular};
use sales_persistence::{CellFill, SheetExport};

use crate::color::{text_color_for, ColorScale};

/// One displayed cell. Colours are CSS `#rrggbb` strings, absent for
/// cells the gradient does not cover (text and empty cells).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyledCell {
    pub value: FieldValue,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl StyledCell {
    fn plain(value: FieldValue) -> Self {
        StyledCell {
            text: value.display_value(),
            value,
            background: None,
            color: None,
        }
    }

    fn fill(&self) -> Option<CellFill> {
        let background = parse_css(self.background.as_deref()?)?;
        let font = parse_css(self.color.as_deref()?)?;
        Some(CellFill { background, font })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyledTable {
    pub scale: ColorScale,
    pub header: Vec<String>,
    pub rows: Vec<Vec<StyledCell>>,
}

impl StyledTable {
    /// Colours every column that holds at least one number, stretching
    /// the scale between that column's min and max.
    pub fn gradient<T: Tabular + ?Sized>(table: &T, scale: ColorScale) -> Self {
        let header = table.header();
        let values = table.rows();

        let ranges: Vec<Option<(f64, f64)>> = (0..header.len())
            .map(|col| column_range(&values, col))
            .collect();

        let rows = values
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .enumerate()
                    .map(|(col, value)| {
                        let range = ranges.get(col).copied().flatten();
                        match (numeric(&value), range) {
                            (Some(n), Some((min, max))) => {
                                let background = scale.for_value(n, min, max);
                                StyledCell {
                                    text: value.display_value(),
                                    value,
                                    background: Some(background.to_css()),
                                    color: Some(text_color_for(background).to_css()),
                                }
                            }
                            _ => StyledCell::plain(value),
                        }
                    })
                    .collect()
            })
            .collect();

        StyledTable { scale, header, rows }
    }

    /// Swaps rows and columns. The first column becomes the header, so
    /// a two-column series turns into one labelled row. Cell styles move
    /// with their cells.
    pub fn transposed(&self) -> Self {
        let width = self.header.len();
        let Some(first_col) = self.header.first() else {
            return self.clone();
        };

        let mut header = vec![first_col.clone()];
        header.extend(
            self.rows
                .iter()
                .map(|r| r.first().map(|c| c.text.clone()).unwrap_or_default()),
        );

        if self.rows.is_empty() {
            return StyledTable {
                scale: self.scale,
                header,
                rows: Vec::new(),
            };
        }

        let rows = (1..width)
            .map(|col| {
                let mut out = vec![StyledCell::plain(FieldValue::text(&self.header[col]))];
                out.extend(self.rows.iter().map(|r| {
                    r.get(col)
                        .cloned()
                        .unwrap_or_else(|| StyledCell::plain(FieldValue::Empty))
                }));
                out
            })
            .collect();

        StyledTable {
            scale: self.scale,
            header,
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Worksheet form for the XLSX report.
    pub fn to_sheet(&self, name: &str) -> SheetExport {
        SheetExport {
            name: name.to_string(),
            header: self.header.clone(),
            rows: self
                .rows
                .iter()
                .map(|r| r.iter().map(|c| c.value.clone()).collect())
                .collect(),
            fills: self
                .rows
                .iter()
                .map(|r| r.iter().map(StyledCell::fill).collect())
                .collect(),
        }
    }
}

fn column_range(rows: &[Vec<FieldValue>], col: usize) -> Option<(f64, f64)> {
    rows.iter()
        .filter_map(|r| r.get(col).and_then(numeric))
        .filter(|n| n.is_finite())
        .fold(None, |acc, n| match acc {
            None => Some((n, n)),
            Some((min, max)) => Some((min.min(n), max.max(n))),
        })
}

/// Only stored numbers take part; numeric-looking text does not.
fn numeric(value: &FieldValue) -> Option<f64> {
    match value {
        FieldValue::Number(n) => Some(*n),
        _ => None,
    }
}

fn parse_css(css: &str) -> Option<u32> {
    u32::from_str_radix(css.strip_prefix('#')?, 16).ok()
}
