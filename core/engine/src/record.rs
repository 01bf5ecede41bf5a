//! FILENAME: core/engine/src/record.rs
//! PURPOSE: The typed sales record and the immutable table of records.
//! CONTEXT: A `SalesTable` is built once from normalized headers and raw
//! rows. Every later stage borrows from it and never mutates it.

use chrono::NaiveDate;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::date::{from_excel_serial, parse_date, DateBounds, DateOrder, MonthBucket};
use crate::error::EngineError;
use crate::filter::{DateRange, FilterParams, FilteredSet};
use crate::schema::{self, Schema};
use crate::value::FieldValue;

// ============================================================================
// DIMENSIONS AND MEASURES
// ============================================================================

/// A categorical column records can be filtered or grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Region,
    State,
    City,
    Category,
    SubCategory,
    Segment,
}

impl Dimension {
    pub const ALL: [Dimension; 6] = [
        Dimension::Region,
        Dimension::State,
        Dimension::City,
        Dimension::Category,
        Dimension::SubCategory,
        Dimension::Segment,
    ];

    /// Normalized source column name.
    pub fn column(&self) -> &'static str {
        match self {
            Dimension::Region => schema::REGION,
            Dimension::State => schema::STATE,
            Dimension::City => schema::CITY,
            Dimension::Category => schema::CATEGORY,
            Dimension::SubCategory => schema::SUB_CATEGORY,
            Dimension::Segment => schema::SEGMENT,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// A numeric column that can be summed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Measure {
    Sales,
    Profit,
    Quantity,
}

impl Measure {
    pub fn column(&self) -> &'static str {
        match self {
            Measure::Sales => schema::SALES,
            Measure::Profit => schema::PROFIT,
            Measure::Quantity => schema::QUANTITY,
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

// ============================================================================
// SALES RECORD
// ============================================================================

/// One row of the source table with the fields the dashboard relies on
/// resolved to typed values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub order_date: NaiveDate,
    pub region: String,
    pub state: String,
    pub city: String,
    pub category: String,
    pub sub_category: String,
    pub segment: String,
    pub sales: f64,
    pub profit: f64,
    pub quantity: f64,
    /// Every source field in header order. The order date field holds the
    /// parsed date.
    pub fields: Vec<FieldValue>,
}

impl SalesRecord {
    pub fn dimension(&self, dimension: Dimension) -> &str {
        match dimension {
            Dimension::Region => &self.region,
            Dimension::State => &self.state,
            Dimension::City => &self.city,
            Dimension::Category => &self.category,
            Dimension::SubCategory => &self.sub_category,
            Dimension::Segment => &self.segment,
        }
    }

    pub fn measure(&self, measure: Measure) -> f64 {
        match measure {
            Measure::Sales => self.sales,
            Measure::Profit => self.profit,
            Measure::Quantity => self.quantity,
        }
    }

    pub fn month_bucket(&self) -> MonthBucket {
        MonthBucket::of(self.order_date)
    }

    /// Builds a record from one raw row. `row` is the 1-based data row
    /// number used in error messages.
    fn from_fields(
        schema: &Schema,
        mut fields: Vec<FieldValue>,
        row: usize,
    ) -> Result<(Self, Option<DateOrder>), EngineError> {
        let field = |idx: usize| fields.get(idx).cloned().unwrap_or(FieldValue::Empty);

        let (order_date, order) = parse_order_date(&field(schema.order_date), row)?;
        let text = |idx: usize| field(idx).display_value().trim().to_string();
        let number = |idx: usize, column: &str| -> Result<f64, EngineError> {
            let value = field(idx);
            value.as_number().ok_or_else(|| EngineError::InvalidNumber {
                row,
                column: column.to_string(),
                value: value.display_value(),
            })
        };

        let record_fields = SalesRecord {
            order_date,
            region: text(schema.region),
            state: text(schema.state),
            city: text(schema.city),
            category: text(schema.category),
            sub_category: text(schema.sub_category),
            segment: text(schema.segment),
            sales: number(schema.sales, schema::SALES)?,
            profit: number(schema.profit, schema::PROFIT)?,
            quantity: number(schema.quantity, schema::QUANTITY)?,
            fields: Vec::new(),
        };

        if let Some(slot) = fields.get_mut(schema.order_date) {
            *slot = FieldValue::Date(order_date);
        }

        Ok((
            SalesRecord {
                fields,
                ..record_fields
            },
            order,
        ))
    }
}

fn parse_order_date(
    value: &FieldValue,
    row: usize,
) -> Result<(NaiveDate, Option<DateOrder>), EngineError> {
    let parsed = match value {
        FieldValue::Date(d) => Some((*d, None)),
        FieldValue::Number(n) => from_excel_serial(*n).map(|d| (d, None)),
        FieldValue::Text(s) => parse_date(s).map(|p| (p.date, Some(p.order))),
        FieldValue::Empty => None,
    };
    parsed.ok_or_else(|| EngineError::InvalidDate {
        row,
        column: schema::ORDER_DATE.to_string(),
        value: value.display_value(),
    })
}

// ============================================================================
// SALES TABLE
// ============================================================================

/// The loaded dataset. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesTable {
    columns: Vec<String>,
    records: Vec<SalesRecord>,
}

impl SalesTable {
    /// Normalizes `headers`, resolves the schema and converts every row.
    /// Fails on the first missing column, bad date or non-numeric measure.
    pub fn from_raw<S: AsRef<str>>(
        headers: &[S],
        rows: Vec<Vec<FieldValue>>,
    ) -> Result<Self, EngineError> {
        let columns = schema::normalize_headers(headers);
        let schema = Schema::resolve(&columns)?;

        let mut records = Vec::with_capacity(rows.len());
        let mut month_first = 0usize;
        for (idx, fields) in rows.into_iter().enumerate() {
            let (record, order) = SalesRecord::from_fields(&schema, fields, idx + 1)?;
            if order == Some(DateOrder::MonthFirst) {
                month_first += 1;
            }
            records.push(record);
        }

        if month_first > 0 {
            warn!(
                "{} order dates could not be read day-first and were read month-first",
                month_first
            );
        }
        debug!("built sales table: {} columns, {} records", columns.len(), records.len());

        Ok(SalesTable { columns, records })
    }

    /// Normalized header row, in source order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest and latest order date; the defaults for the date pickers.
    pub fn date_bounds(&self) -> Option<DateBounds> {
        DateBounds::from_dates(self.records.iter().map(|r| r.order_date))
    }

    /// Every record, unfiltered.
    pub fn all(&self) -> FilteredSet<'_> {
        FilteredSet::new(&self.columns, self.records.iter().collect())
    }

    /// Records inside the date window. `None` keeps everything.
    pub fn window(&self, range: Option<DateRange>) -> FilteredSet<'_> {
        match range {
            None => self.all(),
            Some(range) => FilteredSet::new(
                &self.columns,
                self.records
                    .iter()
                    .filter(|r| range.contains(r.order_date))
                    .collect(),
            ),
        }
    }

    /// Applies the date window and then the region, state and city
    /// selections.
    pub fn filter(&self, params: &FilterParams) -> FilteredSet<'_> {
        let filtered = self
            .window(params.date_range)
            .select(Dimension::Region, &params.regions)
            .select(Dimension::State, &params.states)
            .select(Dimension::City, &params.cities);
        debug!("filter kept {} of {} records", filtered.len(), self.len());
        filtered
    }
}
