//! FILENAME: core/engine/src/tests.rs
//! PURPOSE: Consolidated unit tests for table construction and filtering.

use chrono::NaiveDate;
use pretty_assertions::assert_eq;

use crate::{
    DateBounds, DateRange, Dimension, EngineError, FieldValue, FilterParams, Measure, RecordTable,
    SalesTable, Selection, Tabular,
};

const HEADERS: [&str; 11] = [
    "Row ID", "Order Date", "Region", "State", "City", "Category", "Sub-Category", "Segment",
    "Sales", "Profit", "Quantity",
];

fn row(id: u32, date: &str, region: &str, state: &str, city: &str, category: &str, sales: f64) -> Vec<FieldValue> {
    vec![
        FieldValue::Number(id as f64),
        FieldValue::text(date),
        FieldValue::text(region),
        FieldValue::text(state),
        FieldValue::text(city),
        FieldValue::text(category),
        FieldValue::text("Chairs"),
        FieldValue::text("Consumer"),
        FieldValue::Number(sales),
        FieldValue::Number(sales / 10.0),
        FieldValue::Number(2.0),
    ]
}

fn sample_table() -> SalesTable {
    SalesTable::from_raw(
        &HEADERS,
        vec![
            row(1, "01/02/2023", "East", "New York", "New York City", "Furniture", 100.0),
            row(2, "15/03/2023", "East", "Ohio", "Columbus", "Technology", 200.0),
            row(3, "20/04/2023", "West", "California", "Los Angeles", "Furniture", 50.0),
            row(4, "05/01/2024", "Central", "Texas", "Houston", "Office Supplies", 25.0),
        ],
    )
    .unwrap()
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ========================================
// TABLE CONSTRUCTION
// ========================================

#[test]
fn builds_typed_records_with_normalized_columns() {
    let table = sample_table();
    assert_eq!(table.len(), 4);
    assert_eq!(table.columns()[1], "order_date");
    assert_eq!(table.columns()[6], "sub-category");

    let first = &table.records()[0];
    assert_eq!(first.order_date, ymd(2023, 2, 1));
    assert_eq!(first.region, "East");
    assert_eq!(first.sales, 100.0);
    assert_eq!(first.fields[1], FieldValue::Date(ymd(2023, 2, 1)));
}

#[test]
fn numeric_text_measures_are_accepted() {
    let mut r = row(1, "01/02/2023", "East", "NY", "NYC", "Furniture", 0.0);
    r[8] = FieldValue::text("261.96");
    let table = SalesTable::from_raw(&HEADERS, vec![r]).unwrap();
    assert_eq!(table.records()[0].sales, 261.96);
}

#[test]
fn bad_date_names_row_and_column() {
    let rows = vec![
        row(1, "01/02/2023", "East", "NY", "NYC", "Furniture", 1.0),
        row(2, "not a date", "East", "NY", "NYC", "Furniture", 1.0),
    ];
    let err = SalesTable::from_raw(&HEADERS, rows).unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidDate {
            row: 2,
            column: "order_date".to_string(),
            value: "not a date".to_string(),
        }
    );
}

#[test]
fn non_numeric_sales_is_an_error() {
    let mut r = row(1, "01/02/2023", "East", "NY", "NYC", "Furniture", 0.0);
    r[8] = FieldValue::text("lots");
    let err = SalesTable::from_raw(&HEADERS, vec![r]).unwrap_err();
    assert!(matches!(err, EngineError::InvalidNumber { row: 1, ref column, .. } if column == "sales"));
}

#[test]
fn missing_column_is_an_error() {
    let err = SalesTable::from_raw(&["Order Date", "Region"], Vec::new()).unwrap_err();
    assert_eq!(err, EngineError::MissingColumn("state".to_string()));
}

#[test]
fn spreadsheet_serial_dates_are_accepted() {
    let mut r = row(1, "", "East", "NY", "NYC", "Furniture", 1.0);
    r[1] = FieldValue::Number(44958.0);
    let table = SalesTable::from_raw(&HEADERS, vec![r]).unwrap();
    assert_eq!(table.records()[0].order_date, ymd(2023, 2, 1));
}

#[test]
fn date_bounds_cover_dataset() {
    assert_eq!(
        sample_table().date_bounds(),
        Some(DateBounds {
            min: ymd(2023, 2, 1),
            max: ymd(2024, 1, 5)
        })
    );
    assert_eq!(SalesTable::default().date_bounds(), None);
}

// ========================================
// FILTERING
// ========================================

#[test]
fn full_bounds_window_keeps_everything() {
    let table = sample_table();
    let bounds = table.date_bounds().unwrap();
    let params = FilterParams {
        date_range: Some(DateRange::from(bounds)),
        ..FilterParams::default()
    };
    assert_eq!(table.filter(&params).len(), table.len());
}

#[test]
fn date_window_is_inclusive() {
    let table = sample_table();
    let params = FilterParams::default().with_date_range(ymd(2023, 3, 15), ymd(2023, 4, 20));
    let ids: Vec<f64> = table
        .filter(&params)
        .iter()
        .map(|r| r.fields[0].as_number().unwrap())
        .collect();
    assert_eq!(ids, vec![2.0, 3.0]);
}

#[test]
fn inverted_window_yields_empty_set() {
    let table = sample_table();
    let params = FilterParams::default().with_date_range(ymd(2024, 1, 1), ymd(2023, 1, 1));
    assert!(table.filter(&params).is_empty());
}

#[test]
fn selecting_all_values_is_a_no_op() {
    let table = sample_table();
    let all_regions = table.all().distinct(Dimension::Region);
    let params = FilterParams::default().with_regions(all_regions);
    assert_eq!(table.filter(&params).len(), table.len());
}

#[test]
fn selections_compose_with_and() {
    let table = sample_table();
    let params = FilterParams::default()
        .with_regions(["East", "West"])
        .with_states(["Ohio", "California"])
        .with_cities(["Columbus"]);
    let filtered = table.filter(&params);
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered.records()[0].city, "Columbus");
}

#[test]
fn selection_for_missing_value_matches_nothing() {
    let table = sample_table();
    let params = FilterParams::default().with_regions(["South"]);
    assert!(table.filter(&params).is_empty());
}

#[test]
fn distinct_keeps_first_appearance_order() {
    let table = sample_table();
    assert_eq!(
        table.all().distinct(Dimension::Region),
        vec!["East", "West", "Central"]
    );
}

#[test]
fn totals_sum_the_measure() {
    let table = sample_table();
    let filtered = table.filter(&FilterParams::default().with_regions(["East"]));
    assert_eq!(filtered.total(Measure::Sales), 300.0);
    assert_eq!(filtered.total(Measure::Quantity), 4.0);
}

#[test]
fn filtering_does_not_touch_source() {
    let table = sample_table();
    let before = table.clone();
    let _ = table.filter(&FilterParams::default().with_regions(["West"]));
    assert_eq!(table, before);
}

#[test]
fn empty_selection_returns_same_records() {
    let table = sample_table();
    let all = table.all();
    let selected = all.select(Dimension::City, &Selection::default());
    assert_eq!(selected.len(), all.len());
}

// ========================================
// PROJECTIONS
// ========================================

#[test]
fn filtered_set_exports_all_source_columns() {
    let table = sample_table();
    let set = table.filter(&FilterParams::default().with_regions(["West"]));
    assert_eq!(set.header().len(), HEADERS.len());
    let rows = set.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][1].display_value(), "2023-04-20");
}

#[test]
fn project_picks_named_columns() {
    let table = sample_table();
    let projected = RecordTable::project(&table.all(), &["region", "sales", "nope"], 2);
    assert_eq!(projected.header, vec!["region", "sales"]);
    assert_eq!(projected.rows.len(), 2);
    assert_eq!(projected.rows[1], vec![FieldValue::text("East"), FieldValue::Number(200.0)]);
}

#[test]
fn strided_takes_every_other_column() {
    let table = sample_table();
    let sample = RecordTable::strided(&table.all(), 1, 20, 2, 500);
    assert_eq!(
        sample.header,
        vec!["order_date", "state", "category", "segment", "profit"]
    );
    assert_eq!(sample.rows.len(), 4);
}
