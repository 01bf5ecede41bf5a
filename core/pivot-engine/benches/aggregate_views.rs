//! FILENAME: core/pivot-engine/benches/aggregate_views.rs
//! Benchmarks for the dashboard's aggregate passes over a synthetic dataset.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sales_engine::{Dimension, FieldValue, Measure, SalesTable};
use sales_pivot::{aggregate, dimension_hierarchy, pivot, AggregateDefinition, GroupKey, PivotDefinition};

const REGIONS: [&str; 4] = ["Central", "East", "South", "West"];
const CATEGORIES: [(&str, &str); 6] = [
    ("Furniture", "Chairs"),
    ("Furniture", "Tables"),
    ("Office Supplies", "Paper"),
    ("Office Supplies", "Binders"),
    ("Technology", "Phones"),
    ("Technology", "Machines"),
];
const SEGMENTS: [&str; 3] = ["Consumer", "Corporate", "Home Office"];

fn synthetic_table(rows: usize) -> SalesTable {
    let headers = [
        "Order Date", "Region", "State", "City", "Category", "Sub-Category", "Segment", "Sales",
        "Profit", "Quantity",
    ];
    let data = (0..rows)
        .map(|i| {
            let (category, sub) = CATEGORIES[i % CATEGORIES.len()];
            vec![
                FieldValue::text(format!("{:02}/{:02}/{}", i % 28 + 1, i % 12 + 1, 2014 + i % 4)),
                FieldValue::text(REGIONS[i % REGIONS.len()]),
                FieldValue::text(format!("State{}", i % 49)),
                FieldValue::text(format!("City{}", i % 531)),
                FieldValue::text(category),
                FieldValue::text(sub),
                FieldValue::text(SEGMENTS[i % SEGMENTS.len()]),
                FieldValue::Number((i % 1000) as f64 * 1.37),
                FieldValue::Number((i % 200) as f64 - 50.0),
                FieldValue::Number((i % 9 + 1) as f64),
            ]
        })
        .collect();
    SalesTable::from_raw(&headers, data).expect("synthetic table is valid")
}

fn bench_aggregates(c: &mut Criterion) {
    let table = synthetic_table(10_000);
    let set = table.all();

    c.bench_function("category_sum_10k", |b| {
        let def = AggregateDefinition::sum_by([Dimension::Category], Measure::Sales);
        b.iter(|| aggregate(black_box(&set), &def))
    });

    c.bench_function("month_year_sum_10k", |b| {
        let def = AggregateDefinition::sum_by([GroupKey::MonthYear], Measure::Sales);
        b.iter(|| aggregate(black_box(&set), &def))
    });

    c.bench_function("region_category_subcategory_hierarchy_10k", |b| {
        let dims = [Dimension::Region, Dimension::Category, Dimension::SubCategory];
        b.iter(|| dimension_hierarchy(black_box(&set), &dims, Measure::Sales))
    });

    c.bench_function("subcategory_month_pivot_10k", |b| {
        let def = PivotDefinition::sum(Dimension::SubCategory, GroupKey::MonthName, Measure::Sales);
        b.iter(|| pivot(black_box(&set), &def))
    });
}

criterion_group!(benches, bench_aggregates);
criterion_main!(benches);
