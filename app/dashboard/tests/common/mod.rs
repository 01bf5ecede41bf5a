//! FILENAME: tests/common/mod.rs
//! Fixtures for sales dashboard integration tests.

#![allow(dead_code)]

use sales_dashboard::Dashboard;
use sales_persistence::{DataSource, LoadOptions, Upload};

/// One fixture order. Everything not listed here is filled with plausible
/// constant values when the CSV is built.
#[derive(Debug, Clone, Copy)]
pub struct FixtureRow {
    pub order_date: &'static str,
    pub segment: &'static str,
    pub city: &'static str,
    pub state: &'static str,
    pub region: &'static str,
    pub category: &'static str,
    pub sub_category: &'static str,
    pub sales: f64,
    pub quantity: f64,
    pub profit: f64,
}

impl FixtureRow {
    const fn new(
        order_date: &'static str,
        segment: &'static str,
        city: &'static str,
        state: &'static str,
        region: &'static str,
        category: &'static str,
        sub_category: &'static str,
        sales: f64,
        quantity: f64,
        profit: f64,
    ) -> Self {
        FixtureRow {
            order_date,
            segment,
            city,
            state,
            region,
            category,
            sub_category,
            sales,
            quantity,
            profit,
        }
    }
}

/// Superstore-shaped sample data.
pub struct SalesFixture;

impl SalesFixture {
    /// Source headers, as the raw export spells them.
    pub fn headers() -> Vec<&'static str> {
        vec![
            "Row ID",
            "Order ID",
            "Order Date",
            "Ship Date",
            "Ship Mode",
            "Customer ID",
            "Customer Name",
            "Segment",
            "Country",
            "City",
            "State",
            "Postal Code",
            "Region",
            "Product ID",
            "Category",
            "Sub-Category",
            "Product Name",
            "Sales",
            "Quantity",
            "Discount",
            "Profit",
        ]
    }

    /// Six orders across three regions and two years.
    ///
    /// Totals: sales 425.5; East 300, West 60, Central 65.5;
    /// Furniture 175.5, Office Supplies 50, Technology 200.
    pub fn rows() -> Vec<FixtureRow> {
        vec![
            FixtureRow::new("01/02/2023", "Consumer", "New York City", "New York", "East", "Furniture", "Chairs", 100.0, 2.0, 20.0),
            FixtureRow::new("15/03/2023", "Corporate", "Philadelphia", "Pennsylvania", "East", "Technology", "Phones", 200.0, 1.0, 50.0),
            FixtureRow::new("20/02/2023", "Consumer", "Seattle", "Washington", "West", "Furniture", "Tables", 50.0, 3.0, -10.0),
            FixtureRow::new("03/04/2022", "Home Office", "Houston", "Texas", "Central", "Furniture", "Chairs", 25.5, 1.0, 2.5),
            FixtureRow::new("28/12/2022", "Consumer", "Los Angeles", "California", "West", "Office Supplies", "Paper", 10.0, 4.0, 4.8),
            FixtureRow::new("10/03/2023", "Corporate", "Houston", "Texas", "Central", "Office Supplies", "Binders", 40.0, 2.0, 8.0),
        ]
    }

    /// East sells 100 + 200, West sells 50.
    pub fn two_regions() -> Vec<FixtureRow> {
        vec![
            FixtureRow::new("01/01/2023", "Consumer", "New York City", "New York", "East", "Furniture", "Chairs", 100.0, 1.0, 10.0),
            FixtureRow::new("02/01/2023", "Consumer", "New York City", "New York", "East", "Furniture", "Chairs", 200.0, 1.0, 20.0),
            FixtureRow::new("03/01/2023", "Consumer", "Seattle", "Washington", "West", "Furniture", "Chairs", 50.0, 1.0, 5.0),
        ]
    }

    pub fn csv() -> String {
        Self::csv_from(&Self::rows())
    }

    pub fn csv_from(rows: &[FixtureRow]) -> String {
        let mut out = Self::headers().join(",");
        out.push('\n');
        for (idx, row) in rows.iter().enumerate() {
            let id = idx + 1;
            let fields = [
                id.to_string(),
                format!("CA-2023-{:06}", 100000 + id),
                row.order_date.to_string(),
                row.order_date.to_string(),
                "Second Class".to_string(),
                format!("CG-{:05}", 12520 + id),
                "Claire Gute".to_string(),
                row.segment.to_string(),
                "United States".to_string(),
                row.city.to_string(),
                row.state.to_string(),
                "10001".to_string(),
                row.region.to_string(),
                format!("FUR-CH-{:08}", 10000000 + id),
                row.category.to_string(),
                row.sub_category.to_string(),
                format!("Item {}", id),
                row.sales.to_string(),
                row.quantity.to_string(),
                "0".to_string(),
                row.profit.to_string(),
            ];
            out.push_str(&fields.join(","));
            out.push('\n');
        }
        out
    }

    pub fn upload(name: &str, contents: impl Into<Vec<u8>>) -> Upload {
        Upload {
            name: name.to_string(),
            bytes: contents.into(),
        }
    }

    pub fn dashboard() -> Dashboard {
        Self::dashboard_from(&Self::rows())
    }

    /// Loads `rows` the way an uploaded CSV would be.
    pub fn dashboard_from(rows: &[FixtureRow]) -> Dashboard {
        let source = DataSource::Upload(Self::upload("superstore.csv", Self::csv_from(rows)));
        Dashboard::load(&source, &LoadOptions::default()).expect("fixture loads")
    }

    pub fn total_sales(rows: &[FixtureRow]) -> f64 {
        rows.iter().map(|r| r.sales).sum()
    }
}
