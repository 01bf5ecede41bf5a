//! FILENAME: app/dashboard/src/views.rs
//! Dashboard Views - one handler per chart unit.
//!
//! Each handler is a pure function of the dataset and the filter
//! parameters: it aggregates, shapes a chart spec, optionally styles a
//! table and keeps the exact aggregate it exported so a CSV can be produced
//! on demand.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use sales_engine::{
    format_currency, schema, Dimension, FilterParams, FilteredSet, Measure, RecordTable,
    SalesTable, Tabular,
};
use sales_persistence::{export_csv, ExportFile, PersistenceError};
use sales_pivot::{
    aggregate, dimension_hierarchy, flatten_hierarchy, pivot, AggregateDefinition,
    AggregateTable, GroupKey, PivotDefinition,
};

use crate::chart::{ChartData, ChartKind, ChartSpec, Template, TextPosition};
use crate::color::ColorScale;
use crate::error::DashboardError;
use crate::styled::StyledTable;

/// Rows shown in the summary sample table.
const SUMMARY_SAMPLE_ROWS: usize = 5;
/// Rows shown in the raw data sample.
const DATA_SAMPLE_ROWS: usize = 500;
/// Every other source column from the second up to the twentieth.
const DATA_SAMPLE_COLUMNS: (usize, usize, usize) = (1, 20, 2);

const SUMMARY_COLUMNS: [&str; 7] = [
    schema::REGION,
    schema::STATE,
    schema::CITY,
    schema::CATEGORY,
    schema::SALES,
    schema::PROFIT,
    schema::QUANTITY,
];

// ============================================================================
// VIEW IDS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewId {
    CategorySales,
    RegionSales,
    TimeSeries,
    SalesTreemap,
    SegmentSales,
    CategoryShare,
    SummarySample,
    SubcategoryMonth,
    SalesVsProfit,
    DataSample,
    FilteredData,
}

impl ViewId {
    /// Dashboard order.
    pub const ALL: [ViewId; 11] = [
        ViewId::CategorySales,
        ViewId::RegionSales,
        ViewId::TimeSeries,
        ViewId::SalesTreemap,
        ViewId::SegmentSales,
        ViewId::CategoryShare,
        ViewId::SummarySample,
        ViewId::SubcategoryMonth,
        ViewId::SalesVsProfit,
        ViewId::DataSample,
        ViewId::FilteredData,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewId::CategorySales => "category_sales",
            ViewId::RegionSales => "region_sales",
            ViewId::TimeSeries => "time_series",
            ViewId::SalesTreemap => "sales_treemap",
            ViewId::SegmentSales => "segment_sales",
            ViewId::CategoryShare => "category_share",
            ViewId::SummarySample => "summary_sample",
            ViewId::SubcategoryMonth => "subcategory_month",
            ViewId::SalesVsProfit => "sales_vs_profit",
            ViewId::DataSample => "data_sample",
            ViewId::FilteredData => "filtered_data",
        }
    }

    /// Download name, for the views that offer one.
    pub fn export_file_name(&self) -> Option<&'static str> {
        match self {
            ViewId::CategorySales => Some("Category.csv"),
            ViewId::RegionSales => Some("Region.csv"),
            ViewId::TimeSeries => Some("TimeSeries.csv"),
            ViewId::SubcategoryMonth => Some("SubCategoryMonth.csv"),
            ViewId::FilteredData => Some("Dta.csv"),
            _ => None,
        }
    }

    pub fn handler(&self) -> ViewHandler {
        match self {
            ViewId::CategorySales => category_sales,
            ViewId::RegionSales => region_sales,
            ViewId::TimeSeries => time_series,
            ViewId::SalesTreemap => sales_treemap,
            ViewId::SegmentSales => segment_sales,
            ViewId::CategoryShare => category_share,
            ViewId::SummarySample => summary_sample,
            ViewId::SubcategoryMonth => subcategory_month,
            ViewId::SalesVsProfit => sales_vs_profit,
            ViewId::DataSample => data_sample,
            ViewId::FilteredData => filtered_data,
        }
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewId {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        ViewId::ALL
            .into_iter()
            .find(|id| id.as_str() == wanted)
            .ok_or_else(|| DashboardError::UnknownView(s.to_string()))
    }
}

// ============================================================================
// VIEW
// ============================================================================

/// One rendered chart unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View {
    pub id: ViewId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart: Option<ChartSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<StyledTable>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_file: Option<&'static str>,
    /// The exact table behind the download.
    #[serde(skip)]
    export_data: Option<RecordTable>,
}

impl View {
    fn new(id: ViewId, title: impl Into<String>) -> Self {
        View {
            id,
            title: title.into(),
            chart: None,
            table: None,
            export_file: None,
            export_data: None,
        }
    }

    fn chart(mut self, chart: ChartSpec) -> Self {
        self.chart = Some(chart);
        self
    }

    fn table(mut self, table: StyledTable) -> Self {
        self.table = Some(table);
        self
    }

    fn exporting<T: Tabular + ?Sized>(mut self, data: &T) -> Self {
        self.export_file = self.id.export_file_name();
        self.export_data = Some(RecordTable::new(data.header(), data.rows()));
        self
    }

    pub fn has_export(&self) -> bool {
        self.export_data.is_some()
    }

    /// Builds the CSV download. `None` for views without one.
    pub fn export(&self) -> Result<Option<ExportFile>, PersistenceError> {
        match (self.export_file, &self.export_data) {
            (Some(name), Some(data)) => export_csv(data, name).map(Some),
            _ => Ok(None),
        }
    }
}

// ============================================================================
// HANDLER INPUT
// ============================================================================

/// The two record sets the handlers read: the date window alone, and the
/// window plus categorical selections.
pub struct ViewInput<'a> {
    pub windowed: FilteredSet<'a>,
    pub filtered: FilteredSet<'a>,
}

impl<'a> ViewInput<'a> {
    pub fn new(table: &'a SalesTable, params: &FilterParams) -> Self {
        ViewInput {
            windowed: table.window(params.date_range),
            filtered: table.filter(params),
        }
    }
}

pub type ViewHandler = fn(&ViewInput<'_>) -> View;

/// Renders a single view.
pub fn render_view(table: &SalesTable, params: &FilterParams, id: ViewId) -> View {
    (id.handler())(&ViewInput::new(table, params))
}

// ============================================================================
// HANDLERS
// ============================================================================

fn sales_by(set: &FilteredSet<'_>, key: impl Into<GroupKey>) -> AggregateTable {
    aggregate(set, &AggregateDefinition::sum_by([key.into()], Measure::Sales))
}

fn series(agg: &AggregateTable) -> ChartData {
    ChartData::Series {
        labels: agg.labels(),
        values: agg.values(),
    }
}

/// Display strings of a table, for table-kind charts.
fn grid<T: Tabular + ?Sized>(table: &T) -> ChartData {
    ChartData::Grid {
        header: table.header(),
        rows: table
            .rows()
            .iter()
            .map(|r| r.iter().map(|v| v.display_value()).collect())
            .collect(),
    }
}

pub fn category_sales(input: &ViewInput<'_>) -> View {
    let agg = sales_by(&input.filtered, Dimension::Category);
    let text = agg
        .values()
        .into_iter()
        .map(|v| format_currency(v, 2, "$"))
        .collect();

    let chart = ChartSpec::new(ChartKind::Bar, "Category wise Sales", series(&agg))
        .with_axis_labels(schema::CATEGORY, schema::SALES)
        .with_text(text, TextPosition::Auto)
        .with_template(Template::Seaborn)
        .with_height(200);

    View::new(ViewId::CategorySales, "Category wise Sales")
        .chart(chart)
        .table(StyledTable::gradient(&agg, ColorScale::Blues))
        .exporting(&agg)
}

pub fn region_sales(input: &ViewInput<'_>) -> View {
    let agg = sales_by(&input.filtered, Dimension::Region);
    let chart = ChartSpec::new(ChartKind::Pie { hole: 0.5 }, "Region wise Sales", series(&agg))
        .with_text(agg.labels(), TextPosition::Outside);

    View::new(ViewId::RegionSales, "Region wise Sales")
        .chart(chart)
        .table(StyledTable::gradient(&agg, ColorScale::Oranges))
        .exporting(&agg)
}

pub fn time_series(input: &ViewInput<'_>) -> View {
    let agg = sales_by(&input.filtered, GroupKey::MonthYear);
    let chart = ChartSpec::new(ChartKind::Line, "Time Series Analysis", series(&agg))
        .with_axis_labels("Month-Year", "Amount")
        .with_template(Template::Gridon)
        .with_height(500);

    View::new(ViewId::TimeSeries, "Time Series Analysis")
        .chart(chart)
        .table(StyledTable::gradient(&agg, ColorScale::Blues).transposed())
        .exporting(&agg)
}

pub fn sales_treemap(input: &ViewInput<'_>) -> View {
    let roots = dimension_hierarchy(
        &input.filtered,
        &[Dimension::Region, Dimension::Category, Dimension::SubCategory],
        Measure::Sales,
    );
    let title = "Hierarchical view of Sales using TreeMap";
    let chart = ChartSpec::new(
        ChartKind::Treemap,
        title,
        ChartData::Tree {
            nodes: flatten_hierarchy(&roots),
        },
    )
    .with_color_by(schema::SUB_CATEGORY)
    .with_height(650);

    View::new(ViewId::SalesTreemap, title).chart(chart)
}

pub fn segment_sales(input: &ViewInput<'_>) -> View {
    let agg = sales_by(&input.filtered, Dimension::Segment);
    let chart = ChartSpec::new(ChartKind::Pie { hole: 0.0 }, "Segment wise Sales", series(&agg))
        .with_text(agg.labels(), TextPosition::Inside)
        .with_template(Template::PlotlyDark);

    View::new(ViewId::SegmentSales, "Segment wise Sales").chart(chart)
}

pub fn category_share(input: &ViewInput<'_>) -> View {
    let agg = sales_by(&input.filtered, Dimension::Category);
    let chart = ChartSpec::new(ChartKind::Pie { hole: 0.0 }, "Category wise Sales", series(&agg))
        .with_text(agg.labels(), TextPosition::Inside)
        .with_template(Template::Gridon);

    View::new(ViewId::CategoryShare, "Category wise Sales").chart(chart)
}

/// First rows of the date-windowed set; the categorical selections do not
/// apply here.
pub fn summary_sample(input: &ViewInput<'_>) -> View {
    let sample = RecordTable::project(&input.windowed, &SUMMARY_COLUMNS, SUMMARY_SAMPLE_ROWS);
    let title = "Month wise Sub-Category Sales Summary";
    let chart = ChartSpec::new(ChartKind::Table, title, grid(&sample))
        .with_color_scale(ColorScale::Cividis);

    View::new(ViewId::SummarySample, title)
        .chart(chart)
        .table(StyledTable::gradient(&sample, ColorScale::Cividis))
}

pub fn subcategory_month(input: &ViewInput<'_>) -> View {
    let table = pivot(
        &input.filtered,
        &PivotDefinition::sum(Dimension::SubCategory, GroupKey::MonthName, Measure::Sales),
    );

    let title = "Month wise sub-Category Table";
    let chart = ChartSpec::new(ChartKind::Table, title, grid(&table))
        .with_color_scale(ColorScale::Blues);

    View::new(ViewId::SubcategoryMonth, title)
        .chart(chart)
        .table(StyledTable::gradient(&table, ColorScale::Blues))
        .exporting(&table)
}

pub fn sales_vs_profit(input: &ViewInput<'_>) -> View {
    let set = &input.filtered;
    let title = "Relationship between Sales and Profits using Scatter Plot";
    let data = ChartData::Points {
        x: set.iter().map(|r| r.sales).collect(),
        y: set.iter().map(|r| r.profit).collect(),
        size: set.iter().map(|r| r.quantity).collect(),
    };
    let chart = ChartSpec::new(ChartKind::Scatter, title, data).with_axis_labels("Sales", "Profit");

    View::new(ViewId::SalesVsProfit, title).chart(chart)
}

pub fn data_sample(input: &ViewInput<'_>) -> View {
    let (start, end, step) = DATA_SAMPLE_COLUMNS;
    let sample = RecordTable::strided(&input.filtered, start, end, step, DATA_SAMPLE_ROWS);

    View::new(ViewId::DataSample, "View data")
        .table(StyledTable::gradient(&sample, ColorScale::Oranges))
}

/// The whole filtered set, every source column.
pub fn filtered_data(input: &ViewInput<'_>) -> View {
    View::new(ViewId::FilteredData, "Download Data").exporting(&input.filtered)
}
