//! FILENAME: app/dashboard/src/dashboard.rs
// PURPOSE: Composes every view over one loaded dataset.

use log::{debug, info};
use serde::Serialize;
use std::path::Path;

use sales_engine::{DateBounds, Dimension, FilterParams, SalesTable};
use sales_persistence::{
    load_sales, report_xlsx_bytes, save_report_xlsx, DataSource, ExportFile, LoadOptions,
    SheetExport,
};

use crate::error::DashboardError;
use crate::views::{View, ViewId, ViewInput};

pub const DASHBOARD_TITLE: &str = "Sample Superstore EDA";

/// Values offered by the region, state and city pickers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub regions: Vec<String>,
    pub states: Vec<String>,
    pub cities: Vec<String>,
}

/// What the pickers need before anything is rendered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub record_count: usize,
    pub columns: Vec<String>,
    pub bounds: Option<DateBounds>,
    pub options: FilterOptions,
}

/// Every view rendered for one set of filter parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub title: &'static str,
    pub params: FilterParams,
    pub bounds: Option<DateBounds>,
    pub options: FilterOptions,
    pub record_count: usize,
    pub filtered_count: usize,
    pub views: Vec<View>,
}

impl DashboardReport {
    pub fn view(&self, id: ViewId) -> Option<&View> {
        self.views.iter().find(|v| v.id == id)
    }

    pub fn to_json(&self, pretty: bool) -> Result<String, DashboardError> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// CSV downloads for every view that offers one, in dashboard order.
    pub fn exports(&self) -> Result<Vec<ExportFile>, DashboardError> {
        let mut files = Vec::new();
        for view in &self.views {
            if let Some(file) = view.export()? {
                files.push(file);
            }
        }
        Ok(files)
    }

    /// One worksheet per styled table.
    pub fn sheets(&self) -> Vec<SheetExport> {
        self.views
            .iter()
            .filter_map(|v| v.table.as_ref().map(|t| t.to_sheet(v.id.as_str())))
            .collect()
    }
}

/// The loaded dataset and the operations the front end calls.
#[derive(Debug, Clone)]
pub struct Dashboard {
    table: SalesTable,
}

impl Dashboard {
    pub fn new(table: SalesTable) -> Self {
        Dashboard { table }
    }

    pub fn load(source: &DataSource, options: &LoadOptions) -> Result<Self, DashboardError> {
        Ok(Dashboard::new(load_sales(source, options)?))
    }

    pub fn table(&self) -> &SalesTable {
        &self.table
    }

    /// Default start and end for the date pickers.
    pub fn bounds(&self) -> Option<DateBounds> {
        self.table.date_bounds()
    }

    /// Distinct values inside the date window, first appearance order.
    pub fn options(&self, params: &FilterParams) -> FilterOptions {
        let windowed = self.table.window(params.date_range);
        FilterOptions {
            regions: windowed.distinct(Dimension::Region),
            states: windowed.distinct(Dimension::State),
            cities: windowed.distinct(Dimension::City),
        }
    }

    pub fn summary(&self, params: &FilterParams) -> DatasetSummary {
        DatasetSummary {
            record_count: self.table.len(),
            columns: self.table.columns().to_vec(),
            bounds: self.bounds(),
            options: self.options(params),
        }
    }

    pub fn view(&self, id: ViewId, params: &FilterParams) -> View {
        (id.handler())(&ViewInput::new(&self.table, params))
    }

    pub fn render(&self, params: &FilterParams) -> DashboardReport {
        let input = ViewInput::new(&self.table, params);
        let views: Vec<View> = ViewId::ALL
            .iter()
            .map(|id| (id.handler())(&input))
            .collect();
        debug!(
            "rendered {} views over {} of {} records",
            views.len(),
            input.filtered.len(),
            self.table.len()
        );

        DashboardReport {
            title: DASHBOARD_TITLE,
            params: params.clone(),
            bounds: self.bounds(),
            options: self.options(params),
            record_count: self.table.len(),
            filtered_count: input.filtered.len(),
            views,
        }
    }

    pub fn export(&self, id: ViewId, params: &FilterParams) -> Result<ExportFile, DashboardError> {
        self.view(id, params)
            .export()?
            .ok_or_else(|| DashboardError::NoExport(id.to_string()))
    }

    pub fn export_all(&self, params: &FilterParams) -> Result<Vec<ExportFile>, DashboardError> {
        self.render(params).exports()
    }

    pub fn save_xlsx(&self, params: &FilterParams, path: &Path) -> Result<(), DashboardError> {
        let sheets = self.render(params).sheets();
        save_report_xlsx(&sheets, path)?;
        info!("saved dashboard report to {}", path.display());
        Ok(())
    }

    pub fn xlsx_bytes(&self, params: &FilterParams) -> Result<Vec<u8>, DashboardError> {
        Ok(report_xlsx_bytes(&self.render(params).sheets())?)
    }
}
