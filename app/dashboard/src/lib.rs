//! FILENAME: app/dashboard/src/lib.rs
//! Sales Dashboard
//!
//! Renders the Superstore sales dashboard over a loaded dataset. Every view
//! is a pure function of the dataset and the filter parameters; exports
//! are produced on demand from the exact aggregate behind each view.
//!
//! Modules:
//! - `views`: one handler per chart unit
//! - `chart`: declarative chart specifications
//! - `color` / `styled`: gradient-styled tables
//! - `dashboard`: composition, report, CSV and XLSX exports
//! - `config` / `logging` / `cli`: the binary's ambient setup

pub mod chart;
pub mod cli;
pub mod color;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod logging;
pub mod styled;
pub mod views;

pub use chart::{ChartData, ChartKind, ChartSpec, Template, TextPosition};
pub use color::{ColorScale, Rgb};
pub use config::DashboardConfig;
pub use dashboard::{Dashboard, DashboardReport, DatasetSummary, FilterOptions, DASHBOARD_TITLE};
pub use error::DashboardError;
pub use logging::init_logging;
pub use styled::{StyledCell, StyledTable};
pub use views::{render_view, View, ViewHandler, ViewId, ViewInput};
