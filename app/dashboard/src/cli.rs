//! FILENAME: app/dashboard/src/cli.rs
//! PURPOSE: Command-line front end: loads the data once and prints or
//! writes the dashboard for the chosen filters.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{ArgAction, Args as ClapArgs, Parser, Subcommand};
use log::{info, warn};

use sales_engine::{parse_day_first, DateBounds, FilterParams};
use sales_persistence::DataSource;

use crate::config::DashboardConfig;
use crate::dashboard::Dashboard;
use crate::logging::init_logging;
use crate::views::ViewId;

#[derive(Parser, Debug)]
#[command(
    name = "sales-dashboard",
    version,
    about = "Explore Superstore sales: filter by date and location, render chart views, export CSV and XLSX."
)]
pub struct Args {
    /// Sales file to load (csv, txt, xls, xlsx).
    #[arg(long, value_name = "PATH", env = "SALES_DASHBOARD_DATA", global = true)]
    pub data: Option<PathBuf>,

    /// TOML config file.
    #[arg(long, value_name = "PATH", env = "SALES_DASHBOARD_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// More log output (repeatable).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(flatten)]
    pub filters: FilterArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(ClapArgs, Debug, Default, Clone, PartialEq)]
pub struct FilterArgs {
    /// First order date to keep, day first (e.g. 01/02/2023).
    #[arg(long, value_name = "DATE", value_parser = parse_date_arg, global = true)]
    pub start: Option<NaiveDate>,

    /// Last order date to keep, day first.
    #[arg(long, value_name = "DATE", value_parser = parse_date_arg, global = true)]
    pub end: Option<NaiveDate>,

    /// Keep only this region (repeatable).
    #[arg(long = "region", value_name = "REGION", global = true)]
    pub regions: Vec<String>,

    /// Keep only this state (repeatable).
    #[arg(long = "state", value_name = "STATE", global = true)]
    pub states: Vec<String>,

    /// Keep only this city (repeatable).
    #[arg(long = "city", value_name = "CITY", global = true)]
    pub cities: Vec<String>,
}

impl FilterArgs {
    /// A missing end of the window falls back to the dataset bound.
    pub fn to_params(&self, bounds: Option<DateBounds>) -> FilterParams {
        let mut params = FilterParams::default()
            .with_regions(self.regions.iter().cloned())
            .with_states(self.states.iter().cloned())
            .with_cities(self.cities.iter().cloned());

        let start = self.start.or(bounds.map(|b| b.min));
        let end = self.end.or(bounds.map(|b| b.max));
        if let (Some(start), Some(end)) = (start, end) {
            params = params.with_date_range(start, end);
        }
        params
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print date bounds and the region/state/city options as JSON.
    Bounds,
    /// Print every rendered view as JSON.
    Report {
        /// Indent the JSON.
        #[arg(long)]
        pretty: bool,
        /// Write to a file instead of stdout.
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Write CSV downloads for one view, or `all`.
    Export {
        /// View id (e.g. region_sales) or `all`.
        view: String,
        /// Output directory; defaults to the configured export directory.
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },
    /// Write the styled tables to an XLSX workbook.
    Xlsx {
        #[arg(long, value_name = "FILE")]
        out: PathBuf,
    },
}

fn parse_date_arg(value: &str) -> std::result::Result<NaiveDate, String> {
    parse_day_first(value)
        .ok_or_else(|| format!("'{}' is not a date (expected day first, e.g. 31/12/2023)", value))
}

/// Parses the process arguments and runs.
pub fn main() -> Result<()> {
    run(Args::parse())
}

pub fn run(args: Args) -> Result<()> {
    let config = DashboardConfig::load_optional(args.config.as_deref())
        .context("failed to load config")?;
    init_logging(args.verbose, config.log_level.as_deref());

    let source = DataSource::resolve(None, config.data_path(args.data.as_deref()))
        .context("no sales data: pass --data, set SALES_DASHBOARD_DATA or data_path in the config")?;
    let dashboard = Dashboard::load(&source, &config.loader)
        .with_context(|| format!("failed to load {}", source.name()))?;

    let params = args.filters.to_params(dashboard.bounds());
    if let Some(range) = params.date_range {
        if range.is_inverted() {
            warn!(
                "start date {} is after end date {}; nothing will match",
                range.start, range.end
            );
        }
    }

    match &args.command {
        Command::Bounds => {
            let summary = dashboard.summary(&params);
            print_json(&serde_json::to_string_pretty(&summary)?)?;
        }
        Command::Report { pretty, out } => {
            let json = dashboard.render(&params).to_json(*pretty)?;
            match out {
                Some(path) => {
                    fs::write(path, json)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    info!("wrote report to {}", path.display());
                }
                None => print_json(&json)?,
            }
        }
        Command::Export { view, out } => {
            let dir = config.export_dir(out.as_deref()).to_path_buf();
            let files = if view.eq_ignore_ascii_case("all") {
                dashboard.export_all(&params)?
            } else {
                let id: ViewId = view.parse()?;
                vec![dashboard.export(id, &params)?]
            };
            if files.is_empty() {
                bail!("nothing to export");
            }
            for file in &files {
                let path = file
                    .write_to(&dir)
                    .with_context(|| format!("failed to write {}", file.file_name))?;
                println!("{}", path.display());
            }
        }
        Command::Xlsx { out } => {
            dashboard
                .save_xlsx(&params, out)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("{}", out.display());
        }
    }

    Ok(())
}

fn print_json(json: &str) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", json)?;
    Ok(())
}
