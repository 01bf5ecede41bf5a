//! FILENAME: app/dashboard/src/config.rs
//! PURPOSE: File-based settings for the dashboard binary.
//! CONTEXT: Command-line flags and their environment variables are
//! resolved by the CLI and override anything read here.

use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use sales_persistence::LoadOptions;

use crate::error::DashboardError;

/// ```toml
/// data_path = "data/superstore.csv"
/// export_dir = "exports"
/// log_level = "info"
///
/// [loader]
/// encoding = "iso-8859-1"
/// delimiter = ","
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_path: Option<PathBuf>,
    pub export_dir: PathBuf,
    pub log_level: Option<String>,
    pub loader: LoadOptions,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            data_path: None,
            export_dir: PathBuf::from("exports"),
            log_level: None,
            loader: LoadOptions::default(),
        }
    }
}

impl DashboardConfig {
    pub fn from_toml_str(text: &str, path: &Path) -> Result<Self, DashboardError> {
        toml::from_str(text).map_err(|source| DashboardError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, DashboardError> {
        let text = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text, path)?;
        debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Defaults when no file is given.
    pub fn load_optional(path: Option<&Path>) -> Result<Self, DashboardError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// The flag (or its environment variable) wins over the file.
    pub fn data_path<'a>(&'a self, flag: Option<&'a Path>) -> Option<&'a Path> {
        flag.or(self.data_path.as_deref())
    }

    pub fn export_dir<'a>(&'a self, flag: Option<&'a Path>) -> &'a Path {
        flag.unwrap_or(self.export_dir.as_path())
    }
}
