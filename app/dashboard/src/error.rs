//! FILENAME: app/dashboard/src/error.rs

use sales_persistence::PersistenceError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown view '{0}'")]
    UnknownView(String),

    #[error("view '{0}' has no export")]
    NoExport(String),
}
