//! FILENAME: app/dashboard/src/logging.rs
// PURPOSE: Logger setup for the dashboard binary.

use env_logger::{Builder, Env};

/// Filter used when `RUST_LOG` is not set. `-v` flags beat the config.
pub fn default_filter(verbosity: u8, configured: Option<&str>) -> String {
    match verbosity {
        0 => configured.unwrap_or("info").to_string(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Installs the global logger. Later calls are ignored.
pub fn init_logging(verbosity: u8, configured: Option<&str>) {
    let filter = default_filter(verbosity, configured);
    let _ = Builder::from_env(Env::default().default_filter_or(filter))
        .format_timestamp_millis()
        .format_target(false)
        .try_init();
}
