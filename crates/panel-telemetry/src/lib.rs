//! # Panel Telemetry
//!
//! Structured logging for the control panel client.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use panel_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! let handle = init_telemetry(config)?;
//! tracing::info!(file = %handle.log_file.display(), "logging ready");
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `PANEL_LOG_LEVEL` | `info` | Log filter, falls back to `RUST_LOG` |
//! | `PANEL_LOG_FILE` | `panel-tui.log` | Destination file |
//! | `PANEL_JSON_LOGS` | `false` | JSON records instead of plain lines |

mod config;
mod logging;

use std::path::PathBuf;

pub use config::{TelemetryConfig, DEFAULT_LOG_FILE};
pub use logging::{build_filter, open_log_file};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log filter '{directive}': {reason}")]
    Filter { directive: String, reason: String },

    #[error("Cannot open log file {}: {source}", path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to install subscriber: {0}")]
    Init(String),
}

/// Where telemetry is being written.
#[derive(Debug, Clone)]
pub struct TelemetryHandle {
    pub log_file: PathBuf,
    pub json_logs: bool,
}

/// Install the global subscriber described by `config`.
///
/// Fails if a global subscriber is already set.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryHandle, TelemetryError> {
    logging::init_logging(&config)?;

    tracing::info!(
        service = %config.service_name,
        version = env!("CARGO_PKG_VERSION"),
        level = %config.log_level,
        "Telemetry initialized"
    );

    Ok(TelemetryHandle {
        log_file: config.log_file,
        json_logs: config.json_logs,
    })
}
