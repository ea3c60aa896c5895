//! Panel configuration and validation
//!
//! # Example
//!
//! ```
//! use panel_core::PanelConfigBuilder;
//!
//! let config = PanelConfigBuilder::new()
//!     .backend_url("http://192.168.1.20:8000")
//!     .log_capacity(200)
//!     .build()
//!     .expect("valid config");
//!
//! assert_eq!(
//!     config.socket_url(),
//!     "ws://192.168.1.20:8000/socket.io/?EIO=4&transport=websocket"
//! );
//! ```

use serde::{Deserialize, Serialize};

use super::log::DEFAULT_LOG_CAPACITY;
use crate::error::ConfigError;

/// Default backend address.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Upper bound on retained log entries.
pub const MAX_LOG_CAPACITY: usize = 100_000;

/// Socket.IO endpoint path with Engine.IO v4 over WebSocket.
const SOCKET_IO_PATH: &str = "/socket.io/?EIO=4&transport=websocket";

/// Control panel configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelConfig {
    /// Backend base URL (`http://host:port`)
    pub backend_url: String,
    /// Log entries kept before the oldest are evicted
    pub log_capacity: usize,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            log_capacity: DEFAULT_LOG_CAPACITY,
        }
    }
}

impl PanelConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let rest = Self::strip_scheme(&self.backend_url)
            .ok_or_else(|| ConfigError::UnsupportedScheme(self.backend_url.clone()))?;

        if rest.trim_end_matches('/').is_empty() {
            return Err(ConfigError::MissingHost(self.backend_url.clone()));
        }

        if self.log_capacity == 0 || self.log_capacity > MAX_LOG_CAPACITY {
            return Err(ConfigError::LogCapacity {
                value: self.log_capacity,
                max: MAX_LOG_CAPACITY,
            });
        }

        Ok(())
    }

    /// WebSocket URL of the Socket.IO endpoint behind `backend_url`.
    ///
    /// `http` maps to `ws` and `https` to `wss`; any path on the base URL
    /// is replaced.
    pub fn socket_url(&self) -> String {
        let secure =
            self.backend_url.starts_with("https://") || self.backend_url.starts_with("wss://");
        let rest = Self::strip_scheme(&self.backend_url).unwrap_or(&self.backend_url);
        let host = rest.split('/').next().unwrap_or(rest);
        let scheme = if secure { "wss" } else { "ws" };
        format!("{scheme}://{host}{SOCKET_IO_PATH}")
    }

    fn strip_scheme(url: &str) -> Option<&str> {
        ["http://", "https://", "ws://", "wss://"]
            .iter()
            .find_map(|scheme| url.strip_prefix(scheme))
    }
}

/// Fluent builder for [`PanelConfig`].
#[derive(Debug, Default)]
pub struct PanelConfigBuilder {
    config: PanelConfig,
}

impl PanelConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn backend_url(mut self, url: impl Into<String>) -> Self {
        self.config.backend_url = url.into();
        self
    }

    pub fn log_capacity(mut self, capacity: usize) -> Self {
        self.config.log_capacity = capacity;
        self
    }

    pub fn build(self) -> Result<PanelConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
