//! Telemetry configuration from environment variables.

use std::env;
use std::path::PathBuf;

pub const DEFAULT_LOG_FILE: &str = "panel-tui.log";

/// Configuration for the file logger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Service name attached to the startup record
    pub service_name: String,

    /// Filter directive (trace, debug, info, warn, error or a full `EnvFilter` string)
    pub log_level: String,

    /// Destination file; the terminal belongs to the UI
    pub log_file: PathBuf,

    /// Whether to write JSON records instead of plain lines
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "panel-tui".to_string(),
            log_level: "info".to_string(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            json_logs: false,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `PANEL_LOG_LEVEL` or `RUST_LOG`: filter (default: info)
    /// - `PANEL_LOG_FILE`: log file path (default: panel-tui.log)
    /// - `PANEL_JSON_LOGS`: JSON records (default: false)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`TelemetryConfig::from_env`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            service_name: defaults.service_name,

            log_level: lookup("PANEL_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or(defaults.log_level),

            log_file: lookup("PANEL_LOG_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_file),

            json_logs: lookup("PANEL_JSON_LOGS")
                .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
                .unwrap_or(defaults.json_logs),
        }
    }

    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = path.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = TelemetryConfig::default();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_file, PathBuf::from("panel-tui.log"));
        assert!(!config.json_logs);
    }

    #[test]
    fn test_empty_environment_uses_defaults() {
        assert_eq!(TelemetryConfig::from_lookup(lookup(&[])), TelemetryConfig::default());
    }

    #[test]
    fn test_panel_level_wins_over_rust_log() {
        let config = TelemetryConfig::from_lookup(lookup(&[
            ("RUST_LOG", "warn"),
            ("PANEL_LOG_LEVEL", "debug"),
        ]));
        assert_eq!(config.log_level, "debug");

        let config = TelemetryConfig::from_lookup(lookup(&[("RUST_LOG", "warn")]));
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_json_flag() {
        for (value, expected) in [("true", true), ("TRUE", true), ("1", true), ("no", false)] {
            let config = TelemetryConfig::from_lookup(lookup(&[("PANEL_JSON_LOGS", value)]));
            assert_eq!(config.json_logs, expected, "PANEL_JSON_LOGS={value}");
        }
    }

    #[test]
    fn test_log_file_override() {
        let config = TelemetryConfig::from_lookup(lookup(&[("PANEL_LOG_FILE", "/tmp/p.log")]));
        assert_eq!(config.log_file, PathBuf::from("/tmp/p.log"));
        assert_eq!(
            config.with_log_file("other.log").log_file,
            PathBuf::from("other.log")
        );
    }
}
