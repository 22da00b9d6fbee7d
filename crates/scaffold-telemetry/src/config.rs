//! Telemetry configuration from environment variables.

use std::env;

/// Configuration for log output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Service name attached to every event
    pub service_name: String,

    /// Log level filter (trace, debug, info, warn, error) or a full
    /// `EnvFilter` directive such as `scaffold_ids=debug`
    pub log_level: String,

    /// Whether to emit JSON formatted logs
    pub json_logs: bool,

    /// Whether to include the event target (module path)
    pub with_target: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "scafid".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
            with_target: false,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SCAFID_SERVICE_NAME`: Service name (default: scafid)
    /// - `SCAFID_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `SCAFID_JSON_LOGS`: Enable JSON logs (default: false)
    /// - `SCAFID_LOG_TARGET`: Include module path in events (default: false)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            service_name: lookup("SCAFID_SERVICE_NAME").unwrap_or(defaults.service_name),
            log_level: lookup("SCAFID_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or(defaults.log_level),
            json_logs: lookup("SCAFID_JSON_LOGS")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.json_logs),
            with_target: lookup("SCAFID_LOG_TARGET")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.with_target),
        }
    }

    /// Override the level, e.g. from a `--verbose` flag.
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }
}

fn parse_flag(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value == "1"
}
