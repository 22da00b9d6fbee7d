//! # Scaffold Telemetry
//!
//! Logging setup shared by the scaffold identity binaries.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use scaffold_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     init_telemetry(&TelemetryConfig::from_env())?;
//!     // Events from scaffold_ids and the binary are now emitted
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SCAFID_SERVICE_NAME` | `scafid` | Service name in events |
//! | `SCAFID_LOG_LEVEL` | `info` | Log level filter (falls back to `RUST_LOG`) |
//! | `SCAFID_JSON_LOGS` | `false` | JSON output |
//! | `SCAFID_LOG_TARGET` | `false` | Include module path |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::{build_filter, init_logging};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize logging: {0}")]
    Init(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize logging for a binary.
///
/// Call once, before any work is done.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    init_logging(config)
}
