//! scafid: stable, collision-aware scaffold identifiers

use clap::Parser;

use scafid::{run, Cli};
use scaffold_telemetry::{init_telemetry, TelemetryConfig};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut telemetry = TelemetryConfig::from_env();
    if let Some(level) = &cli.log_level {
        telemetry = telemetry.with_log_level(level.as_str());
    }
    init_telemetry(&telemetry)?;

    run(cli.command)
}
