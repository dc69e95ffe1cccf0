//! Logging setup driven by [`ProbeConfig::log_level`].

use crate::Result;
use netprobe_core::ProbeConfig;
use netprobe_telemetry::TelemetryConfig;

/// Telemetry settings for `config`.
pub fn telemetry_config(config: &ProbeConfig) -> TelemetryConfig {
    TelemetryConfig::from_level(config.log_level.clone())
}

/// Install the process-wide subscriber at the configured level.
///
/// `RUST_LOG` still takes precedence. Returns `Ok(false)` if a subscriber was
/// already installed.
pub fn init_logging(config: &ProbeConfig) -> Result<bool> {
    Ok(netprobe_telemetry::init_tracing(&telemetry_config(config))?)
}
