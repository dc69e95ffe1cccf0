#![forbid(unsafe_code)]

//! Ambient observability for netprobe: `tracing` subscriber setup and a
//! process-wide Prometheus registry with probe counters.

pub mod metrics;

pub use metrics::{dump_prometheus, record_counter, record_cycle, record_probe};

use tracing::info;
use tracing_subscriber::EnvFilter;

/// Telemetry setup failure.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The log filter directive could not be parsed.
    #[error("telemetry init failed: {0}")]
    Init(String),
}

/// Result alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Logging settings.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Filter directive used when `RUST_LOG` is not set, e.g. `info` or
    /// `netprobe_sdk=debug`.
    pub log_level: String,
    /// Colour output.
    pub ansi: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self { log_level: "info".into(), ansi: true }
    }
}

impl TelemetryConfig {
    /// Coloured output filtered at `level`.
    pub fn from_level(level: impl Into<String>) -> Self {
        Self { log_level: level.into(), ..Default::default() }
    }
}

/// Filter from `rust_log` when it parses, otherwise from the configured level.
pub fn build_filter(cfg: &TelemetryConfig, rust_log: Option<&str>) -> Result<EnvFilter> {
    if let Some(directives) = rust_log {
        if let Ok(f) = EnvFilter::try_new(directives) {
            return Ok(f);
        }
    }
    EnvFilter::try_new(&cfg.log_level).map_err(|e| Error::Init(e.to_string()))
}

/// Install a fmt subscriber. `RUST_LOG` wins over the configured level.
///
/// Returns `Ok(false)` if a global subscriber was already installed.
pub fn init_tracing(cfg: &TelemetryConfig) -> Result<bool> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(cfg, rust_log.as_deref())?;
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(cfg.ansi)
        .with_target(true)
        .try_init()
        .is_ok();
    if installed {
        info!(level = %cfg.log_level, "tracing initialized");
    }
    Ok(installed)
}
