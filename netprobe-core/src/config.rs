use crate::error::{Error, Result};
use crate::site::SiteStats;
use crate::types::{TestType, DEFAULT_NUM_SAMPLES};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use std::{fs, path::Path};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Settings of the probing engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProbeConfig {
    /// Sleep between cycles, also the bound `stop()` waits for the worker.
    pub interval_ms: u64,
    /// Per-probe timeout.
    pub timeout_ms: u64,
    /// Rolling window size for targets that do not set one.
    pub default_samples: usize,
    /// Log level for `netprobe_sdk::init_logging` when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            interval_ms: 5_000,
            timeout_ms: 5_000,
            default_samples: DEFAULT_NUM_SAMPLES,
            log_level: "info".into(),
        }
    }
}

impl ProbeConfig {
    /// Inter-cycle sleep.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Per-probe timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load and validate a TOML file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        Self::from_toml_str(&data)
    }

    /// Parse TOML, filling missing fields with defaults. Empty input yields
    /// the default config.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        if input.trim().is_empty() {
            return Ok(Self::default());
        }
        let cfg: Self = toml::from_str(input)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Defaults overridden by `NETPROBE_*` environment variables.
    pub fn from_env() -> Result<Self> {
        let mut cfg = Self::default();
        if let Some(v) = env_parse::<u64>("NETPROBE_INTERVAL_MS")? {
            cfg.interval_ms = v;
        }
        if let Some(v) = env_parse::<u64>("NETPROBE_TIMEOUT_MS")? {
            cfg.timeout_ms = v;
        }
        if let Some(v) = env_parse::<usize>("NETPROBE_DEFAULT_SAMPLES")? {
            cfg.default_samples = v;
        }
        if let Ok(v) = std::env::var("NETPROBE_LOG_LEVEL") {
            cfg.log_level = v;
        }
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values the scheduler cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.interval_ms == 0 {
            return Err(Error::config("interval_ms must be greater than zero"));
        }
        if self.timeout_ms == 0 {
            return Err(Error::config("timeout_ms must be greater than zero"));
        }
        if self.default_samples == 0 {
            return Err(Error::config("default_samples must be greater than zero"));
        }
        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(Error::config(format!("invalid log_level: {}", self.log_level)));
        }
        Ok(())
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Result<Option<T>>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(v) => v
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| Error::config(format!("{key}={v}: {e}"))),
        Err(_) => Ok(None),
    }
}

/// Policy owned by the edge-events layer.
///
/// The engine never reads the threshold itself; it only produces
/// statistics. [`EdgeEventsConfig::exceeds_threshold`] is a convenience for
/// the decision layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EdgeEventsConfig {
    /// Internal application port used for latency tests; 0 means ping only.
    pub latency_internal_port: u16,
    /// Test type used for the serving endpoint.
    pub latency_test_type: TestType,
    /// Average latency in milliseconds above which a reselection is wanted.
    pub latency_threshold_ms: f64,
    /// How often the external layer reports latency.
    pub latency_update_interval_secs: u64,
}

impl Default for EdgeEventsConfig {
    fn default() -> Self {
        Self {
            latency_internal_port: 0,
            latency_test_type: TestType::Connect,
            latency_threshold_ms: 50.0,
            latency_update_interval_secs: 30,
        }
    }
}

impl EdgeEventsConfig {
    /// Parse TOML, filling missing fields with defaults.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        if input.trim().is_empty() {
            return Ok(Self::default());
        }
        let cfg: Self = toml::from_str(input)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject a negative or non-finite threshold.
    pub fn validate(&self) -> Result<()> {
        if !self.latency_threshold_ms.is_finite() || self.latency_threshold_ms < 0.0 {
            return Err(Error::config(format!(
                "latency_threshold_ms must be a non-negative number, got {}",
                self.latency_threshold_ms
            )));
        }
        Ok(())
    }

    /// True if `stats` has samples and their average is above the threshold.
    pub fn exceeds_threshold(&self, stats: &SiteStats) -> bool {
        stats.has_samples() && stats.average > self.latency_threshold_ms
    }
}
