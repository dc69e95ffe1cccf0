//! Probe targets and their published statistics.

use crate::buffer::{Sample, SampleBuffer};
use crate::error::{Error, Result};
use crate::types::{ProbeKind, SiteId, TestType, DEFAULT_NUM_SAMPLES, FAILED_ELAPSED_MS};
use arc_swap::ArcSwap;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::SocketAddr;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

/// Description of a destination to measure, as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Target {
    /// Host name or IP literal. Required for ping and TCP probes.
    #[serde(default)]
    pub host: String,
    /// Port for TCP probes.
    #[serde(default)]
    pub port: Option<u16>,
    /// URL probed with an HTTP GET instead of a raw TCP connect
    /// (load-balanced destinations only reachable through a path).
    #[serde(default)]
    pub l7_path: Option<String>,
    /// Measurement procedure.
    #[serde(default)]
    pub test_type: TestType,
    /// Rolling window size; the registry default applies when unset.
    #[serde(default)]
    pub samples: Option<usize>,
    /// Local address the TCP probe binds to before connecting.
    #[serde(default)]
    pub local_addr: Option<SocketAddr>,
    /// Network interface the TCP probe is bound to (Linux/Android).
    #[serde(default)]
    pub interface: Option<String>,
}

impl Target {
    /// TCP connect/disconnect target.
    pub fn connect(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port: Some(port),
            test_type: TestType::Connect,
            ..Default::default()
        }
    }

    /// ICMP echo target.
    pub fn ping(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            test_type: TestType::Ping,
            ..Default::default()
        }
    }

    /// HTTP round-trip target. The host is taken from the URL when it parses.
    pub fn l7(path: impl Into<String>) -> Self {
        let path = path.into();
        let host = url::Url::parse(&path)
            .ok()
            .and_then(|u| u.host_str().map(str::to_owned))
            .unwrap_or_default();
        Self {
            host,
            l7_path: Some(path),
            test_type: TestType::Connect,
            ..Default::default()
        }
    }

    /// Set the rolling window size.
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = Some(samples);
        self
    }

    /// Set the port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Bind TCP probes to a local address.
    pub fn with_local_addr(mut self, addr: SocketAddr) -> Self {
        self.local_addr = Some(addr);
        self
    }

    /// Bind TCP probes to a network interface.
    pub fn with_interface(mut self, name: impl Into<String>) -> Self {
        self.interface = Some(name.into());
        self
    }

    /// Strategy this target is measured with.
    pub fn probe_kind(&self) -> ProbeKind {
        ProbeKind::select(self.test_type, self.l7_path.is_some())
    }

    /// Check the fields the selected strategy needs.
    pub fn validate(&self) -> Result<()> {
        if let Some(0) = self.samples {
            return Err(Error::invalid_target("sample window must hold at least one sample"));
        }
        match self.probe_kind() {
            ProbeKind::Icmp => {
                if self.host.trim().is_empty() {
                    return Err(Error::invalid_target("ping target requires a host"));
                }
            }
            ProbeKind::Tcp => {
                if self.host.trim().is_empty() {
                    return Err(Error::invalid_target("connect target requires a host"));
                }
                match self.port {
                    Some(p) if p != 0 => {}
                    _ => {
                        return Err(Error::invalid_target(format!(
                            "connect target {} requires a non-zero port",
                            self.host
                        )))
                    }
                }
            }
            ProbeKind::Http => {
                let path = self.l7_path.as_deref().unwrap_or_default();
                let parsed = url::Url::parse(path)
                    .map_err(|e| Error::invalid_target(format!("l7 path {path:?}: {e}")))?;
                if !matches!(parsed.scheme(), "http" | "https") {
                    return Err(Error::invalid_target(format!(
                        "l7 path {path:?} must be http or https"
                    )));
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.l7_path, self.port) {
            (Some(path), _) if self.test_type == TestType::Connect => f.write_str(path),
            (_, Some(port)) if self.test_type == TestType::Connect => {
                write!(f, "{}:{port}", self.host)
            }
            _ => f.write_str(&self.host),
        }
    }
}

/// Immutable statistics snapshot of one site.
///
/// A new snapshot is published after every probe, so `average`, `std_dev`
/// and `count` always belong to the same buffer state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteStats {
    /// Samples in the rolling window.
    pub count: usize,
    /// Mean of the rolling window in milliseconds.
    pub average: f64,
    /// Bias-corrected standard deviation of the rolling window.
    pub std_dev: f64,
    /// Most recent result, [`FAILED_ELAPSED_MS`] if it failed.
    pub last_elapsed_ms: f64,
    /// Probes attempted, successful or not.
    pub attempts: u64,
    /// When this snapshot was published.
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for SiteStats {
    fn default() -> Self {
        Self {
            count: 0,
            average: 0.0,
            std_dev: 0.0,
            last_elapsed_ms: FAILED_ELAPSED_MS,
            attempts: 0,
            updated_at: None,
        }
    }
}

impl SiteStats {
    /// True once at least one probe succeeded; `average`/`std_dev` are
    /// meaningless before that.
    pub fn has_samples(&self) -> bool {
        self.count > 0
    }

    /// True if the most recent probe failed.
    pub fn last_failed(&self) -> bool {
        self.last_elapsed_ms < 0.0
    }
}

/// A registered probe target with its sample buffer and statistics.
#[derive(Debug)]
pub struct Site {
    id: SiteId,
    target: Target,
    kind: ProbeKind,
    buffer: Mutex<SampleBuffer>,
    stats: ArcSwap<SiteStats>,
}

impl Site {
    /// Validate `target` and build a site with an empty buffer.
    /// `default_samples` applies when the target does not set a window size.
    pub fn new(id: SiteId, target: Target, default_samples: usize) -> Result<Self> {
        target.validate()?;
        let capacity = target.samples.unwrap_or(default_samples);
        let capacity = NonZeroUsize::new(capacity)
            .or(NonZeroUsize::new(DEFAULT_NUM_SAMPLES))
            .ok_or_else(|| Error::invalid_target("sample window must hold at least one sample"))?;
        Ok(Self {
            id,
            kind: target.probe_kind(),
            target,
            buffer: Mutex::new(SampleBuffer::new(capacity)),
            stats: ArcSwap::from_pointee(SiteStats::default()),
        })
    }

    /// Registry id.
    pub fn id(&self) -> SiteId {
        self.id
    }

    /// Target description.
    pub fn target(&self) -> &Target {
        &self.target
    }

    /// Host name or IP literal.
    pub fn host(&self) -> &str {
        &self.target.host
    }

    /// TCP port, if any.
    pub fn port(&self) -> Option<u16> {
        self.target.port
    }

    /// HTTP path, if any.
    pub fn l7_path(&self) -> Option<&str> {
        self.target.l7_path.as_deref()
    }

    /// Test type.
    pub fn test_type(&self) -> TestType {
        self.target.test_type
    }

    /// Strategy used to measure this site.
    pub fn probe_kind(&self) -> ProbeKind {
        self.kind
    }

    /// Rolling window size.
    pub fn capacity(&self) -> usize {
        self.buffer.lock().capacity()
    }

    /// Latest published statistics.
    pub fn stats(&self) -> Arc<SiteStats> {
        self.stats.load_full()
    }

    /// Mean latency of the rolling window.
    pub fn average(&self) -> f64 {
        self.stats.load().average
    }

    /// Standard deviation of the rolling window.
    pub fn std_dev(&self) -> f64 {
        self.stats.load().std_dev
    }

    /// Most recent probe result, -1 if it failed.
    pub fn last_elapsed_ms(&self) -> f64 {
        self.stats.load().last_elapsed_ms
    }

    /// Buffered samples, oldest first.
    pub fn samples(&self) -> Vec<Sample> {
        self.buffer.lock().samples()
    }

    /// Record a successful probe that started at `started_at`.
    ///
    /// Called by the probe scheduler only.
    pub fn record_success(&self, elapsed: Duration, started_at: DateTime<Utc>) -> Arc<SiteStats> {
        let elapsed_ms = elapsed.as_secs_f64() * 1000.0;
        let mut buffer = self.buffer.lock();
        buffer.add_sample(elapsed_ms, started_at);
        let computed = buffer.recompute();
        let attempts = self.stats.load().attempts.saturating_add(1);
        let next = Arc::new(SiteStats {
            count: computed.count,
            average: computed.average,
            std_dev: computed.std_dev,
            last_elapsed_ms: elapsed_ms,
            attempts,
            updated_at: Some(Utc::now()),
        });
        self.stats.store(Arc::clone(&next));
        next
    }

    /// Record a failed probe. The sample buffer is left untouched.
    ///
    /// Called by the probe scheduler only.
    pub fn record_failure(&self) -> Arc<SiteStats> {
        // serialises with record_success so snapshots are published in order
        let _buffer = self.buffer.lock();
        let prev = self.stats.load_full();
        let next = Arc::new(SiteStats {
            last_elapsed_ms: FAILED_ELAPSED_MS,
            attempts: prev.attempts.saturating_add(1),
            updated_at: Some(Utc::now()),
            ..(*prev).clone()
        });
        self.stats.store(Arc::clone(&next));
        next
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.target, self.kind)
    }
}
