use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel stored as the last elapsed time when the latest probe failed
/// (or before the first probe ran).
pub const FAILED_ELAPSED_MS: f64 = -1.0;

/// Rolling window size used when a target does not ask for one.
pub const DEFAULT_NUM_SAMPLES: usize = 5;

/// Identifier handed out by the registry when a target is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SiteId(pub u64);

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "site-{}", self.0)
    }
}

/// How a target is measured.
///
/// `Ping` is an ICMP echo; `Connect` sets up a connection and tears it down
/// immediately (raw TCP, or an HTTP GET when the target carries an l7 path).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TestType {
    /// ICMP echo request.
    Ping,
    /// TCP connect/disconnect, or HTTP round trip when an l7 path is set.
    #[default]
    Connect,
}

/// Concrete probe strategy selected from a target's test type and l7 path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeKind {
    /// ICMP echo to `host`.
    Icmp,
    /// TCP connect/disconnect to `host:port`.
    Tcp,
    /// HTTP GET on the l7 path.
    Http,
}

impl ProbeKind {
    /// Select the strategy for a test type.
    pub fn select(test_type: TestType, has_l7_path: bool) -> Self {
        match (test_type, has_l7_path) {
            (TestType::Ping, _) => ProbeKind::Icmp,
            (TestType::Connect, false) => ProbeKind::Tcp,
            (TestType::Connect, true) => ProbeKind::Http,
        }
    }

    /// Short label used in logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeKind::Icmp => "icmp",
            ProbeKind::Tcp => "tcp",
            ProbeKind::Http => "http",
        }
    }
}

impl fmt::Display for ProbeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
