use std::time::Duration;
use thiserror::Error;

/// Result alias for probe strategies.
pub type Result<T, E = ProbeError> = std::result::Result<T, E>;

/// Why a single probe did not produce a measurement.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The host name could not be resolved.
    #[error("resolve {host}: {source}")]
    Resolve {
        /// Host that was looked up.
        host: String,
        /// Resolver error.
        source: std::io::Error,
    },
    /// Resolution returned no address.
    #[error("no address for {0}")]
    Unresolved(String),
    /// Socket setup or connect failed.
    #[error("connect: {0}")]
    Connect(#[from] std::io::Error),
    /// No answer within the probe timeout.
    #[error("timed out after {0:?}")]
    Timeout(Duration),
    /// The l7 path answered with a non-success status.
    #[error("http status {0}")]
    HttpStatus(u16),
    /// HTTP transport error.
    #[error("http: {0}")]
    Http(#[from] reqwest::Error),
    /// ICMP socket or echo failure.
    #[error("icmp: {0}")]
    Icmp(String),
    /// The target lacks what the strategy needs.
    #[error("invalid target: {0}")]
    InvalidTarget(String),
    /// The HTTP client was released by `dispose()`.
    #[error("prober disposed")]
    Disposed,
    /// The strategy panicked.
    #[error("probe panicked: {0}")]
    Panicked(String),
}

impl ProbeError {
    /// Build a [`ProbeError::Icmp`].
    pub fn icmp(msg: impl Into<String>) -> Self {
        Self::Icmp(msg.into())
    }

    /// Build a [`ProbeError::InvalidTarget`].
    pub fn invalid_target(msg: impl Into<String>) -> Self {
        Self::InvalidTarget(msg.into())
    }

    /// True for timeouts, whichever layer reported them.
    pub fn is_timeout(&self) -> bool {
        match self {
            ProbeError::Timeout(_) => true,
            ProbeError::Http(e) => e.is_timeout(),
            ProbeError::Connect(e) => e.kind() == std::io::ErrorKind::TimedOut,
            _ => false,
        }
    }
}
