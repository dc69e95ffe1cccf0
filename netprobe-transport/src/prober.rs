//! Strategy dispatch.
use crate::resolve::{resolve_host_port, resolve_ip};
use crate::tcp::{self, Binding};
use crate::{http, icmp, ProbeError, Result};
use async_trait::async_trait;
use netprobe_core::{ProbeKind, Site};
use parking_lot::RwLock;
use std::time::Duration;
use tracing::debug;

/// Measures one round trip to a site.
#[async_trait]
pub trait Prober: Send + Sync {
    /// Run the strategy for `site` once.
    async fn probe(&self, site: &Site) -> Result<Duration>;

    /// Release pooled resources. Later probes may fail.
    fn dispose(&self) {}
}

/// Prober selecting ICMP, TCP or HTTP from the site's test type and l7 path.
#[derive(Debug)]
pub struct StrategyProber {
    timeout: Duration,
    http: RwLock<Option<reqwest::Client>>,
}

impl StrategyProber {
    /// Prober whose strategies each give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        Ok(Self {
            timeout,
            http: RwLock::new(Some(http::build_client(timeout)?)),
        })
    }

    /// Per-strategy timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// True once the HTTP client has been released.
    pub fn is_disposed(&self) -> bool {
        self.http.read().is_none()
    }

    async fn probe_icmp(&self, site: &Site) -> Result<Duration> {
        let ip = resolve_ip(site.host()).await?;
        icmp::echo(ip, self.timeout).await
    }

    async fn probe_tcp(&self, site: &Site) -> Result<Duration> {
        let target = site.target();
        let port = target
            .port
            .ok_or_else(|| ProbeError::invalid_target(format!("{site} has no port")))?;
        let addr = resolve_host_port(&target.host, port).await?;
        let binding = Binding {
            local_addr: target.local_addr,
            interface: target.interface.as_deref(),
        };
        tcp::connect_and_disconnect(addr, &binding, self.timeout).await
    }

    async fn probe_http(&self, site: &Site) -> Result<Duration> {
        let path = site
            .l7_path()
            .ok_or_else(|| ProbeError::invalid_target(format!("{site} has no l7 path")))?;
        // clone out of the lock; reqwest clients share one pool
        let client = self.http.read().clone().ok_or(ProbeError::Disposed)?;
        http::round_trip(&client, path).await
    }
}

#[async_trait]
impl Prober for StrategyProber {
    async fn probe(&self, site: &Site) -> Result<Duration> {
        match site.probe_kind() {
            ProbeKind::Icmp => self.probe_icmp(site).await,
            ProbeKind::Tcp => self.probe_tcp(site).await,
            ProbeKind::Http => self.probe_http(site).await,
        }
    }

    fn dispose(&self) {
        if self.http.write().take().is_some() {
            debug!("released pooled http client");
        }
    }
}
