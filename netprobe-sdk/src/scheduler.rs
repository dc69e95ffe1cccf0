//! The background measurement loop.

use chrono::Utc;
use futures::FutureExt;
use netprobe_core::{Registry, Site, SiteStats};
use netprobe_telemetry::{record_cycle, record_probe};
use netprobe_transport::{ProbeError, Prober};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

/// Probes every registered site once per cycle and sleeps `interval`
/// between cycles.
#[derive(Clone)]
pub(crate) struct Scheduler {
    registry: Arc<Registry>,
    prober: Arc<dyn Prober>,
    interval: Duration,
    timeout: Duration,
}

impl Scheduler {
    pub(crate) fn new(
        registry: Arc<Registry>,
        prober: Arc<dyn Prober>,
        interval: Duration,
        timeout: Duration,
    ) -> Self {
        Self { registry, prober, interval, timeout }
    }

    /// Run cycles until `token` is cancelled.
    ///
    /// Cancellation is observed before every cycle, before every probe and
    /// during the inter-cycle sleep. A probe already in flight is not
    /// interrupted; it runs until it completes or hits its timeout.
    pub(crate) async fn run(self, token: CancellationToken) {
        info!(interval = ?self.interval, timeout = ?self.timeout, "probe scheduler running");
        let mut cycles: u64 = 0;
        while !token.is_cancelled() {
            let probed = self.run_cycle(&token).await;
            cycles += 1;
            record_cycle();
            trace!(cycle = cycles, probed, "cycle complete");
            tokio::select! {
                biased;
                _ = token.cancelled() => break,
                _ = tokio::time::sleep(self.interval) => {}
            }
        }
        info!(cycles, "probe scheduler stopped");
    }

    /// One pass over the registry snapshot. Returns the number of probes run.
    async fn run_cycle(&self, token: &CancellationToken) -> usize {
        let mut probed = 0;
        for site in self.registry.snapshot() {
            if token.is_cancelled() {
                break;
            }
            self.test_site(&site).await;
            probed += 1;
        }
        probed
    }

    /// Probe `site` once and record the outcome on it.
    pub(crate) async fn test_site(&self, site: &Site) -> Arc<SiteStats> {
        let started_at = Utc::now();
        let kind = site.probe_kind();
        match self.measure(site).await {
            Ok(elapsed) => {
                record_probe(kind.as_str(), true);
                let stats = site.record_success(elapsed, started_at);
                debug!(
                    site = %site,
                    elapsed_ms = stats.last_elapsed_ms,
                    average = stats.average,
                    std_dev = stats.std_dev,
                    "round trip"
                );
                stats
            }
            Err(e) => {
                record_probe(kind.as_str(), false);
                warn!(site = %site, error = %e, "probe failed");
                site.record_failure()
            }
        }
    }

    // Every failure mode, panics and timeouts included, ends up as Err here.
    async fn measure(&self, site: &Site) -> Result<Duration, ProbeError> {
        let probe = AssertUnwindSafe(self.prober.probe(site)).catch_unwind();
        match tokio::time::timeout(self.timeout, probe).await {
            Ok(Ok(result)) => result,
            Ok(Err(panic)) => Err(ProbeError::Panicked(panic_message(panic.as_ref()))),
            Err(_) => Err(ProbeError::Timeout(self.timeout)),
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
