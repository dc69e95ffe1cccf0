//! HTTP-layer round trip for l7 targets.
use crate::{ProbeError, Result};
use std::time::{Duration, Instant};

/// Build the pooled client shared by all l7 probes.
///
/// Proxies from the environment are ignored so the measurement reflects the
/// path to the target itself.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout)
        .no_proxy()
        .build()?;
    Ok(client)
}

/// GET `url` and time it until the body has been read.
///
/// Only a 2xx status counts as a measurement.
pub async fn round_trip(client: &reqwest::Client, url: &str) -> Result<Duration> {
    let start = Instant::now();
    let response = client.get(url).send().await?;
    let status = response.status();
    // drain the body so the connection can go back to the pool
    response.bytes().await?;
    let elapsed = start.elapsed();
    if status.is_success() {
        Ok(elapsed)
    } else {
        Err(ProbeError::HttpStatus(status.as_u16()))
    }
}
