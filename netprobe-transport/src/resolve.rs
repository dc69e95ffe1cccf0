//! Host resolution for probe targets.
use crate::{ProbeError, Result};
use std::net::{IpAddr, SocketAddr};

/// Resolve `host:port`, skipping DNS for IP literals.
pub async fn resolve_host_port(host: &str, port: u16) -> Result<SocketAddr> {
    if let Ok(ip) = host.parse::<IpAddr>() {
        return Ok(SocketAddr::from((ip, port)));
    }
    let mut iter = tokio::net::lookup_host((host, port))
        .await
        .map_err(|source| ProbeError::Resolve {
            host: host.to_string(),
            source,
        })?;
    iter.next()
        .ok_or_else(|| ProbeError::Unresolved(host.to_string()))
}

/// Resolve a host to an IP address (ICMP needs no port).
pub async fn resolve_ip(host: &str) -> Result<IpAddr> {
    resolve_host_port(host, 0).await.map(|a| a.ip())
}
