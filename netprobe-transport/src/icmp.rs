//! ICMP echo probe.
//!
//! Uses an unprivileged datagram ICMP socket where the platform allows it
//! (on Linux this depends on `net.ipv4.ping_group_range`). Without socket
//! permission every ping fails and is recorded as a failed probe.

use crate::{ProbeError, Result};
use std::net::IpAddr;
use std::time::Duration;
use surge_ping::{Client, Config, PingIdentifier, PingSequence, SurgeError, ICMP};

const PAYLOAD: [u8; 16] = *b"netprobe-latency";

/// Send one echo request to `addr` and return the reported round trip.
pub async fn echo(addr: IpAddr, timeout: Duration) -> Result<Duration> {
    let config = match addr {
        IpAddr::V4(_) => Config::default(),
        IpAddr::V6(_) => Config::builder().kind(ICMP::V6).build(),
    };
    let client =
        Client::new(&config).map_err(|e| ProbeError::icmp(format!("open socket: {e}")))?;
    let mut pinger = client.pinger(addr, PingIdentifier(rand::random())).await;
    pinger.timeout(timeout);
    match pinger.ping(PingSequence(0), &PAYLOAD).await {
        Ok((_packet, rtt)) => Ok(rtt),
        Err(SurgeError::Timeout { .. }) => Err(ProbeError::Timeout(timeout)),
        Err(e) => Err(ProbeError::icmp(e.to_string())),
    }
}
