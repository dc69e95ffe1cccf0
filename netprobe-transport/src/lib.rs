//! Probe strategies for the netprobe engine.
//!
//! Every strategy measures one round trip and returns the elapsed time or a
//! [`ProbeError`]:
//! - ICMP echo (`icmp`), no port needed
//! - TCP connect/disconnect (`tcp`), optionally bound to a local address or interface
//! - HTTP GET round trip (`http`) for load-balanced l7 paths
//!
//! [`StrategyProber`] picks the strategy from a site's test type and l7 path.
//! Turning a failure into the `-1` sentinel is left to the scheduler.

#![forbid(unsafe_code)]

pub mod error;
pub mod http;
pub mod icmp;
pub mod prober;
pub mod resolve;
pub mod tcp;

pub use error::{ProbeError, Result};
pub use prober::{Prober, StrategyProber};
