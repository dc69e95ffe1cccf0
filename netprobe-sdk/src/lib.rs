#![forbid(unsafe_code)]

//! Netprobe SDK: application-facing latency sampling
//!
//! - Error/Result types (`netprobe_sdk::Error` / `netprobe_sdk::Result<T>`)
//! - [`NetTest`]: target registration, start/stop/dispose of the background
//!   probe loop, batch measurement and ranked results
//! - [`init_logging`]: tracing subscriber at the configured log level
//! - Re-exports of the core types callers need to describe targets and read
//!   statistics
//!
//! ```no_run
//! use netprobe_sdk::{NetTest, ProbeConfig, Target};
//!
//! # async fn demo() -> netprobe_sdk::Result<()> {
//! let config = ProbeConfig::default();
//! netprobe_sdk::init_logging(&config)?;
//! let net_test = NetTest::new(config)?;
//! let site = net_test.add_site(Target::connect("edge.example.com", 443))?;
//! net_test.start()?;
//! // ... later, from any task
//! println!("avg {} ms, stddev {}", site.average(), site.std_dev());
//! net_test.stop().await;
//! net_test.dispose();
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod logging;
mod scheduler;

pub use error::{Error, Result};
pub use logging::{init_logging, telemetry_config};
pub use net_test::NetTest;

pub use netprobe_core::{
    EdgeEventsConfig, ProbeConfig, ProbeKind, Registry, Sample, Site, SiteId, SiteStats, Target,
    TestType, DEFAULT_NUM_SAMPLES, FAILED_ELAPSED_MS,
};
pub use netprobe_transport::{ProbeError, Prober, StrategyProber};
