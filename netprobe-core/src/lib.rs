#![forbid(unsafe_code)]

//! netprobe-core: building blocks of the latency probing engine.
//!
//! - Error/Result types (`netprobe_core::Error` / `netprobe_core::Result<T>`)
//! - Probe and edge-events configuration (TOML file, environment, defaults)
//! - Fixed-capacity rolling sample buffer with mean / bias-corrected deviation
//! - Probe targets (`Site`) publishing an immutable statistics snapshot
//! - Concurrency-safe, insertion-ordered target registry and site ranking
//!
//! Nothing in here touches the network; strategies live in `netprobe-transport`
//! and the scheduling loop in `netprobe-sdk`.

pub mod buffer;
pub mod config;
pub mod error;
pub mod ranking;
pub mod registry;
pub mod site;
pub mod types;

pub use buffer::{Sample, SampleBuffer, Stats};
pub use config::{EdgeEventsConfig, ProbeConfig};
pub use error::{Error, Result};
pub use ranking::{compare_stats, sort_sites};
pub use registry::Registry;
pub use site::{Site, SiteStats, Target};
pub use types::{ProbeKind, SiteId, TestType, DEFAULT_NUM_SAMPLES, FAILED_ELAPSED_MS};
