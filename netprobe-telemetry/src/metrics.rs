//! Probe metrics and Prometheus exposition.

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};
use std::collections::HashMap;

pub(crate) static REGISTRY: Lazy<Registry> = Lazy::new(Registry::new);
static COUNTERS: Lazy<Mutex<HashMap<String, IntCounter>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

static PROBES: Lazy<Option<IntCounterVec>> = Lazy::new(|| {
    let opts = Opts::new("netprobe_probes_total", "Probe attempts by strategy and outcome");
    let vec = IntCounterVec::new(opts, &["strategy", "outcome"]).ok()?;
    let _ = REGISTRY.register(Box::new(vec.clone()));
    Some(vec)
});

/// Name of the scheduler cycle counter.
pub const CYCLES_TOTAL: &str = "netprobe_cycles_total";

/// Record into an IntCounter, creating and registering it on first use.
/// Invalid metric names are ignored.
pub fn record_counter(name: &str, v: u64) {
    let mut map = COUNTERS.lock();
    if let Some(ctr) = map.get(name) {
        ctr.inc_by(v);
        return;
    }
    let Ok(ctr) = IntCounter::new(name, format!("counter {name}")) else {
        return;
    };
    // already registered under the same name is fine
    let _ = REGISTRY.register(Box::new(ctr.clone()));
    ctr.inc_by(v);
    map.insert(name.to_string(), ctr);
}

/// Count one probe of `strategy` (`icmp`, `tcp`, `http`).
pub fn record_probe(strategy: &str, success: bool) {
    if let Some(probes) = PROBES.as_ref() {
        let outcome = if success { "success" } else { "failure" };
        probes.with_label_values(&[strategy, outcome]).inc();
    }
}

/// Count one completed scheduler cycle.
pub fn record_cycle() {
    record_counter(CYCLES_TOTAL, 1);
}

/// Dump metrics in Prometheus text exposition format.
pub fn dump_prometheus() -> String {
    let mf = REGISTRY.gather();
    let enc = TextEncoder::new();
    let mut buf = Vec::new();
    if enc.encode(&mf, &mut buf).is_ok() {
        String::from_utf8(buf).unwrap_or_default()
    } else {
        String::new()
    }
}
