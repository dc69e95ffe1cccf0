#![allow(dead_code)]

use async_trait::async_trait;
use netprobe_sdk::{ProbeConfig, ProbeError, Prober, Site};
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Scripted outcome of one probe.
#[derive(Debug, Clone, Copy)]
pub enum Step {
    Ok(u64),
    Fail,
    Panic,
}

/// Prober returning scripted results per host, recording every call.
pub struct MockProber {
    delay: Duration,
    default_ms: u64,
    script: Mutex<HashMap<String, VecDeque<Step>>>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    log: Mutex<Vec<String>>,
    disposed: AtomicUsize,
}

impl MockProber {
    pub fn new(delay: Duration, default_ms: u64) -> Self {
        Self {
            delay,
            default_ms,
            script: Mutex::new(HashMap::new()),
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            log: Mutex::new(Vec::new()),
            disposed: AtomicUsize::new(0),
        }
    }

    pub fn script(&self, host: &str, steps: impl IntoIterator<Item = Step>) {
        self.script
            .lock()
            .entry(host.to_string())
            .or_default()
            .extend(steps);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn log(&self) -> Vec<String> {
        self.log.lock().clone()
    }

    pub fn disposed(&self) -> usize {
        self.disposed.load(Ordering::SeqCst)
    }
}

struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl Prober for MockProber {
    async fn probe(&self, site: &Site) -> Result<Duration, ProbeError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        let _guard = InFlight(&self.in_flight);
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.log.lock().push(site.host().to_string());

        let step = self
            .script
            .lock()
            .get_mut(site.host())
            .and_then(|q| q.pop_front())
            .unwrap_or(Step::Ok(self.default_ms));
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match step {
            Step::Ok(ms) => Ok(Duration::from_millis(ms)),
            Step::Fail => Err(ProbeError::Connect(std::io::ErrorKind::ConnectionRefused.into())),
            Step::Panic => panic!("scripted probe panic"),
        }
    }

    fn dispose(&self) {
        self.disposed.fetch_add(1, Ordering::SeqCst);
    }
}

pub fn fast_config(interval_ms: u64) -> ProbeConfig {
    ProbeConfig {
        interval_ms,
        timeout_ms: 1_000,
        default_samples: 5,
        log_level: "debug".into(),
    }
}

pub fn init_logging() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Poll `cond` every few milliseconds until it holds or `within` elapses.
pub async fn wait_until(within: Duration, mut cond: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + within;
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    cond()
}
