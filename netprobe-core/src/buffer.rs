//! Fixed-capacity rolling window of successful latency measurements.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

/// One successful measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Round trip in milliseconds.
    pub value_ms: f64,
    /// Wall-clock time the probe was started.
    pub timestamp: DateTime<Utc>,
}

/// Mean and bias-corrected standard deviation of the samples in a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Stats {
    /// Number of samples the statistics were computed from.
    pub count: usize,
    /// Arithmetic mean, 0 when `count == 0`.
    pub average: f64,
    /// Sample standard deviation with an (n - 1) denominator, 0 when `count <= 1`.
    pub std_dev: f64,
}

/// Ring buffer of the most recent `capacity` samples.
///
/// Once full, every insert overwrites the oldest sample. The capacity is
/// fixed at construction.
#[derive(Debug, Clone)]
pub struct SampleBuffer {
    samples: Vec<Sample>,
    capacity: NonZeroUsize,
    // slot the next sample is written to once the buffer is full
    next: usize,
}

impl SampleBuffer {
    /// Create an empty buffer holding at most `capacity` samples.
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity.get()),
            capacity,
            next: 0,
        }
    }

    /// Maximum number of samples held.
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Number of samples currently held.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True if no sample has been added yet.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Insert a measurement, dropping the oldest one when full.
    pub fn add_sample(&mut self, value_ms: f64, timestamp: DateTime<Utc>) {
        let sample = Sample { value_ms, timestamp };
        if self.samples.len() < self.capacity.get() {
            self.samples.push(sample);
        } else {
            self.samples[self.next] = sample;
        }
        self.next = (self.next + 1) % self.capacity.get();
    }

    /// Samples in insertion order, oldest first.
    pub fn samples(&self) -> Vec<Sample> {
        if self.samples.len() < self.capacity.get() {
            return self.samples.clone();
        }
        let (newer, older) = self.samples.split_at(self.next);
        older.iter().chain(newer.iter()).copied().collect()
    }

    /// Recompute mean and standard deviation from exactly the held samples.
    pub fn recompute(&self) -> Stats {
        let count = self.samples.len();
        if count == 0 {
            return Stats::default();
        }
        let n = count as f64;
        let average = self.samples.iter().map(|s| s.value_ms).sum::<f64>() / n;
        let mut vsum: f64 = self
            .samples
            .iter()
            .map(|s| {
                let d = s.value_ms - average;
                d * d
            })
            .sum();
        if count > 1 {
            vsum /= n - 1.0;
        }
        Stats {
            count,
            average,
            std_dev: vsum.sqrt(),
        }
    }
}
