// Rolling processing-time monitor.
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::constants::{LATENCY_WINDOW, MAX_LATENCY_MS};

/// Snapshot of the latency window for monitoring surfaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatencyStats {
    pub average_ms: f64,
    pub breach: bool,
    pub history: Vec<f64>,
}

/// Bounded queue of the most recent per-transaction processing times. The
/// 200 ms budget is observed, not enforced: a breach is a signal on the
/// result, never an interrupt.
#[derive(Debug, Default)]
pub struct LatencyMonitor {
    samples: VecDeque<f64>,
}

impl LatencyMonitor {
    pub fn new() -> Self {
        Self {
            samples: VecDeque::with_capacity(LATENCY_WINDOW),
        }
    }

    /// Record one processing-time sample, evicting the oldest past capacity.
    pub fn record(&mut self, ms: f64) {
        if self.samples.len() >= LATENCY_WINDOW {
            self.samples.pop_front();
        }
        self.samples.push_back(ms);
    }

    /// Arithmetic mean of the retained samples, 0 when empty.
    pub fn average(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().sum::<f64>() / self.samples.len() as f64
    }

    pub fn is_breach(&self) -> bool {
        self.average() > MAX_LATENCY_MS
    }

    pub fn stats(&self) -> LatencyStats {
        LatencyStats {
            average_ms: self.average(),
            breach: self.is_breach(),
            history: self.samples.iter().copied().collect(),
        }
    }
}
