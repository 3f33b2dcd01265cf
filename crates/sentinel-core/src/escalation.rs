// Per-user progressive escalation bookkeeping.
use std::collections::HashMap;

use crate::constants::{ESC_MIN_STEPUPS, ESC_RISK_THRESH, ESC_WINDOW_MS};

/// Tracks step-up challenges per user so that repeated challenges within a
/// short window escalate to a forced block instead of yet another OTP.
#[derive(Debug, Default)]
pub struct EscalationTracker {
    step_ups: HashMap<String, Vec<i64>>,
}

impl EscalationTracker {
    pub fn new() -> Self {
        Self {
            step_ups: HashMap::new(),
        }
    }

    /// Record a STEP_UP decision at `timestamp_ms`, pruning entries older
    /// than the escalation window first.
    pub fn record_step_up(&mut self, user_id: &str, timestamp_ms: i64) {
        let cutoff = timestamp_ms - ESC_WINDOW_MS;
        let entries = self.step_ups.entry(user_id.to_string()).or_default();
        entries.retain(|&ts| ts > cutoff);
        entries.push(timestamp_ms);
        tracing::debug!(
            user_id = %user_id,
            step_ups_in_window = entries.len(),
            "step-up recorded"
        );
    }

    /// A BLOCK resolves the escalation; the user's window is cleared.
    pub fn record_block(&mut self, user_id: &str) {
        self.step_ups.remove(user_id);
    }

    /// True iff the user accumulated at least `ESC_MIN_STEPUPS` step-ups in
    /// the window ending at `timestamp_ms` and the candidate score is at or
    /// above the escalation threshold.
    pub fn should_force_block(&self, user_id: &str, score: u32, timestamp_ms: i64) -> bool {
        if score < ESC_RISK_THRESH {
            return false;
        }
        let cutoff = timestamp_ms - ESC_WINDOW_MS;
        self.step_ups
            .get(user_id)
            .map(|entries| entries.iter().filter(|&&ts| ts > cutoff).count())
            .unwrap_or(0)
            >= ESC_MIN_STEPUPS
    }
}
