// Coordinated-attack detection over a short global window.
use std::collections::{HashSet, VecDeque};

use crate::constants::{COORD_AMOUNT_VARIANCE, COORD_EVENT_CAP, COORD_MIN_USERS, COORD_WINDOW_MS};
use crate::types::Transaction;

/// One observed transaction in the coordination window.
#[derive(Debug, Clone)]
struct CoordEvent {
    user_id: String,
    merchant_category: String,
    amount: u64,
    timestamp: i64,
}

/// Global short-window detector for mule-network style bursts: many distinct
/// users hitting the same merchant category for near-identical amounts.
///
/// Events are insertion-ordered and pruned against the window on every
/// `record`; `detect` re-filters against the window so stale events can
/// never contribute to a cluster.
#[derive(Debug, Default)]
pub struct CoordinatedAttackDetector {
    events: VecDeque<CoordEvent>,
}

impl CoordinatedAttackDetector {
    pub fn new() -> Self {
        Self {
            events: VecDeque::new(),
        }
    }

    /// Record a transaction, pruning events older than the window first and
    /// evicting the oldest past the hard cap.
    pub fn record(&mut self, tx: &Transaction) {
        let cutoff = tx.timestamp - COORD_WINDOW_MS;
        self.events.retain(|event| event.timestamp >= cutoff);
        self.events.push_back(CoordEvent {
            user_id: tx.user_id.clone(),
            merchant_category: tx.category().to_string(),
            amount: tx.amount,
            timestamp: tx.timestamp,
        });
        while self.events.len() > COORD_EVENT_CAP {
            self.events.pop_front();
        }
    }

    /// True iff at least `COORD_MIN_USERS` distinct users transacted within
    /// the window against the same merchant category for amounts within
    /// ±5% of `tx.amount` (inclusive bounds). The current transaction is
    /// expected to have been recorded already and counts toward the cluster.
    pub fn detect(&self, tx: &Transaction) -> bool {
        let cutoff = tx.timestamp - COORD_WINDOW_MS;
        let low = tx.amount as f64 * (1.0 - COORD_AMOUNT_VARIANCE);
        let high = tx.amount as f64 * (1.0 + COORD_AMOUNT_VARIANCE);
        let category = tx.category();

        let cluster_users: HashSet<&str> = self
            .events
            .iter()
            .filter(|event| {
                event.timestamp >= cutoff
                    && event.merchant_category == category
                    && (event.amount as f64) >= low
                    && (event.amount as f64) <= high
            })
            .map(|event| event.user_id.as_str())
            .collect();

        let coordinated = cluster_users.len() >= COORD_MIN_USERS;
        if coordinated {
            tracing::warn!(
                merchant_category = %category,
                amount = tx.amount,
                distinct_users = cluster_users.len(),
                "coordinated transaction cluster detected"
            );
        }
        coordinated
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
