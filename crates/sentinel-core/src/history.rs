// Bounded rolling transaction history shared by all users.
use std::collections::{HashSet, VecDeque};

use crate::constants::HISTORY_CAP;
use crate::types::Transaction;

/// FIFO ring of the most recent evaluated transactions across all users.
/// Per-user views are filtered out of the shared ring on demand; insertion
/// order is evaluation order.
#[derive(Debug, Default)]
pub struct TransactionHistory {
    entries: VecDeque<Transaction>,
}

impl TransactionHistory {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(HISTORY_CAP),
        }
    }

    /// Append an evaluated transaction, evicting the oldest past the cap.
    pub fn push(&mut self, tx: Transaction) {
        if self.entries.len() >= HISTORY_CAP {
            self.entries.pop_front();
        }
        self.entries.push_back(tx);
    }

    /// All retained transactions for `user_id`, oldest first.
    pub fn for_user<'a>(&'a self, user_id: &str) -> Vec<&'a Transaction> {
        self.entries
            .iter()
            .filter(|tx| tx.user_id == user_id)
            .collect()
    }

    /// Distinct device ids used by `user_id` strictly after `cutoff_ms`.
    pub fn devices_since(&self, user_id: &str, cutoff_ms: i64) -> HashSet<String> {
        self.entries
            .iter()
            .filter(|tx| tx.user_id == user_id && tx.timestamp > cutoff_ms)
            .map(|tx| tx.device_id.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
