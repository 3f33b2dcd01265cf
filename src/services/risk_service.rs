// src/services/risk_service.rs - Scoring pipeline wired to the audit ledger
use std::sync::Mutex;

use sentinel_core::{FinalRiskResult, LatencyStats, SentinelEngine, Transaction, UserProfile};
use sentinel_ledger::{ImmutableLedger, LedgerEntry, LedgerError};

/// Owns the engine and the ledger behind one lock each, preserving the
/// single-writer discipline both require. All scoring traffic for a process
/// flows through one instance of this service.
#[derive(Debug, Default)]
pub struct RiskService {
    engine: Mutex<SentinelEngine>,
    ledger: Mutex<ImmutableLedger>,
}

impl RiskService {
    pub fn new() -> Self {
        Self {
            engine: Mutex::new(SentinelEngine::new()),
            ledger: Mutex::new(ImmutableLedger::new()),
        }
    }

    /// Score a transaction and chain the decision into the audit ledger.
    /// The ledger is verified before every append; a tampered chain refuses
    /// the write and surfaces `ERR_CHAIN_MISMATCH`.
    pub fn evaluate_and_record(
        &self,
        tx: &Transaction,
        profile: &UserProfile,
    ) -> Result<(FinalRiskResult, LedgerEntry), LedgerError> {
        let result = self.engine.lock().unwrap().evaluate(tx, profile);

        metrics::counter!("sentinel_transactions_evaluated_total").increment(1);
        metrics::counter!(
            "sentinel_decisions_total",
            "decision" => result.decision.as_str()
        )
        .increment(1);
        metrics::histogram!("sentinel_risk_score").record(result.final_risk_score as f64);

        let entry = match self.ledger.lock().unwrap().verify_and_append(&result) {
            Ok(entry) => entry,
            Err(e) => {
                metrics::counter!("sentinel_ledger_mismatch_total").increment(1);
                return Err(e);
            }
        };

        Ok((result, entry))
    }

    /// Retained transactions for `user_id`, oldest first.
    pub fn history(&self, user_id: &str) -> Vec<Transaction> {
        self.engine.lock().unwrap().get_history(user_id)
    }

    /// Snapshot of the rolling latency window.
    pub fn latency_stats(&self) -> LatencyStats {
        self.engine.lock().unwrap().latency_stats()
    }

    /// Immutable snapshot of the audit chain, genesis first.
    pub fn chain(&self) -> Vec<LedgerEntry> {
        self.ledger.lock().unwrap().chain().to_vec()
    }

    /// Walk the chain and report whether both hash invariants hold.
    pub fn verify_chain(&self) -> (bool, usize, String) {
        let ledger = self.ledger.lock().unwrap();
        (
            ledger.verify_integrity(),
            ledger.len(),
            ledger.latest_hash().to_string(),
        )
    }
}
