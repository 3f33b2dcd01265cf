// The append-only hash chain of risk decisions.
use serde::{Deserialize, Serialize};
use sentinel_core::FinalRiskResult;

use crate::hash::{canonical_json, sha256_hex};
use crate::LedgerError;

/// Sentinel transaction id of the genesis entry.
pub const GENESIS_TRANSACTION_ID: &str = "00000000-0000-0000-0000-000000000000";
/// Sentinel decision string carried only by the genesis entry.
pub const GENESIS_DECISION: &str = "GENESIS";
const GENESIS_HASH_SEED: &str = "0";

/// One link of the audit chain.
///
/// `current_hash` commits to `(index, previous_hash, transaction_id,
/// final_risk_score)`; `data_hash` is a side-channel digest of the full
/// decision record and is deliberately not folded into the chain hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub index: u64,
    pub transaction_id: String,
    /// Ingestion time in milliseconds, not the transaction time.
    pub timestamp: i64,
    pub final_risk_score: u32,
    /// Decision string; `"GENESIS"` only at index 0.
    pub decision: String,
    pub previous_hash: String,
    pub current_hash: String,
    pub data_hash: String,
}

/// Chain hash over the four committed fields, concatenated as strings.
pub fn compute_entry_hash(
    index: u64,
    previous_hash: &str,
    transaction_id: &str,
    final_risk_score: u32,
) -> String {
    sha256_hex(format!("{index}{previous_hash}{transaction_id}{final_risk_score}").as_bytes())
}

/// Single-writer, append-only ledger. Entries are never mutated or removed;
/// the defensive append path verifies the whole chain first and refuses to
/// extend a tampered one.
#[derive(Debug)]
pub struct ImmutableLedger {
    chain: Vec<LedgerEntry>,
}

impl ImmutableLedger {
    /// Fresh ledger holding only the genesis entry.
    pub fn new() -> Self {
        let genesis_hash = sha256_hex(
            format!("{GENESIS_HASH_SEED}{GENESIS_HASH_SEED}{GENESIS_DECISION}{GENESIS_HASH_SEED}")
                .as_bytes(),
        );
        let genesis = LedgerEntry {
            index: 0,
            transaction_id: GENESIS_TRANSACTION_ID.to_string(),
            timestamp: chrono::Utc::now().timestamp_millis(),
            final_risk_score: 0,
            decision: GENESIS_DECISION.to_string(),
            previous_hash: GENESIS_HASH_SEED.to_string(),
            current_hash: genesis_hash,
            data_hash: GENESIS_HASH_SEED.to_string(),
        };
        Self {
            chain: vec![genesis],
        }
    }

    /// Rehydrate a ledger from an exported chain. Integrity is not assumed;
    /// callers are expected to run `verify_integrity` before trusting it.
    pub fn from_entries(chain: Vec<LedgerEntry>) -> Self {
        Self { chain }
    }

    /// Append a decision record, linking it to the current tip.
    pub fn append(&mut self, result: &FinalRiskResult) -> Result<LedgerEntry, LedgerError> {
        let index = self.chain.len() as u64;
        // The chain always holds at least the genesis entry.
        let previous_hash = self
            .chain
            .last()
            .map(|entry| entry.current_hash.clone())
            .unwrap_or_else(|| GENESIS_HASH_SEED.to_string());

        let data_hash = sha256_hex(canonical_json(&serde_json::to_value(result)?).as_bytes());
        let current_hash = compute_entry_hash(
            index,
            &previous_hash,
            &result.transaction_id,
            result.final_risk_score,
        );

        let entry = LedgerEntry {
            index,
            transaction_id: result.transaction_id.clone(),
            timestamp: chrono::Utc::now().timestamp_millis(),
            final_risk_score: result.final_risk_score,
            decision: result.decision.to_string(),
            previous_hash,
            current_hash,
            data_hash,
        };

        tracing::debug!(
            index = entry.index,
            transaction_id = %entry.transaction_id,
            decision = %entry.decision,
            "ledger entry appended"
        );

        self.chain.push(entry.clone());
        Ok(entry)
    }

    /// Walk the chain and check both hash invariants for every entry after
    /// genesis. Returns false on the first mismatch.
    pub fn verify_integrity(&self) -> bool {
        for i in 1..self.chain.len() {
            let entry = &self.chain[i];
            let previous = &self.chain[i - 1];

            if entry.previous_hash != previous.current_hash {
                tracing::error!(index = entry.index, "ledger chain link mismatch");
                return false;
            }
            let expected = compute_entry_hash(
                entry.index,
                &entry.previous_hash,
                &entry.transaction_id,
                entry.final_risk_score,
            );
            if entry.current_hash != expected {
                tracing::error!(index = entry.index, "ledger entry hash mismatch");
                return false;
            }
        }
        true
    }

    /// Verify the whole chain, then append. A tampered chain is refused
    /// without mutation.
    pub fn verify_and_append(
        &mut self,
        result: &FinalRiskResult,
    ) -> Result<LedgerEntry, LedgerError> {
        if !self.verify_integrity() {
            return Err(LedgerError::ChainMismatch);
        }
        self.append(result)
    }

    /// Hash of the current tip.
    pub fn latest_hash(&self) -> &str {
        self.chain
            .last()
            .map(|entry| entry.current_hash.as_str())
            .unwrap_or(GENESIS_HASH_SEED)
    }

    /// Read-only view of the chain, genesis first.
    pub fn chain(&self) -> &[LedgerEntry] {
        &self.chain
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }
}

impl Default for ImmutableLedger {
    fn default() -> Self {
        Self::new()
    }
}
