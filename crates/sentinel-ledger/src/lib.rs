//! Tamper-evident audit ledger for risk decisions.
//!
//! Decisions are chained into a single-writer, append-only hash chain: each
//! entry's `current_hash` commits to its index, the previous entry's hash,
//! the transaction id and the final score. A canonical serialization of the
//! full decision record is hashed into a side-channel `data_hash` so the
//! stored record body can be checked independently of the chain.

pub mod chain;
pub mod hash;

pub use chain::{ImmutableLedger, LedgerEntry, GENESIS_DECISION, GENESIS_TRANSACTION_ID};
pub use hash::{canonical_json, sha256_hex};

use thiserror::Error;

/// Errors surfaced by ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The chain failed integrity verification; nothing was appended.
    #[error("ERR_CHAIN_MISMATCH: ledger hash chain failed verification")]
    ChainMismatch,

    /// The decision record could not be serialized for the data hash.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
