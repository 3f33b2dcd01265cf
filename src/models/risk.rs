// src/models/risk.rs - Risk evaluation and ledger response models
use serde::Serialize;
use utoipa::ToSchema;

use sentinel_core::{FinalRiskResult, LatencyStats};
use sentinel_ledger::LedgerEntry;

/// Response for the evaluate endpoint: the scored decision plus the audit
/// entry it was chained under.
#[derive(Debug, Serialize, ToSchema)]
pub struct EvaluateResponse {
    #[schema(value_type = Object)]
    pub result: FinalRiskResult,
    #[schema(value_type = Object)]
    pub ledger_entry: LedgerEntry,
}

/// Rolling latency window snapshot.
#[derive(Debug, Serialize, ToSchema)]
pub struct LatencyStatsResponse {
    pub average_ms: f64,
    pub breach: bool,
    pub history: Vec<f64>,
}

impl From<LatencyStats> for LatencyStatsResponse {
    fn from(stats: LatencyStats) -> Self {
        Self {
            average_ms: stats.average_ms,
            breach: stats.breach,
            history: stats.history,
        }
    }
}

/// Full audit chain snapshot, genesis first.
#[derive(Debug, Serialize, ToSchema)]
pub struct ChainResponse {
    pub length: usize,
    #[schema(value_type = Vec<Object>)]
    pub entries: Vec<LedgerEntry>,
}

/// Result of an integrity walk over the chain.
#[derive(Debug, Serialize, ToSchema)]
pub struct ChainVerifyResponse {
    pub verified: bool,
    pub length: usize,
    pub latest_hash: String,
}
