//! Deterministic risk scoring core for UPI transaction streams.
//!
//! The crate is fully synchronous and rule-driven: given a transaction and
//! the owning user's profile, [`engine::SentinelEngine::evaluate`] produces a
//! bounded risk score, a terminal decision, a machine-readable reason code
//! and the component breakdown. All cross-transaction state (rolling
//! history, coordinated-attack window, escalation bookkeeping, latency
//! samples) is owned by the engine instance; there is no global state.

pub mod constants;
pub mod coordination;
pub mod engine;
pub mod escalation;
pub mod evaluators;
pub mod history;
pub mod latency;
pub mod types;

pub use coordination::CoordinatedAttackDetector;
pub use engine::SentinelEngine;
pub use escalation::EscalationTracker;
pub use history::TransactionHistory;
pub use latency::{LatencyMonitor, LatencyStats};
pub use types::{
    AccountStatus, ComponentScores, Decision, FinalRiskResult, GeoPoint, KycStatus, NetworkType,
    ReasonCode, RiskCategory, Transaction, UserProfile,
};
