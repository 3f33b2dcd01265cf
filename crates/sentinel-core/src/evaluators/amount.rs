// Amount anomaly tiers.
use crate::evaluators::RiskSignal;
use crate::types::{ReasonCode, Transaction, UserProfile};

/// Maximum score this evaluator can contribute.
pub const AMOUNT_CEILING: u32 = 75;

const EXCEEDS_MAX_SCORE: u32 = 75;
const EXCEEDS_DAILY_SCORE: u32 = 45;
const SPIKE_SCORE: u32 = 20;
const SPIKE_FACTOR: f64 = 3.0;

/// Score the transaction amount against the profile limits. The tiers are
/// exclusive: only the first matching tier contributes.
pub fn evaluate(tx: &Transaction, profile: &UserProfile) -> RiskSignal {
    let mut signal = RiskSignal::clear();

    if tx.amount > profile.max_transaction_amount {
        signal.score += EXCEEDS_MAX_SCORE;
        signal.reasons.push(ReasonCode::VelocityLimit.reason(format!(
            "Amount ₹{} exceeds max transaction amount ₹{}",
            tx.amount, profile.max_transaction_amount
        )));
    } else if tx.amount > profile.daily_transaction_limit {
        signal.score += EXCEEDS_DAILY_SCORE;
        signal.reasons.push(ReasonCode::VelocityLimit.reason(format!(
            "Amount ₹{} exceeds daily limit ₹{}",
            tx.amount, profile.daily_transaction_limit
        )));
    } else if tx.amount as f64 > SPIKE_FACTOR * profile.avg_transaction_amount {
        signal.score += SPIKE_SCORE;
        signal.reasons.push(ReasonCode::BehavioralShift.reason(format!(
            "Amount spike: ₹{} against an average of ₹{}",
            tx.amount, profile.avg_transaction_amount
        )));
    }

    signal.clamped(AMOUNT_CEILING)
}
