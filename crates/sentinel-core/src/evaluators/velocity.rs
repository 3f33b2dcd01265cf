// Transaction velocity and burst detection.
use crate::constants::VELOCITY_WINDOW_MS;
use crate::evaluators::RiskSignal;
use crate::types::{ReasonCode, Transaction, UserProfile};

/// Maximum score this evaluator can contribute.
pub const VELOCITY_CEILING: u32 = 65;

const WINDOW_COUNT_LIMIT: usize = 5;
const WINDOW_COUNT_SCORE: u32 = 30;
const RUPEE_SPAM_LIMIT: usize = 3;
const RUPEE_SPAM_SCORE: u32 = 30;
const FAILED_ATTEMPTS_LIMIT: u32 = 3;
const FAILED_ATTEMPTS_SCORE: u32 = 35;

/// Score velocity anomalies over the user's last 10 minutes of history:
/// raw transaction count, ₹1 probe bursts, and recent failed attempts
/// reported on the profile.
pub fn evaluate(tx: &Transaction, profile: &UserProfile, history: &[&Transaction]) -> RiskSignal {
    let mut signal = RiskSignal::clear();
    let cutoff = tx.timestamp - VELOCITY_WINDOW_MS;
    let window: Vec<&&Transaction> = history.iter().filter(|t| t.timestamp > cutoff).collect();

    if window.len() > WINDOW_COUNT_LIMIT {
        signal.score += WINDOW_COUNT_SCORE;
        signal.reasons.push(ReasonCode::VelocityLimit.reason(format!(
            "{} transactions in the last 10 minutes",
            window.len()
        )));
    }

    if tx.amount == 1 {
        let one_rupee_count = window.iter().filter(|t| t.amount == 1).count();
        if one_rupee_count > RUPEE_SPAM_LIMIT {
            signal.score += RUPEE_SPAM_SCORE;
            signal.reasons.push(ReasonCode::VelocityLimit.reason(format!(
                "₹1 spam burst: {one_rupee_count} one-rupee transactions in 10 minutes"
            )));
        }
    }

    if profile.failed_attempts_last_10_min > FAILED_ATTEMPTS_LIMIT {
        signal.score += FAILED_ATTEMPTS_SCORE;
        signal.reasons.push(ReasonCode::VelocityLimit.reason(format!(
            "{} failed attempts in the last 10 minutes",
            profile.failed_attempts_last_10_min
        )));
    }

    signal.clamped(VELOCITY_CEILING)
}
