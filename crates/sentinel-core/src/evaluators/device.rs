// Device fingerprint checks.
use std::collections::HashSet;

use crate::evaluators::RiskSignal;
use crate::types::{ReasonCode, Transaction, UserProfile};

/// Maximum score this evaluator can contribute.
pub const DEVICE_CEILING: u32 = 55;

const UNREGISTERED_DEVICE_SCORE: u32 = 25;
const DEVICE_CHURN_SCORE: u32 = 30;

/// Score device anomalies: an unregistered device id and multiple distinct
/// devices within the 5-minute window. `recent_devices` already includes the
/// current transaction's device.
pub fn evaluate(
    tx: &Transaction,
    profile: &UserProfile,
    recent_devices: &HashSet<String>,
) -> RiskSignal {
    let mut signal = RiskSignal::clear();

    if tx.device_id != profile.registered_device_id {
        signal.score += UNREGISTERED_DEVICE_SCORE;
        signal.reasons.push(ReasonCode::BehavioralShift.reason(format!(
            "Device {} is not the registered device {}",
            tx.device_id, profile.registered_device_id
        )));
    }

    if recent_devices.len() > 1 {
        signal.score += DEVICE_CHURN_SCORE;
        signal.reasons.push(ReasonCode::BehavioralShift.reason(format!(
            "{} distinct devices within 5 minutes",
            recent_devices.len()
        )));
    }

    signal.clamped(DEVICE_CEILING)
}
