// Behavioral pattern checks against the stored profile.
use chrono::{TimeZone, Timelike, Utc};

use crate::evaluators::RiskSignal;
use crate::types::{AccountStatus, KycStatus, ReasonCode, Transaction, UserProfile};

/// Maximum score this evaluator can contribute.
pub const BEHAVIORAL_CEILING: u32 = 65;

const UNUSUAL_HOUR_SCORE: u32 = 10;
const DORMANT_SCORE: u32 = 45;
const KYC_FAILED_SCORE: u32 = 35;
const KYC_PENDING_SCORE: u32 = 10;

/// Score behavioral anomalies: activity outside the usual login hours, a
/// dormant account and incomplete KYC. Also emits the risk-category score
/// multiplier the aggregator applies to the combined base score.
///
/// Hour-of-day is evaluated in UTC so results are stable across hosts.
pub fn evaluate(tx: &Transaction, profile: &UserProfile) -> RiskSignal {
    let mut signal = RiskSignal::clear();

    if let Some(hour) = hour_of_day(tx.timestamp) {
        let [start, end] = profile.usual_login_times;
        if hour < start || hour > end {
            signal.score += UNUSUAL_HOUR_SCORE;
            signal.reasons.push(ReasonCode::BehavioralShift.reason(format!(
                "Activity at hour {hour} outside the usual window {start}-{end}"
            )));
        }
    }

    if profile.account_status == AccountStatus::Dormant {
        signal.score += DORMANT_SCORE;
        signal
            .reasons
            .push(ReasonCode::BehavioralShift.reason("Activity on a dormant account"));
    }

    match profile.kyc_status {
        KycStatus::Failed => {
            signal.score += KYC_FAILED_SCORE;
            signal
                .reasons
                .push(ReasonCode::BehavioralShift.reason("KYC verification failed"));
        }
        KycStatus::Pending => {
            signal.score += KYC_PENDING_SCORE;
            signal
                .reasons
                .push(ReasonCode::BehavioralShift.reason("KYC verification pending"));
        }
        KycStatus::Verified => {}
    }

    signal.multiplier = profile.risk_category.multiplier();
    signal.clamped(BEHAVIORAL_CEILING)
}

fn hour_of_day(timestamp_ms: i64) -> Option<u32> {
    Utc.timestamp_millis_opt(timestamp_ms)
        .single()
        .map(|dt| dt.hour())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GeoPoint, NetworkType, RiskCategory};

    // 2024-01-15T10:00:00Z
    const T_10AM: i64 = 1_705_312_800_000;
    // 2024-01-15T03:00:00Z
    const T_3AM: i64 = 1_705_287_600_000;

    fn tx(ts: i64) -> Transaction {
        Transaction {
            transaction_id: "tx-1".into(),
            user_id: "user_123".into(),
            amount: 1500,
            timestamp: ts,
            device_id: "dev_1".into(),
            ip_address: "10.0.0.1".into(),
            location: GeoPoint {
                lat: 19.0760,
                lon: 72.8777,
                city: "Mumbai".into(),
            },
            merchant_id: "m1".into(),
            merchant_category: None,
            network_type: NetworkType::FourG,
            session_id: "s1".into(),
        }
    }

    fn profile() -> UserProfile {
        UserProfile {
            user_id: "user_123".into(),
            registered_city: "Mumbai".into(),
            registered_device_id: "dev_1".into(),
            avg_transaction_amount: 2000.0,
            max_transaction_amount: 50_000,
            daily_transaction_limit: 100_000,
            avg_transactions_per_day: 5.0,
            kyc_status: KycStatus::Verified,
            risk_category: RiskCategory::Low,
            account_status: AccountStatus::Active,
            usual_login_times: [8, 22],
            last_login: 0,
            failed_attempts_last_10_min: 0,
        }
    }

    #[test]
    fn test_usual_hour_verified_active_scores_zero() {
        let signal = evaluate(&tx(T_10AM), &profile());
        assert_eq!(signal.score, 0);
        assert_eq!(signal.multiplier, 1.0);
    }

    #[test]
    fn test_unusual_hour() {
        let signal = evaluate(&tx(T_3AM), &profile());
        assert_eq!(signal.score, 10);
        assert!(signal.reasons[0].contains("hour 3"));
    }

    #[test]
    fn test_window_bounds_are_inclusive() {
        let mut p = profile();
        p.usual_login_times = [10, 10];
        // Hour exactly at the window end carries no penalty.
        assert_eq!(evaluate(&tx(T_10AM), &p).score, 0);
        p.usual_login_times = [11, 22];
        assert_eq!(evaluate(&tx(T_10AM), &p).score, 10);
    }

    #[test]
    fn test_dormant_account() {
        let mut p = profile();
        p.account_status = AccountStatus::Dormant;
        assert_eq!(evaluate(&tx(T_10AM), &p).score, 45);
    }

    #[test]
    fn test_kyc_states() {
        let mut p = profile();
        p.kyc_status = KycStatus::Pending;
        assert_eq!(evaluate(&tx(T_10AM), &p).score, 10);
        p.kyc_status = KycStatus::Failed;
        assert_eq!(evaluate(&tx(T_10AM), &p).score, 35);
    }

    #[test]
    fn test_multiplier_reflects_risk_category() {
        let mut p = profile();
        p.risk_category = RiskCategory::High;
        assert_eq!(evaluate(&tx(T_10AM), &p).multiplier, 1.2);
        p.risk_category = RiskCategory::Medium;
        assert_eq!(evaluate(&tx(T_10AM), &p).multiplier, 1.1);
    }

    #[test]
    fn test_stacked_signals_clamp_to_ceiling() {
        let mut p = profile();
        p.account_status = AccountStatus::Dormant;
        p.kyc_status = KycStatus::Failed;
        // 10 + 45 + 35 = 90, clamped to 65.
        let signal = evaluate(&tx(T_3AM), &p);
        assert_eq!(signal.score, BEHAVIORAL_CEILING);
        assert_eq!(signal.reasons.len(), 3);
    }
}
