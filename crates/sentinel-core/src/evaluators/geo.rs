// Geographic plausibility checks.
use crate::constants::{EARTH_RADIUS_KM, MAX_SPEED_KMH};
use crate::evaluators::RiskSignal;
use crate::types::{GeoPoint, ReasonCode, Transaction, UserProfile};

/// Maximum score this evaluator can contribute.
pub const GEO_CEILING: u32 = 65;

const CITY_MISMATCH_SCORE: u32 = 10;
const IMPOSSIBLE_TRAVEL_SCORE: u32 = 55;

/// Score geographic anomalies: a transaction city that differs from the
/// registered city, and physically impossible travel speed relative to the
/// user's previous transaction.
pub fn evaluate(
    tx: &Transaction,
    profile: &UserProfile,
    last_tx: Option<&Transaction>,
) -> RiskSignal {
    let mut signal = RiskSignal::clear();

    if tx.location.city != profile.registered_city {
        signal.score += CITY_MISMATCH_SCORE;
        signal.reasons.push(ReasonCode::GeoImpossible.reason(format!(
            "Transaction city {} differs from registered city {}",
            tx.location.city, profile.registered_city
        )));
    }

    if let Some(last) = last_tx {
        let distance_km = haversine_km(&last.location, &tx.location);
        let elapsed_h = (tx.timestamp - last.timestamp) as f64 / 3_600_000.0;
        if elapsed_h > 0.0 && distance_km / elapsed_h > MAX_SPEED_KMH {
            signal.score += IMPOSSIBLE_TRAVEL_SCORE;
            signal.reasons.push(ReasonCode::GeoImpossible.reason(format!(
                "Impossible travel: {distance_km:.1} km in {elapsed_h:.2} h"
            )));
        }
    }

    signal.clamped(GEO_CEILING)
}

/// Great-circle distance between two points, in kilometers.
pub fn haversine_km(from: &GeoPoint, to: &GeoPoint) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lon = (to.lon - from.lon).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GeoPoint, NetworkType};

    const MUMBAI: (f64, f64) = (19.0760, 72.8777);
    const DELHI: (f64, f64) = (28.6139, 77.2090);

    fn tx_at(city: &str, lat: f64, lon: f64, ts: i64) -> Transaction {
        Transaction {
            transaction_id: format!("tx-{ts}"),
            user_id: "user_123".into(),
            amount: 1500,
            timestamp: ts,
            device_id: "dev_iphone_13_001".into(),
            ip_address: "10.0.0.1".into(),
            location: GeoPoint {
                lat,
                lon,
                city: city.into(),
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
            registered_device_id: "dev_iphone_13_001".into(),
            avg_transaction_amount: 2000.0,
            max_transaction_amount: 50_000,
            daily_transaction_limit: 100_000,
            avg_transactions_per_day: 5.0,
            kyc_status: crate::types::KycStatus::Verified,
            risk_category: crate::types::RiskCategory::Low,
            account_status: crate::types::AccountStatus::Active,
            usual_login_times: [8, 23],
            last_login: 0,
            failed_attempts_last_10_min: 0,
        }
    }

    #[test]
    fn test_home_city_no_history_scores_zero() {
        let tx = tx_at("Mumbai", MUMBAI.0, MUMBAI.1, 1_700_000_000_000);
        let signal = evaluate(&tx, &profile(), None);
        assert_eq!(signal.score, 0);
        assert!(signal.reasons.is_empty());
    }

    #[test]
    fn test_city_mismatch_alone() {
        let tx = tx_at("Pune", 18.5204, 73.8567, 1_700_000_000_000);
        let signal = evaluate(&tx, &profile(), None);
        assert_eq!(signal.score, 10);
        assert!(signal.reasons[0].starts_with("ERR_GEO_IMPOSSIBLE:"));
    }

    #[test]
    fn test_impossible_travel_clamps_to_ceiling() {
        let t0 = 1_705_312_800_000; // 2024-01-15T10:00:00Z
        let first = tx_at("Mumbai", MUMBAI.0, MUMBAI.1, t0);
        let second = tx_at("Delhi", DELHI.0, DELHI.1, t0 + 60_000);
        let signal = evaluate(&second, &profile(), Some(&first));
        // 10 (city) + 55 (speed) hits the ceiling exactly.
        assert_eq!(signal.score, GEO_CEILING);
        assert!(signal
            .reasons
            .iter()
            .any(|r| r.contains("1148.1 km in 0.02 h")));
    }

    #[test]
    fn test_plausible_travel_not_flagged() {
        let t0 = 1_705_312_800_000;
        let first = tx_at("Mumbai", MUMBAI.0, MUMBAI.1, t0);
        // Delhi is ~1148 km away; three hours is comfortably under 800 km/h.
        let second = tx_at("Delhi", DELHI.0, DELHI.1, t0 + 3 * 3_600_000);
        let signal = evaluate(&second, &profile(), Some(&first));
        assert_eq!(signal.score, 10); // city mismatch only
    }

    #[test]
    fn test_zero_elapsed_time_skips_speed_check() {
        let t0 = 1_705_312_800_000;
        let first = tx_at("Mumbai", MUMBAI.0, MUMBAI.1, t0);
        let second = tx_at("Mumbai", DELHI.0, DELHI.1, t0);
        let signal = evaluate(&second, &profile(), Some(&first));
        assert_eq!(signal.score, 0);
    }

    #[test]
    fn test_haversine_known_distance() {
        let mumbai = GeoPoint {
            lat: MUMBAI.0,
            lon: MUMBAI.1,
            city: "Mumbai".into(),
        };
        let delhi = GeoPoint {
            lat: DELHI.0,
            lon: DELHI.1,
            city: "Delhi".into(),
        };
        let d = haversine_km(&mumbai, &delhi);
        assert!((d - 1148.1).abs() < 0.5, "got {d}");
        assert_eq!(haversine_km(&mumbai, &mumbai), 0.0);
    }
}
