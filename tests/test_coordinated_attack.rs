// Coordinated-attack scenario: five distinct users hitting one merchant
// category with near-identical amounts inside the 2-minute window.
use sentinel_backend::services::{ProfileStore, RiskService};
use sentinel_core::{Decision, GeoPoint, NetworkType, ReasonCode, Transaction};

// 2024-01-15T10:00:00Z
const T0: i64 = 1_705_312_800_000;

fn cluster_tx(user: &str, amount: u64, ts: i64) -> Transaction {
    Transaction {
        transaction_id: format!("tx-{user}"),
        user_id: user.into(),
        amount,
        timestamp: ts,
        device_id: "dev_unknown".into(),
        ip_address: "10.0.0.1".into(),
        location: GeoPoint {
            lat: 19.0760,
            lon: 72.8777,
            city: "Unknown".into(),
        },
        merchant_id: "merchant_wallet_topup".into(),
        merchant_category: Some("M1".into()),
        network_type: NetworkType::Wifi,
        session_id: format!("sess-{user}"),
    }
}

#[test]
fn test_fifth_user_flags_coordination() {
    let service = RiskService::new();

    for (i, user) in ["u1", "u2", "u3", "u4", "u5"].iter().enumerate() {
        let profile = ProfileStore::default_profile(user);
        let tx = cluster_tx(user, 999, T0 + i as i64 * 6000);
        let (result, _) = service.evaluate_and_record(&tx, &profile).unwrap();

        if i < 4 {
            assert!(!result.coordinated_attack, "user #{i} flagged too early");
        } else {
            assert!(result.coordinated_attack);
            assert!(result
                .reasoning
                .iter()
                .any(|r| r.starts_with("ERR_COORDINATED_ATTACK:")));
        }
    }
}

#[test]
fn test_amount_variance_bounds_cluster_membership() {
    let service = RiskService::new();

    // Four users at ₹999, one far outside the ±5% band.
    for (i, (user, amount)) in [("u1", 999u64), ("u2", 999), ("u3", 999), ("u4", 2500)]
        .iter()
        .enumerate()
    {
        let profile = ProfileStore::default_profile(user);
        service
            .evaluate_and_record(&cluster_tx(user, *amount, T0 + i as i64 * 6000), &profile)
            .unwrap();
    }

    let profile = ProfileStore::default_profile("u5");
    let (result, _) = service
        .evaluate_and_record(&cluster_tx("u5", 999, T0 + 30_000), &profile)
        .unwrap();
    assert!(
        !result.coordinated_attack,
        "only four users inside the amount band"
    );
}

#[test]
fn test_amplification_can_push_into_block() {
    let service = RiskService::new();

    for (i, user) in ["u1", "u2", "u3", "u4", "u5"].iter().enumerate() {
        let mut profile = ProfileStore::default_profile(user);
        // Dormant accounts with failed KYC: behavioral clamps at 65.
        profile.account_status = sentinel_core::AccountStatus::Dormant;
        profile.kyc_status = sentinel_core::KycStatus::Failed;

        let tx = cluster_tx(user, 999, T0 + i as i64 * 6000);
        let (result, entry) = service.evaluate_and_record(&tx, &profile).unwrap();

        if i == 4 {
            // floor(65 × 1.25) = 81 ≥ 70.
            assert!(result.coordinated_attack);
            assert_eq!(result.final_risk_score, 81);
            assert_eq!(result.decision, Decision::Block);
            assert_eq!(result.reason_code, ReasonCode::CoordinatedAttack);
            assert_eq!(entry.decision, "BLOCK");
        }
    }
}

#[test]
fn test_cluster_expires_with_window() {
    let service = RiskService::new();

    for (i, user) in ["u1", "u2", "u3", "u4"].iter().enumerate() {
        let profile = ProfileStore::default_profile(user);
        service
            .evaluate_and_record(&cluster_tx(user, 999, T0 + i as i64 * 1000), &profile)
            .unwrap();
    }

    // The fifth distinct user arrives three minutes later.
    let profile = ProfileStore::default_profile("u5");
    let (result, _) = service
        .evaluate_and_record(&cluster_tx("u5", 999, T0 + 180_000), &profile)
        .unwrap();
    assert!(!result.coordinated_attack);
}
