// The Sentinel aggregator: context assembly, score combination, decision
// mapping and cross-transaction state updates.
use std::collections::HashSet;
use std::time::Instant;

use crate::constants::{
    COORD_MULTIPLIER, DEVICE_WINDOW_MS, THRESHOLD_BLOCK, THRESHOLD_PASS, VELOCITY_WINDOW_MS,
};
use crate::coordination::CoordinatedAttackDetector;
use crate::escalation::EscalationTracker;
use crate::evaluators::{amount, behavioral, device, geo, network, velocity};
use crate::history::TransactionHistory;
use crate::latency::{LatencyMonitor, LatencyStats};
use crate::types::{
    AccountStatus, ComponentScores, Decision, FinalRiskResult, ReasonCode, Transaction, UserProfile,
};

/// Secondary pre-OTP thresholds: a STEP_UP candidate with this much churn
/// behind it is blocked instead of challenged.
const PRE_OTP_VELOCITY_LIMIT: usize = 8;
const PRE_OTP_DEVICE_LIMIT: usize = 2;

/// Reason-code priority used to pick the primary code off the reasoning list.
const REASON_PRIORITY: [ReasonCode; 6] = [
    ReasonCode::ChainMismatch,
    ReasonCode::EscalationOverride,
    ReasonCode::CoordinatedAttack,
    ReasonCode::GeoImpossible,
    ReasonCode::VelocityLimit,
    ReasonCode::BehavioralShift,
];

/// Single-writer risk engine. Owns all cross-transaction state: the rolling
/// history ring, the coordination window, per-user escalation bookkeeping
/// and the latency monitor. `evaluate` is synchronous and completes fully
/// before the next call; in a multi-threaded host the engine must sit behind
/// one mutex.
#[derive(Debug, Default)]
pub struct SentinelEngine {
    history: TransactionHistory,
    coord_detector: CoordinatedAttackDetector,
    escalation: EscalationTracker,
    latency: LatencyMonitor,
}

impl SentinelEngine {
    pub fn new() -> Self {
        Self {
            history: TransactionHistory::new(),
            coord_detector: CoordinatedAttackDetector::new(),
            escalation: EscalationTracker::new(),
            latency: LatencyMonitor::new(),
        }
    }

    /// Score one transaction against its owner's profile and return the
    /// decision record. Never fails: every outcome is encoded as data.
    pub fn evaluate(&mut self, tx: &Transaction, profile: &UserProfile) -> FinalRiskResult {
        let start = Instant::now();

        // Blocked accounts short-circuit the whole pipeline. The attempt is
        // not retained in history.
        if profile.account_status == AccountStatus::Blocked {
            tracing::warn!(
                user_id = %tx.user_id,
                transaction_id = %tx.transaction_id,
                "transaction attempted on a blocked account"
            );
            let reasons = vec![ReasonCode::BlockedUser.reason("Account is blocked")];
            return self.finish(
                tx,
                100,
                ComponentScores::default(),
                Decision::Block,
                ReasonCode::BlockedUser,
                reasons,
                false,
                false,
                start,
            );
        }

        // Context: per-user history view, previous transaction, devices seen
        // in the last five minutes (including the current device).
        let user_history = self.history.for_user(&tx.user_id);
        let last_tx = user_history.last().copied();
        let velocity_window_count = user_history
            .iter()
            .filter(|t| t.timestamp > tx.timestamp - VELOCITY_WINDOW_MS)
            .count();
        let mut recent_devices: HashSet<String> = self
            .history
            .devices_since(&tx.user_id, tx.timestamp - DEVICE_WINDOW_MS);
        recent_devices.insert(tx.device_id.clone());

        let geo_signal = geo::evaluate(tx, profile, last_tx);
        let velocity_signal = velocity::evaluate(tx, profile, &user_history);
        let device_signal = device::evaluate(tx, profile, &recent_devices);
        let amount_signal = amount::evaluate(tx, profile);
        let network_signal = network::evaluate(tx);
        let behavioral_signal = behavioral::evaluate(tx, profile);

        let component_scores = ComponentScores {
            geo: geo_signal.score,
            velocity: velocity_signal.score,
            device: device_signal.score,
            amount: amount_signal.score,
            network: network_signal.score,
            behavioral: behavioral_signal.score,
        };

        let mut reasons: Vec<String> = Vec::new();
        reasons.extend(geo_signal.reasons);
        reasons.extend(velocity_signal.reasons);
        reasons.extend(device_signal.reasons);
        reasons.extend(amount_signal.reasons);
        reasons.extend(network_signal.reasons);
        reasons.extend(behavioral_signal.reasons);

        let mut base_score = component_scores.total();
        if behavioral_signal.multiplier > 1.0 {
            base_score = (base_score as f64 * behavioral_signal.multiplier).floor() as u32;
        }

        // Record-then-detect: the current transaction participates in its
        // own cluster.
        self.coord_detector.record(tx);
        let coordinated = self.coord_detector.detect(tx);
        if coordinated {
            base_score = (base_score as f64 * COORD_MULTIPLIER).floor() as u32;
            reasons.push(
                ReasonCode::CoordinatedAttack
                    .reason("Coordinated cluster on this merchant category"),
            );
        }

        let mut final_score = base_score.min(100);
        let mut escalation_override = false;

        let (decision, reason_code) = if final_score >= THRESHOLD_BLOCK {
            let code = if coordinated {
                ReasonCode::CoordinatedAttack
            } else {
                primary_reason_code(&reasons)
            };
            (Decision::Block, code)
        } else if final_score >= THRESHOLD_PASS {
            if self
                .escalation
                .should_force_block(&tx.user_id, final_score, tx.timestamp)
            {
                escalation_override = true;
                final_score = final_score.max(THRESHOLD_BLOCK);
                reasons.push(
                    ReasonCode::EscalationOverride
                        .reason("Repeated step-up challenges within 15 minutes"),
                );
                (Decision::Block, ReasonCode::EscalationOverride)
            } else {
                // Secondary pre-OTP check: refuse to challenge a user whose
                // recent churn already looks compromised.
                let velocity_fail = velocity_window_count > PRE_OTP_VELOCITY_LIMIT;
                let device_fail = recent_devices.len() > PRE_OTP_DEVICE_LIMIT;
                let coord_fail = self.coord_detector.detect(tx);
                let esc_fail = self.escalation.should_force_block(
                    &tx.user_id,
                    THRESHOLD_BLOCK,
                    tx.timestamp,
                );
                if velocity_fail || device_fail || coord_fail || esc_fail {
                    (Decision::Block, primary_reason_code(&reasons))
                } else {
                    (Decision::StepUp, primary_reason_code(&reasons))
                }
            }
        } else {
            (Decision::Approve, ReasonCode::Ok)
        };

        match decision {
            Decision::StepUp => self.escalation.record_step_up(&tx.user_id, tx.timestamp),
            Decision::Block => self.escalation.record_block(&tx.user_id),
            Decision::Approve => {}
        }

        self.history.push(tx.clone());

        self.finish(
            tx,
            final_score,
            component_scores,
            decision,
            reason_code,
            reasons,
            coordinated,
            escalation_override,
            start,
        )
    }

    /// All retained transactions for `user_id`, oldest first.
    pub fn get_history(&self, user_id: &str) -> Vec<Transaction> {
        self.history
            .for_user(user_id)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Snapshot of the rolling latency window.
    pub fn latency_stats(&self) -> LatencyStats {
        self.latency.stats()
    }

    #[allow(clippy::too_many_arguments)]
    fn finish(
        &mut self,
        tx: &Transaction,
        final_score: u32,
        component_scores: ComponentScores,
        decision: Decision,
        reason_code: ReasonCode,
        reasoning: Vec<String>,
        coordinated_attack: bool,
        escalation_override: bool,
        start: Instant,
    ) -> FinalRiskResult {
        let processing_time_ms = start.elapsed().as_secs_f64() * 1000.0;
        self.latency.record(processing_time_ms);

        tracing::info!(
            transaction_id = %tx.transaction_id,
            user_id = %tx.user_id,
            final_risk_score = final_score,
            decision = %decision,
            reason_code = %reason_code,
            coordinated_attack,
            escalation_override,
            "transaction scored"
        );

        FinalRiskResult {
            transaction_id: tx.transaction_id.clone(),
            user_id: tx.user_id.clone(),
            amount: tx.amount,
            timestamp: tx.timestamp,
            final_risk_score: final_score,
            component_scores,
            decision,
            reasoning,
            reason_code,
            processing_time_ms,
            latency_breach: self.latency.is_breach(),
            coordinated_attack,
            escalation_override,
        }
    }
}

/// First reason code present in the reasoning list, in severity order.
/// Matching is by string prefix so evaluators stay free to format details.
fn primary_reason_code(reasons: &[String]) -> ReasonCode {
    for code in REASON_PRIORITY {
        let prefix = format!("{}:", code.as_str());
        if reasons.iter().any(|reason| reason.starts_with(&prefix)) {
            return code;
        }
    }
    ReasonCode::Ok
}
