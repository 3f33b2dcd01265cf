// Network origin checks.
use crate::evaluators::RiskSignal;
use crate::types::{NetworkType, ReasonCode, Transaction};

/// Maximum score this evaluator can contribute.
pub const NETWORK_CEILING: u32 = 30;

const VPN_SCORE: u32 = 20;
const UNKNOWN_SCORE: u32 = 10;

/// Score the network the transaction arrived over. VPN and unidentifiable
/// networks are weak signals on their own but compound with other shifts.
pub fn evaluate(tx: &Transaction) -> RiskSignal {
    let mut signal = RiskSignal::clear();

    match tx.network_type {
        NetworkType::Vpn => {
            signal.score += VPN_SCORE;
            signal
                .reasons
                .push(ReasonCode::BehavioralShift.reason("Transaction routed through a VPN"));
        }
        NetworkType::Unknown => {
            signal.score += UNKNOWN_SCORE;
            signal
                .reasons
                .push(ReasonCode::BehavioralShift.reason("Unidentified network type"));
        }
        NetworkType::Wifi | NetworkType::FourG | NetworkType::FiveG => {}
    }

    signal.clamped(NETWORK_CEILING)
}
