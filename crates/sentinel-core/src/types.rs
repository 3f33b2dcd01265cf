// Domain types shared by the evaluators, the engine and the gateway.
use serde::{Deserialize, Serialize};

/// Geographic point attached to a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
    pub city: String,
}

/// Network the transaction was submitted over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NetworkType {
    #[serde(rename = "WIFI")]
    Wifi,
    #[serde(rename = "4G")]
    FourG,
    #[serde(rename = "5G")]
    FiveG,
    #[serde(rename = "VPN")]
    Vpn,
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

impl NetworkType {
    /// Lenient parse for ingest rows; anything unrecognized maps to `Unknown`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "WIFI" => NetworkType::Wifi,
            "4G" => NetworkType::FourG,
            "5G" => NetworkType::FiveG,
            "VPN" => NetworkType::Vpn,
            _ => NetworkType::Unknown,
        }
    }
}

impl std::fmt::Display for NetworkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NetworkType::Wifi => write!(f, "WIFI"),
            NetworkType::FourG => write!(f, "4G"),
            NetworkType::FiveG => write!(f, "5G"),
            NetworkType::Vpn => write!(f, "VPN"),
            NetworkType::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// KYC verification state of the account holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KycStatus {
    Verified,
    Pending,
    Failed,
}

impl KycStatus {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "PENDING" => KycStatus::Pending,
            "FAILED" => KycStatus::Failed,
            _ => KycStatus::Verified,
        }
    }
}

/// Static risk tier assigned to the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskCategory {
    Low,
    Medium,
    High,
}

impl RiskCategory {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "MEDIUM" => RiskCategory::Medium,
            "HIGH" => RiskCategory::High,
            _ => RiskCategory::Low,
        }
    }

    /// Behavioral score multiplier for this tier.
    pub fn multiplier(&self) -> f64 {
        match self {
            RiskCategory::Low => 1.0,
            RiskCategory::Medium => 1.1,
            RiskCategory::High => 1.2,
        }
    }
}

/// Lifecycle state of the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    Active,
    Dormant,
    Blocked,
}

impl AccountStatus {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "DORMANT" => AccountStatus::Dormant,
            "BLOCKED" => AccountStatus::Blocked,
            _ => AccountStatus::Active,
        }
    }
}

/// A single payment instruction entering the scoring pipeline. Immutable once
/// constructed; amounts are whole rupees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_id: String,
    pub user_id: String,
    pub amount: u64,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub device_id: String,
    pub ip_address: String,
    pub location: GeoPoint,
    pub merchant_id: String,
    pub merchant_category: Option<String>,
    pub network_type: NetworkType,
    pub session_id: String,
}

impl Transaction {
    /// Merchant category, falling back to the merchant id when absent.
    pub fn category(&self) -> &str {
        self.merchant_category.as_deref().unwrap_or(&self.merchant_id)
    }
}

/// Stored user profile, read once per evaluation and treated as immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: String,
    pub registered_city: String,
    pub registered_device_id: String,
    pub avg_transaction_amount: f64,
    pub max_transaction_amount: u64,
    pub daily_transaction_limit: u64,
    pub avg_transactions_per_day: f64,
    pub kyc_status: KycStatus,
    pub risk_category: RiskCategory,
    pub account_status: AccountStatus,
    /// Inclusive `[start, end]` hour pair, 0–23.
    pub usual_login_times: [u32; 2],
    /// Milliseconds since the Unix epoch.
    pub last_login: i64,
    pub failed_attempts_last_10_min: u32,
}

/// Per-evaluator clamped scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentScores {
    pub geo: u32,
    pub velocity: u32,
    pub device: u32,
    pub amount: u32,
    pub network: u32,
    pub behavioral: u32,
}

impl ComponentScores {
    pub fn total(&self) -> u32 {
        self.geo + self.velocity + self.device + self.amount + self.network + self.behavioral
    }
}

/// Terminal decision for a scored transaction. `StepUp` signals downstream
/// that an out-of-band challenge (OTP) must be issued before settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    Approve,
    StepUp,
    Block,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Approve => "APPROVE",
            Decision::StepUp => "STEP_UP",
            Decision::Block => "BLOCK",
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed set of machine-readable reason codes. Every reasoning string is
/// prefixed with one of these, and the primary code is surfaced on the
/// result for downstream systems to key off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReasonCode {
    #[serde(rename = "ERR_VELOCITY_LIMIT")]
    VelocityLimit,
    #[serde(rename = "ERR_GEO_IMPOSSIBLE")]
    GeoImpossible,
    #[serde(rename = "ERR_BEHAVIORAL_SHIFT")]
    BehavioralShift,
    #[serde(rename = "ERR_COORDINATED_ATTACK")]
    CoordinatedAttack,
    #[serde(rename = "ERR_ESCALATION_OVERRIDE")]
    EscalationOverride,
    #[serde(rename = "ERR_CHAIN_MISMATCH")]
    ChainMismatch,
    #[serde(rename = "ERR_BLOCKED_USER")]
    BlockedUser,
    #[serde(rename = "OK")]
    Ok,
}

impl ReasonCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasonCode::VelocityLimit => "ERR_VELOCITY_LIMIT",
            ReasonCode::GeoImpossible => "ERR_GEO_IMPOSSIBLE",
            ReasonCode::BehavioralShift => "ERR_BEHAVIORAL_SHIFT",
            ReasonCode::CoordinatedAttack => "ERR_COORDINATED_ATTACK",
            ReasonCode::EscalationOverride => "ERR_ESCALATION_OVERRIDE",
            ReasonCode::ChainMismatch => "ERR_CHAIN_MISMATCH",
            ReasonCode::BlockedUser => "ERR_BLOCKED_USER",
            ReasonCode::Ok => "OK",
        }
    }

    /// Format a reasoning string carrying this code.
    pub fn reason(&self, detail: impl std::fmt::Display) -> String {
        format!("{}: {}", self.as_str(), detail)
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full scoring outcome for one transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalRiskResult {
    pub transaction_id: String,
    pub user_id: String,
    pub amount: u64,
    pub timestamp: i64,
    pub final_risk_score: u32,
    pub component_scores: ComponentScores,
    pub decision: Decision,
    /// Ordered human-readable findings, each prefixed by its reason code.
    pub reasoning: Vec<String>,
    pub reason_code: ReasonCode,
    pub processing_time_ms: f64,
    pub latency_breach: bool,
    pub coordinated_attack: bool,
    pub escalation_override: bool,
}
