// src/models/profile.rs - User profile ingest models
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use sentinel_core::{AccountStatus, KycStatus, RiskCategory, UserProfile};

use crate::constants::{
    DEFAULT_PROFILE_AVG_AMOUNT, DEFAULT_PROFILE_AVG_TX_PER_DAY, DEFAULT_PROFILE_CITY,
    DEFAULT_PROFILE_DAILY_LIMIT, DEFAULT_PROFILE_DEVICE, DEFAULT_PROFILE_LOGIN_END,
    DEFAULT_PROFILE_LOGIN_START, DEFAULT_PROFILE_MAX_AMOUNT,
};

/// Profile upsert request. Only the user id is mandatory; every other column
/// falls back to the documented ingest default.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpsertProfileRequest {
    pub user_id: String,
    pub registered_city: Option<String>,
    pub registered_device_id: Option<String>,
    pub avg_transaction_amount: Option<f64>,
    pub max_transaction_amount: Option<u64>,
    pub daily_transaction_limit: Option<u64>,
    pub avg_transactions_per_day: Option<f64>,
    pub kyc_status: Option<String>,
    pub risk_category: Option<String>,
    pub account_status: Option<String>,
    pub usual_login_start: Option<u32>,
    pub usual_login_end: Option<u32>,
    pub failed_attempts_last_10_min: Option<u32>,
}

impl UpsertProfileRequest {
    /// Materialize the stored profile, applying ingest defaults for every
    /// missing column. Login hours are clamped into 0-23.
    pub fn into_profile(self) -> UserProfile {
        UserProfile {
            user_id: self.user_id,
            registered_city: self
                .registered_city
                .unwrap_or_else(|| DEFAULT_PROFILE_CITY.to_string()),
            registered_device_id: self
                .registered_device_id
                .unwrap_or_else(|| DEFAULT_PROFILE_DEVICE.to_string()),
            avg_transaction_amount: self
                .avg_transaction_amount
                .unwrap_or(DEFAULT_PROFILE_AVG_AMOUNT),
            max_transaction_amount: self
                .max_transaction_amount
                .unwrap_or(DEFAULT_PROFILE_MAX_AMOUNT),
            daily_transaction_limit: self
                .daily_transaction_limit
                .unwrap_or(DEFAULT_PROFILE_DAILY_LIMIT),
            avg_transactions_per_day: self
                .avg_transactions_per_day
                .unwrap_or(DEFAULT_PROFILE_AVG_TX_PER_DAY),
            kyc_status: self
                .kyc_status
                .as_deref()
                .map(KycStatus::parse)
                .unwrap_or(KycStatus::Verified),
            risk_category: self
                .risk_category
                .as_deref()
                .map(RiskCategory::parse)
                .unwrap_or(RiskCategory::Low),
            account_status: self
                .account_status
                .as_deref()
                .map(AccountStatus::parse)
                .unwrap_or(AccountStatus::Active),
            usual_login_times: [
                self.usual_login_start
                    .unwrap_or(DEFAULT_PROFILE_LOGIN_START)
                    .min(23),
                self.usual_login_end
                    .unwrap_or(DEFAULT_PROFILE_LOGIN_END)
                    .min(23),
            ],
            last_login: 0,
            failed_attempts_last_10_min: self.failed_attempts_last_10_min.unwrap_or(0),
        }
    }
}

/// Outcome of a CSV profile import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct ProfileImportSummary {
    pub imported: usize,
    pub skipped: usize,
}

/// Profile view returned to operators.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    #[schema(value_type = Object)]
    pub profile: UserProfile,
}
