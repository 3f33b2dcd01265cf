// src/services/profile_store.rs - In-memory user profile store with CSV ingest
use std::collections::HashMap;
use std::sync::RwLock;

use sentinel_core::{AccountStatus, KycStatus, RiskCategory, UserProfile};

use crate::constants::{
    DEFAULT_PROFILE_AVG_AMOUNT, DEFAULT_PROFILE_AVG_TX_PER_DAY, DEFAULT_PROFILE_CITY,
    DEFAULT_PROFILE_DAILY_LIMIT, DEFAULT_PROFILE_DEVICE, DEFAULT_PROFILE_LOGIN_END,
    DEFAULT_PROFILE_LOGIN_START, DEFAULT_PROFILE_MAX_AMOUNT,
};
use crate::middleware::error_handler::ApiError;
use crate::models::profile::ProfileImportSummary;

/// In-memory profile store. Profiles are read once per evaluation and never
/// mutated by the scoring path, so a plain RwLock map is sufficient.
#[derive(Debug, Default)]
pub struct ProfileStore {
    profiles: RwLock<HashMap<String, UserProfile>>,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self {
            profiles: RwLock::new(HashMap::new()),
        }
    }

    pub fn upsert(&self, profile: UserProfile) {
        self.profiles
            .write()
            .unwrap()
            .insert(profile.user_id.clone(), profile);
    }

    pub fn get(&self, user_id: &str) -> Option<UserProfile> {
        self.profiles.read().unwrap().get(user_id).cloned()
    }

    /// Profile for `user_id`, or the documented ingest defaults when the
    /// user was never loaded. Unknown users are scored, not rejected.
    pub fn get_or_default(&self, user_id: &str) -> UserProfile {
        if let Some(profile) = self.get(user_id) {
            return profile;
        }
        tracing::warn!(user_id = %user_id, "no stored profile, scoring with defaults");
        Self::default_profile(user_id)
    }

    pub fn len(&self) -> usize {
        self.profiles.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.read().unwrap().is_empty()
    }

    /// Ingest defaults applied to users without a stored profile and to
    /// missing spreadsheet columns.
    pub fn default_profile(user_id: &str) -> UserProfile {
        UserProfile {
            user_id: user_id.to_string(),
            registered_city: DEFAULT_PROFILE_CITY.to_string(),
            registered_device_id: DEFAULT_PROFILE_DEVICE.to_string(),
            avg_transaction_amount: DEFAULT_PROFILE_AVG_AMOUNT,
            max_transaction_amount: DEFAULT_PROFILE_MAX_AMOUNT,
            daily_transaction_limit: DEFAULT_PROFILE_DAILY_LIMIT,
            avg_transactions_per_day: DEFAULT_PROFILE_AVG_TX_PER_DAY,
            kyc_status: KycStatus::Verified,
            risk_category: RiskCategory::Low,
            account_status: AccountStatus::Active,
            usual_login_times: [DEFAULT_PROFILE_LOGIN_START, DEFAULT_PROFILE_LOGIN_END],
            last_login: 0,
            failed_attempts_last_10_min: 0,
        }
    }

    /// Batch-ingest profiles from CSV. The `user_id` column is mandatory for
    /// the whole batch; malformed rows are skipped with a counted warning.
    pub fn import_csv(&self, data: &str) -> Result<ProfileImportSummary, ApiError> {
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let headers = reader
            .headers()
            .map_err(|e| ApiError::bad_request("csv", format!("unreadable header row: {e}")))?
            .clone();

        let user_id_col = headers
            .iter()
            .position(|h| h.trim() == "user_id")
            .ok_or_else(|| ApiError::bad_request("csv", "missing required column: user_id"))?;

        let column = |name: &str| headers.iter().position(|h| h.trim() == name);
        let cols = CsvColumns {
            registered_city: column("registered_city"),
            registered_device_id: column("registered_device_id"),
            avg_transaction_amount: column("avg_transaction_amount"),
            max_transaction_amount: column("max_transaction_amount"),
            daily_transaction_limit: column("daily_transaction_limit"),
            avg_transactions_per_day: column("avg_transactions_per_day"),
            kyc_status: column("kyc_status"),
            risk_category: column("risk_category"),
            account_status: column("account_status"),
            usual_login_start: column("usual_login_start"),
            usual_login_end: column("usual_login_end"),
            failed_attempts_last_10_min: column("failed_attempts_last_10_min"),
        };

        let mut imported = 0usize;
        let mut skipped = 0usize;

        for (row_number, record) in reader.records().enumerate() {
            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!(row = row_number + 1, error = %e, "skipping unreadable row");
                    skipped += 1;
                    continue;
                }
            };

            match parse_row(&record, user_id_col, &cols) {
                Ok(profile) => {
                    self.upsert(profile);
                    imported += 1;
                }
                Err(reason) => {
                    tracing::warn!(row = row_number + 1, reason = %reason, "skipping malformed row");
                    skipped += 1;
                }
            }
        }

        tracing::info!(imported, skipped, "profile import finished");
        Ok(ProfileImportSummary { imported, skipped })
    }
}

struct CsvColumns {
    registered_city: Option<usize>,
    registered_device_id: Option<usize>,
    avg_transaction_amount: Option<usize>,
    max_transaction_amount: Option<usize>,
    daily_transaction_limit: Option<usize>,
    avg_transactions_per_day: Option<usize>,
    kyc_status: Option<usize>,
    risk_category: Option<usize>,
    account_status: Option<usize>,
    usual_login_start: Option<usize>,
    usual_login_end: Option<usize>,
    failed_attempts_last_10_min: Option<usize>,
}

fn parse_row(
    record: &csv::StringRecord,
    user_id_col: usize,
    cols: &CsvColumns,
) -> Result<UserProfile, String> {
    let cell = |col: Option<usize>| -> Option<&str> {
        col.and_then(|i| record.get(i))
            .map(str::trim)
            .filter(|value| !value.is_empty())
    };

    let user_id = record
        .get(user_id_col)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or("empty user_id")?;

    let mut profile = ProfileStore::default_profile(user_id);

    if let Some(value) = cell(cols.registered_city) {
        profile.registered_city = value.to_string();
    }
    if let Some(value) = cell(cols.registered_device_id) {
        profile.registered_device_id = value.to_string();
    }
    if let Some(value) = cell(cols.avg_transaction_amount) {
        profile.avg_transaction_amount = value
            .parse()
            .map_err(|_| format!("bad avg_transaction_amount: {value}"))?;
    }
    if let Some(value) = cell(cols.max_transaction_amount) {
        profile.max_transaction_amount = value
            .parse()
            .map_err(|_| format!("bad max_transaction_amount: {value}"))?;
    }
    if let Some(value) = cell(cols.daily_transaction_limit) {
        profile.daily_transaction_limit = value
            .parse()
            .map_err(|_| format!("bad daily_transaction_limit: {value}"))?;
    }
    if let Some(value) = cell(cols.avg_transactions_per_day) {
        profile.avg_transactions_per_day = value
            .parse()
            .map_err(|_| format!("bad avg_transactions_per_day: {value}"))?;
    }
    if let Some(value) = cell(cols.kyc_status) {
        profile.kyc_status = KycStatus::parse(value);
    }
    if let Some(value) = cell(cols.risk_category) {
        profile.risk_category = RiskCategory::parse(value);
    }
    if let Some(value) = cell(cols.account_status) {
        profile.account_status = AccountStatus::parse(value);
    }
    if let Some(value) = cell(cols.usual_login_start) {
        let hour: u32 = value
            .parse()
            .map_err(|_| format!("bad usual_login_start: {value}"))?;
        profile.usual_login_times[0] = hour.min(23);
    }
    if let Some(value) = cell(cols.usual_login_end) {
        let hour: u32 = value
            .parse()
            .map_err(|_| format!("bad usual_login_end: {value}"))?;
        profile.usual_login_times[1] = hour.min(23);
    }
    if let Some(value) = cell(cols.failed_attempts_last_10_min) {
        profile.failed_attempts_last_10_min = value
            .parse()
            .map_err(|_| format!("bad failed_attempts_last_10_min: {value}"))?;
    }

    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_or_default_for_unknown_user() {
        let store = ProfileStore::new();
        let profile = store.get_or_default("ghost");
        assert_eq!(profile.user_id, "ghost");
        assert_eq!(profile.registered_city, DEFAULT_PROFILE_CITY);
        assert!(store.get("ghost").is_none(), "defaults are not persisted");
    }

    #[test]
    fn test_upsert_and_get() {
        let store = ProfileStore::new();
        let mut profile = ProfileStore::default_profile("user_1");
        profile.registered_city = "Mumbai".into();
        store.upsert(profile);
        assert_eq!(store.get("user_1").unwrap().registered_city, "Mumbai");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_csv_import_with_defaults_and_overrides() {
        let store = ProfileStore::new();
        let csv = "\
user_id,registered_city,kyc_status,usual_login_start,usual_login_end
user_1,Mumbai,VERIFIED,9,21
user_2,,PENDING,,
";
        let summary = store.import_csv(csv).unwrap();
        assert_eq!(summary.imported, 2);
        assert_eq!(summary.skipped, 0);

        let first = store.get("user_1").unwrap();
        assert_eq!(first.registered_city, "Mumbai");
        assert_eq!(first.usual_login_times, [9, 21]);

        let second = store.get("user_2").unwrap();
        assert_eq!(second.registered_city, DEFAULT_PROFILE_CITY);
        assert_eq!(second.kyc_status, KycStatus::Pending);
        assert_eq!(
            second.usual_login_times,
            [DEFAULT_PROFILE_LOGIN_START, DEFAULT_PROFILE_LOGIN_END]
        );
    }

    #[test]
    fn test_csv_malformed_rows_skipped() {
        let store = ProfileStore::new();
        let csv = "\
user_id,max_transaction_amount
user_1,75000
user_2,not-a-number
,9000
user_3,120000
";
        let summary = store.import_csv(csv).unwrap();
        assert_eq!(summary.imported, 2);
        assert_eq!(summary.skipped, 2);
        assert_eq!(store.get("user_1").unwrap().max_transaction_amount, 75_000);
        assert!(store.get("user_2").is_none());
    }

    #[test]
    fn test_csv_missing_user_id_column_fails_batch() {
        let store = ProfileStore::new();
        let csv = "registered_city,kyc_status\nMumbai,VERIFIED\n";
        assert!(store.import_csv(csv).is_err());
        assert!(store.is_empty());
    }
}
