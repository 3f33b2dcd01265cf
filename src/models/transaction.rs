// src/models/transaction.rs - Transaction ingest models
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use sentinel_core::{GeoPoint, NetworkType, Transaction, UserProfile};

use crate::constants::{DEFAULT_TX_IP_ADDRESS, DEFAULT_TX_MERCHANT};

/// Transaction as submitted by producers. Only the user and the amount are
/// mandatory; everything else is normalized against the owner's profile.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct EvaluateTransactionRequest {
    pub user_id: String,
    /// Whole rupees.
    pub amount: u64,
    pub transaction_id: Option<String>,
    /// Milliseconds since the Unix epoch; defaults to ingestion time.
    pub timestamp: Option<i64>,
    pub device_id: Option<String>,
    pub ip_address: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub city: Option<String>,
    pub merchant_id: Option<String>,
    pub merchant_category: Option<String>,
    pub network_type: Option<String>,
    pub session_id: Option<String>,
}

impl EvaluateTransactionRequest {
    /// Normalize into a scoring-ready transaction. Missing device and city
    /// fall back to the registered profile values so that absent optional
    /// fields never manufacture geo or device signals on their own.
    pub fn into_transaction(self, profile: &UserProfile) -> Transaction {
        Transaction {
            transaction_id: self
                .transaction_id
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            user_id: self.user_id,
            amount: self.amount,
            timestamp: self
                .timestamp
                .unwrap_or_else(|| chrono::Utc::now().timestamp_millis()),
            device_id: self
                .device_id
                .unwrap_or_else(|| profile.registered_device_id.clone()),
            ip_address: self
                .ip_address
                .unwrap_or_else(|| DEFAULT_TX_IP_ADDRESS.to_string()),
            location: GeoPoint {
                lat: self.lat.unwrap_or(0.0),
                lon: self.lon.unwrap_or(0.0),
                city: self
                    .city
                    .unwrap_or_else(|| profile.registered_city.clone()),
            },
            merchant_id: self
                .merchant_id
                .unwrap_or_else(|| DEFAULT_TX_MERCHANT.to_string()),
            merchant_category: self.merchant_category,
            network_type: self
                .network_type
                .as_deref()
                .map(NetworkType::parse)
                .unwrap_or(NetworkType::Unknown),
            session_id: self.session_id.unwrap_or_else(|| Uuid::new_v4().to_string()),
        }
    }
}

/// Per-user history view.
#[derive(Debug, Serialize, ToSchema)]
pub struct HistoryResponse {
    pub user_id: String,
    pub count: usize,
    /// Retained transactions, oldest first.
    #[schema(value_type = Vec<Object>)]
    pub transactions: Vec<Transaction>,
}
