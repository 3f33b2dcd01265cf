// Global constants for the Sentinel gateway

// Server configuration
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";
pub const DEFAULT_SERVER_PORT: u16 = 4200;

// Monitoring defaults
pub const DEFAULT_TRACING_LEVEL: &str = "info";

// CORS origins - operator dashboard and local development
pub const CORS_ORIGIN_DASHBOARD_DEV: &str = "http://localhost:4201";
pub const CORS_ORIGIN_API_DEV: &str = "http://localhost:4200";

// API endpoints
pub const API_V1_PREFIX: &str = "/api/v1";

// Request limits
pub const MAX_REQUEST_BODY_BYTES: usize = 1024 * 1024; // 1MB

// Profile ingest defaults (applied per missing column)
pub const DEFAULT_PROFILE_CITY: &str = "Unknown";
pub const DEFAULT_PROFILE_DEVICE: &str = "dev_unknown";
pub const DEFAULT_PROFILE_AVG_AMOUNT: f64 = 1000.0;
pub const DEFAULT_PROFILE_MAX_AMOUNT: u64 = 50_000;
pub const DEFAULT_PROFILE_DAILY_LIMIT: u64 = 100_000;
pub const DEFAULT_PROFILE_AVG_TX_PER_DAY: f64 = 5.0;
pub const DEFAULT_PROFILE_LOGIN_START: u32 = 8;
pub const DEFAULT_PROFILE_LOGIN_END: u32 = 22;

// Transaction ingest defaults
pub const DEFAULT_TX_IP_ADDRESS: &str = "0.0.0.0";
pub const DEFAULT_TX_MERCHANT: &str = "merchant_unknown";
