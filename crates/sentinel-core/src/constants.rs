// Bit-fixed scoring constants. These are part of the decision contract and
// are deliberately not configurable at runtime.

/// Score at or above which a transaction leaves the APPROVE band.
pub const THRESHOLD_PASS: u32 = 40;
/// Score at or above which a transaction is blocked outright.
pub const THRESHOLD_BLOCK: u32 = 70;

/// Fastest plausible travel speed between two consecutive transactions.
pub const MAX_SPEED_KMH: f64 = 800.0;
/// Mean Earth radius used by the great-circle distance calculation.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Rolling average processing-time budget.
pub const MAX_LATENCY_MS: f64 = 200.0;
/// Number of processing-time samples retained.
pub const LATENCY_WINDOW: usize = 10;

/// Coordinated-attack observation window.
pub const COORD_WINDOW_MS: i64 = 120_000;
/// Distinct users required inside one cluster to flag coordination.
pub const COORD_MIN_USERS: usize = 5;
/// Relative amount tolerance for cluster membership.
pub const COORD_AMOUNT_VARIANCE: f64 = 0.05;
/// Score amplification applied when a coordinated cluster is detected.
pub const COORD_MULTIPLIER: f64 = 1.25;
/// Hard cap on retained coordination events.
pub const COORD_EVENT_CAP: usize = 5000;

/// Escalation observation window.
pub const ESC_WINDOW_MS: i64 = 900_000;
/// Step-ups inside the window required to force a block.
pub const ESC_MIN_STEPUPS: usize = 3;
/// Minimum score for the escalation override to fire.
pub const ESC_RISK_THRESH: u32 = 60;

/// Global cap on retained transaction history.
pub const HISTORY_CAP: usize = 1000;

/// Velocity evaluator lookback.
pub const VELOCITY_WINDOW_MS: i64 = 600_000;
/// Device evaluator lookback for distinct-device counting.
pub const DEVICE_WINDOW_MS: i64 = 300_000;
