// src/state.rs - Application state with dependency injection
use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use crate::config::AppConfig;
use crate::services::{ProfileStore, RiskService};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub risk: Arc<RiskService>,
    pub profiles: Arc<ProfileStore>,
    pub metrics: Option<Arc<PrometheusHandle>>,
}

impl AppState {
    /// Create application state with freshly initialized services.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            risk: Arc::new(RiskService::new()),
            profiles: Arc::new(ProfileStore::new()),
            metrics: None,
        }
    }

    /// Attach the Prometheus render handle installed by the binary.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(Arc::new(handle));
        self
    }
}
