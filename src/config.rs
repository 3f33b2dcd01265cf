// src/config.rs - Environment-driven configuration
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;

use crate::constants::{
    CORS_ORIGIN_API_DEV, CORS_ORIGIN_DASHBOARD_DEV, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    DEFAULT_TRACING_LEVEL,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    // Server configuration
    pub port: u16,
    pub host: String,
    pub environment: Environment,

    // Security configuration
    pub cors_origins: Vec<String>,

    // Feature flags
    pub enable_openapi: bool,
    pub metrics_enabled: bool,

    // Monitoring & Observability
    pub tracing_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Testing,
    Staging,
    Production,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_SERVER_PORT,
            host: DEFAULT_SERVER_HOST.to_string(),
            environment: Environment::Development,
            cors_origins: vec![
                CORS_ORIGIN_DASHBOARD_DEV.to_string(),
                CORS_ORIGIN_API_DEV.to_string(),
            ],
            enable_openapi: true,
            metrics_enabled: true,
            tracing_level: DEFAULT_TRACING_LEVEL.to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables, falling back to
    /// development defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let port = match env::var("PORT") {
            Ok(raw) => raw.parse::<u16>().context("PORT must be a valid port number")?,
            Err(_) => defaults.port,
        };

        let environment = match env::var("ENVIRONMENT").as_deref() {
            Ok("production") => Environment::Production,
            Ok("staging") => Environment::Staging,
            Ok("testing") => Environment::Testing,
            _ => Environment::Development,
        };

        let cors_origins = match env::var("CORS_ORIGINS") {
            Ok(raw) => raw
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
            Err(_) => defaults.cors_origins,
        };

        Ok(Self {
            port,
            host: env::var("HOST").unwrap_or(defaults.host),
            environment,
            cors_origins,
            enable_openapi: env_flag("ENABLE_OPENAPI", defaults.enable_openapi),
            metrics_enabled: env_flag("METRICS_ENABLED", defaults.metrics_enabled),
            tracing_level: env::var("TRACING_LEVEL").unwrap_or(defaults.tracing_level),
        })
    }

    pub fn is_production(&self) -> bool {
        matches!(self.environment, Environment::Production)
    }
}

fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .map(|raw| matches!(raw.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.port, DEFAULT_SERVER_PORT);
        assert!(config.enable_openapi);
        assert!(!config.is_production());
        assert_eq!(config.cors_origins.len(), 2);
    }
}
