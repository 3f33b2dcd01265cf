// src/main.rs - Sentinel gateway binary
use axum::{response::Json, routing::get, Router};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tower_http::{
    compression::CompressionLayer, limit::RequestBodyLimitLayer, trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;

use sentinel_backend::{
    config::AppConfig,
    constants::{API_V1_PREFIX, MAX_REQUEST_BODY_BYTES},
    handlers, middleware, models, routes,
    state::AppState,
};

// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Sentinel Risk Gateway",
        version = "0.1.0",
        description = "Real-time UPI transaction risk scoring with a tamper-evident audit ledger",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    paths(
        handlers::health::health_check,
        handlers::transactions::evaluate_transaction,
        handlers::transactions::get_user_history,
        handlers::profiles::upsert_profile,
        handlers::profiles::import_profiles,
        handlers::profiles::get_profile,
        handlers::ledger::get_chain,
        handlers::ledger::verify_chain,
        handlers::ledger::latest_hash,
        handlers::monitoring::latency_stats,
    ),
    components(
        schemas(
            models::transaction::EvaluateTransactionRequest,
            models::transaction::HistoryResponse,
            models::profile::UpsertProfileRequest,
            models::profile::ProfileImportSummary,
            models::profile::ProfileResponse,
            models::risk::EvaluateResponse,
            models::risk::LatencyStatsResponse,
            models::risk::ChainResponse,
            models::risk::ChainVerifyResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health and status monitoring endpoints"),
        (name = "Transactions", description = "Risk scoring pipeline"),
        (name = "Profiles", description = "User profile store and ingest"),
        (name = "Ledger", description = "Tamper-evident audit chain"),
        (name = "Monitoring", description = "Latency observability")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before anything reads the environment.
    let _ = dotenvy::dotenv();

    let config = AppConfig::from_env()?;
    init_tracing(&config)?;

    let mut state = AppState::new(config.clone());
    if config.metrics_enabled {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .map_err(|e| anyhow::anyhow!("failed to install metrics recorder: {e}"))?;
        state = state.with_metrics(handle);
    }

    let app = create_application(state);

    let addr = SocketAddr::new(config.host.parse()?, config.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Sentinel gateway starting on {}", addr);
    tracing::info!(
        "Health check available at http://localhost:{}/health",
        config.port
    );
    if config.enable_openapi {
        tracing::info!(
            "OpenAPI document at http://localhost:{}/api-docs/openapi.json",
            config.port
        );
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing(config: &AppConfig) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.tracing_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().json())
        .init();
    Ok(())
}

fn create_application(state: AppState) -> Router {
    Router::new()
        // Health & Status endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/metrics", get(handlers::health::metrics))

        // API v1 routes
        .nest(API_V1_PREFIX, create_v1_routes())

        // OpenAPI documentation (enabled conditionally)
        .merge(create_docs_routes(&state.config))

        // Global middleware stack
        .layer(middleware::cors::create_cors_layer(&state.config))
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())

        // Attach application state
        .with_state(state)
}

fn create_v1_routes() -> Router<AppState> {
    Router::new()
        // Risk scoring pipeline
        .nest("/transactions", routes::transactions::create_routes())

        // Profile store and spreadsheet ingest
        .nest("/profiles", routes::profiles::create_routes())

        // Audit chain inspection
        .nest("/ledger", routes::ledger::create_routes())

        // Latency observability
        .nest("/monitoring", routes::monitoring::create_routes())
}

fn create_docs_routes(config: &AppConfig) -> Router<AppState> {
    if config.enable_openapi {
        Router::new().route(
            "/api-docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
    } else {
        Router::new()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to install shutdown signal handler: {}", e);
        return;
    }
    tracing::info!("shutdown signal received, draining connections");
}
