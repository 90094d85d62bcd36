//! Site Signal server binary.
//!
//! Loads configuration, wires adapters to ports, and serves the HTTP API.

use std::error::Error;
use std::sync::Arc;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use site_signal::adapters::http::{build_router, AppState};
use site_signal::adapters::postgres;
use site_signal::adapters::{
    HttpScoringConfig, HttpTerritoryScoringProvider, InMemoryAssessmentRepository,
    InMemoryEventBus, InMemoryMetricSetRepository, InMemoryTerritoryAnalysisRepository,
    MockTerritoryScoringProvider, PostgresAssessmentRepository, PostgresMetricSetRepository,
    PostgresTerritoryAnalysisRepository,
};
use site_signal::config::{AppConfig, ServerConfig};
use site_signal::ports::TerritoryScoringProvider;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    let state = build_state(&config).await?;
    let router = build_router(state, &config.server);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "site-signal listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("site-signal stopped");
    Ok(())
}

/// `RUST_LOG` wins over the configured filter; production logs are JSON.
fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if server.is_production() {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer().compact()).init();
    }
}

async fn build_state(config: &AppConfig) -> Result<AppState, Box<dyn Error>> {
    let scoring_provider: Arc<dyn TerritoryScoringProvider> = match &config.territory {
        Some(territory) => {
            tracing::info!(endpoint = %territory.endpoint, "using HTTP territory scoring provider");
            Arc::new(HttpTerritoryScoringProvider::new(HttpScoringConfig::from(territory))?)
        }
        None => {
            tracing::warn!("no territory provider configured; using mock provider");
            Arc::new(MockTerritoryScoringProvider::new())
        }
    };

    let publisher = Arc::new(InMemoryEventBus::new());

    let state = match &config.database {
        Some(database) => {
            let pool = postgres::connect(database).await?;
            tracing::info!("using PostgreSQL repositories");
            AppState {
                metric_sets: Arc::new(PostgresMetricSetRepository::new(pool.clone())),
                assessments: Arc::new(PostgresAssessmentRepository::new(pool.clone())),
                territory_analyses: Arc::new(PostgresTerritoryAnalysisRepository::new(pool)),
                scoring_provider,
                publisher,
            }
        }
        None => {
            tracing::warn!("no database configured; data will not survive a restart");
            AppState {
                metric_sets: Arc::new(InMemoryMetricSetRepository::new()),
                assessments: Arc::new(InMemoryAssessmentRepository::new()),
                territory_analyses: Arc::new(InMemoryTerritoryAnalysisRepository::new()),
                scoring_provider,
                publisher,
            }
        }
    };

    Ok(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("shutdown signal received");
}
