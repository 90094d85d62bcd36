//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresMetricSetRepository` - metric sets, definitions in JSONB
//! - `PostgresAssessmentRepository` - site assessments, values and ratings in JSONB
//! - `PostgresTerritoryAnalysisRepository` - market rankings in JSONB

mod assessment_repository;
mod metric_set_repository;
mod territory_analysis_repository;

pub use assessment_repository::PostgresAssessmentRepository;
pub use metric_set_repository::PostgresMetricSetRepository;
pub use territory_analysis_repository::PostgresTerritoryAnalysisRepository;

use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Postgres, Row};

use crate::config::DatabaseConfig;
use crate::domain::foundation::{DomainError, ErrorCode, UserId};

/// Opens a pool from config and applies pending migrations.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DomainError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(config.idle_timeout())
        .max_lifetime(config.max_lifetime())
        .connect(config.url())
        .await
        .map_err(|e| DomainError::database("Failed to connect to database", e))?;

    if config.run_migrations {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| DomainError::database("Failed to run migrations", e))?;
        tracing::info!("database migrations applied");
    }

    Ok(pool)
}

// ════════════════════════════════════════════════════════════════════════════
// Row helpers shared by the repositories
// ════════════════════════════════════════════════════════════════════════════

fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres>,
{
    row.try_get(name)
        .map_err(|e| DomainError::database(&format!("Failed to get {}", name), e))
}

fn to_json<T: Serialize + ?Sized>(value: &T, what: &str) -> Result<serde_json::Value, DomainError> {
    serde_json::to_value(value).map_err(|e| {
        DomainError::new(
            ErrorCode::InternalError,
            format!("Failed to serialize {}: {}", what, e),
        )
    })
}

fn from_json<T: DeserializeOwned>(value: serde_json::Value, what: &str) -> Result<T, DomainError> {
    serde_json::from_value(value)
        .map_err(|e| DomainError::database(&format!("Invalid {} JSON", what), e))
}

fn owner_from_row(row: &PgRow) -> Result<UserId, DomainError> {
    let owner: String = column(row, "owner_id")?;
    UserId::new(owner).map_err(|e| DomainError::database("Invalid owner_id", e))
}
