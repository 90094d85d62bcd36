//! PostgreSQL implementation of MetricSetRepository.
//!
//! Metric definitions are stored as a JSONB array on the set row.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use super::{column, from_json, owner_from_row, to_json};
use crate::domain::assessment::MetricSet;
use crate::domain::foundation::{
    DomainError, ErrorCode, MetricSetId, Repository, Timestamp, UserId,
};
use crate::ports::MetricSetRepository;

/// PostgreSQL implementation of MetricSetRepository.
#[derive(Clone)]
pub struct PostgresMetricSetRepository {
    pool: PgPool,
}

impl PostgresMetricSetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<MetricSet, MetricSetId> for PostgresMetricSetRepository {
    async fn find_by_id(&self, id: MetricSetId) -> Result<Option<MetricSet>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, owner_id, name, description, metrics, created_at, updated_at
            FROM metric_sets
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch metric set", e))?;

        row.map(|row| row_to_metric_set(&row)).transpose()
    }

    async fn save(&self, set: &MetricSet) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO metric_sets (
                id, owner_id, name, description, metrics, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(set.id().as_uuid())
        .bind(set.owner().as_str())
        .bind(set.name())
        .bind(set.description())
        .bind(to_json(set.metrics(), "metrics")?)
        .bind(set.created_at().as_datetime())
        .bind(set.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to insert metric set", e))?;

        Ok(())
    }

    async fn update(&self, set: &MetricSet) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE metric_sets SET
                name = $2,
                description = $3,
                metrics = $4,
                updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(set.id().as_uuid())
        .bind(set.name())
        .bind(set.description())
        .bind(to_json(set.metrics(), "metrics")?)
        .bind(set.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to update metric set", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::MetricSetNotFound,
                format!("Metric set not found: {}", set.id()),
            ));
        }

        Ok(())
    }

    async fn delete(&self, id: MetricSetId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM metric_sets WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete metric set", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::MetricSetNotFound,
                format!("Metric set not found: {}", id),
            ));
        }

        Ok(())
    }

    async fn exists(&self, id: MetricSetId) -> Result<bool, DomainError> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM metric_sets WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to check metric set existence", e))?;

        Ok(result.0 > 0)
    }
}

#[async_trait]
impl MetricSetRepository for PostgresMetricSetRepository {
    async fn find_by_owner(&self, owner: &UserId) -> Result<Vec<MetricSet>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, owner_id, name, description, metrics, created_at, updated_at
            FROM metric_sets
            WHERE owner_id = $1
            ORDER BY name ASC
            "#,
        )
        .bind(owner.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch metric sets by owner", e))?;

        rows.iter().map(row_to_metric_set).collect()
    }
}

fn row_to_metric_set(row: &PgRow) -> Result<MetricSet, DomainError> {
    let id: uuid::Uuid = column(row, "id")?;
    let created_at: chrono::DateTime<chrono::Utc> = column(row, "created_at")?;
    let updated_at: chrono::DateTime<chrono::Utc> = column(row, "updated_at")?;

    Ok(MetricSet::reconstitute(
        MetricSetId::from_uuid(id),
        owner_from_row(row)?,
        column(row, "name")?,
        column(row, "description")?,
        from_json(column(row, "metrics")?, "metrics")?,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}
