//! PostgreSQL implementation of TerritoryAnalysisRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use super::{column, from_json, owner_from_row, to_json};
use crate::domain::foundation::{
    DomainError, ErrorCode, Repository, TerritoryAnalysisId, Timestamp, UserId,
};
use crate::domain::territory::TerritoryAnalysis;
use crate::ports::TerritoryAnalysisRepository;

/// PostgreSQL implementation of TerritoryAnalysisRepository.
#[derive(Clone)]
pub struct PostgresTerritoryAnalysisRepository {
    pool: PgPool,
}

impl PostgresTerritoryAnalysisRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<TerritoryAnalysis, TerritoryAnalysisId> for PostgresTerritoryAnalysisRepository {
    async fn find_by_id(
        &self,
        id: TerritoryAnalysisId,
    ) -> Result<Option<TerritoryAnalysis>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, owner_id, territory, criteria, markets, created_at
            FROM territory_analyses
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch territory analysis", e))?;

        row.map(|row| row_to_analysis(&row)).transpose()
    }

    async fn save(&self, analysis: &TerritoryAnalysis) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO territory_analyses (id, owner_id, territory, criteria, markets, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(analysis.id().as_uuid())
        .bind(analysis.owner().as_str())
        .bind(analysis.territory())
        .bind(to_json(analysis.criteria(), "criteria")?)
        .bind(to_json(analysis.markets(), "markets")?)
        .bind(analysis.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to insert territory analysis", e))?;

        Ok(())
    }

    async fn update(&self, analysis: &TerritoryAnalysis) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE territory_analyses SET criteria = $2, markets = $3
            WHERE id = $1
            "#,
        )
        .bind(analysis.id().as_uuid())
        .bind(to_json(analysis.criteria(), "criteria")?)
        .bind(to_json(analysis.markets(), "markets")?)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to update territory analysis", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::TerritoryAnalysisNotFound,
                format!("Territory analysis not found: {}", analysis.id()),
            ));
        }

        Ok(())
    }

    async fn delete(&self, id: TerritoryAnalysisId) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM territory_analyses WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete territory analysis", e))?;

        Ok(())
    }
}

#[async_trait]
impl TerritoryAnalysisRepository for PostgresTerritoryAnalysisRepository {
    async fn find_by_owner(&self, owner: &UserId) -> Result<Vec<TerritoryAnalysis>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, owner_id, territory, criteria, markets, created_at
            FROM territory_analyses
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch territory analyses by owner", e))?;

        rows.iter().map(row_to_analysis).collect()
    }
}

fn row_to_analysis(row: &PgRow) -> Result<TerritoryAnalysis, DomainError> {
    let id: uuid::Uuid = column(row, "id")?;
    let created_at: chrono::DateTime<chrono::Utc> = column(row, "created_at")?;

    Ok(TerritoryAnalysis::reconstitute(
        TerritoryAnalysisId::from_uuid(id),
        owner_from_row(row)?,
        column(row, "territory")?,
        from_json(column(row, "criteria")?, "criteria")?,
        from_json(column(row, "markets")?, "markets")?,
        Timestamp::from_datetime(created_at),
    ))
}
