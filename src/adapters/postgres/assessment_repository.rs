//! PostgreSQL implementation of AssessmentRepository.
//!
//! Metric values and site-visit ratings are stored as JSONB; derived scores
//! get their own columns so they can be filtered and sorted in SQL.

use async_trait::async_trait;
use sqlx::postgres::{PgExecutor, PgRow};
use sqlx::PgPool;

use super::{column, from_json, owner_from_row, to_json};
use crate::domain::assessment::SiteAssessment;
use crate::domain::foundation::{
    AssessmentId, DomainError, ErrorCode, MetricSetId, Percentage, Repository, Timestamp, UserId,
};
use crate::domain::scoring::SignalScore;
use crate::ports::AssessmentRepository;

const SELECT_COLUMNS: &str = r#"
    SELECT id, owner_id, metric_set_id, site_name, address, metric_values,
           site_visit_ratings, overall_signal_score, completion_percentage,
           created_at, updated_at
    FROM site_assessments
"#;

/// PostgreSQL implementation of AssessmentRepository.
#[derive(Clone)]
pub struct PostgresAssessmentRepository {
    pool: PgPool,
}

impl PostgresAssessmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<SiteAssessment, AssessmentId> for PostgresAssessmentRepository {
    async fn find_by_id(&self, id: AssessmentId) -> Result<Option<SiteAssessment>, DomainError> {
        let row = sqlx::query(&format!("{} WHERE id = $1", SELECT_COLUMNS))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch assessment", e))?;

        row.map(|row| row_to_assessment(&row)).transpose()
    }

    async fn save(&self, assessment: &SiteAssessment) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO site_assessments (
                id, owner_id, metric_set_id, site_name, address, metric_values,
                site_visit_ratings, overall_signal_score, completion_percentage,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(assessment.id().as_uuid())
        .bind(assessment.owner().as_str())
        .bind(assessment.metric_set_id().as_uuid())
        .bind(assessment.site_name())
        .bind(assessment.address())
        .bind(to_json(assessment.metric_values(), "metric_values")?)
        .bind(to_json(assessment.site_visit_ratings(), "site_visit_ratings")?)
        .bind(assessment.overall_signal_score().map(|s| s.value()))
        .bind(i16::from(assessment.completion_percentage().value()))
        .bind(assessment.created_at().as_datetime())
        .bind(assessment.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to insert assessment", e))?;

        Ok(())
    }

    async fn update(&self, assessment: &SiteAssessment) -> Result<(), DomainError> {
        update_row(&self.pool, assessment).await
    }

    async fn delete(&self, id: AssessmentId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM site_assessments WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete assessment", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::AssessmentNotFound,
                format!("Assessment not found: {}", id),
            ));
        }

        Ok(())
    }
}

#[async_trait]
impl AssessmentRepository for PostgresAssessmentRepository {
    async fn find_by_metric_set(
        &self,
        metric_set_id: MetricSetId,
    ) -> Result<Vec<SiteAssessment>, DomainError> {
        let rows = sqlx::query(&format!(
            "{} WHERE metric_set_id = $1 ORDER BY created_at ASC",
            SELECT_COLUMNS
        ))
        .bind(metric_set_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch assessments by metric set", e))?;

        rows.iter().map(row_to_assessment).collect()
    }

    async fn find_by_owner(&self, owner: &UserId) -> Result<Vec<SiteAssessment>, DomainError> {
        let rows = sqlx::query(&format!(
            "{} WHERE owner_id = $1 ORDER BY updated_at DESC",
            SELECT_COLUMNS
        ))
        .bind(owner.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch assessments by owner", e))?;

        rows.iter().map(row_to_assessment).collect()
    }

    async fn update_many(&self, assessments: &[SiteAssessment]) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to start transaction", e))?;

        // Dropping the transaction on an early return rolls it back.
        for assessment in assessments {
            update_row(&mut *tx, assessment).await?;
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit assessment batch", e))?;

        Ok(())
    }
}

async fn update_row<'e, E>(executor: E, assessment: &SiteAssessment) -> Result<(), DomainError>
where
    E: PgExecutor<'e>,
{
    let result = sqlx::query(
        r#"
        UPDATE site_assessments SET
            site_name = $2,
            address = $3,
            metric_values = $4,
            site_visit_ratings = $5,
            overall_signal_score = $6,
            completion_percentage = $7,
            updated_at = $8
        WHERE id = $1
        "#,
    )
    .bind(assessment.id().as_uuid())
    .bind(assessment.site_name())
    .bind(assessment.address())
    .bind(to_json(assessment.metric_values(), "metric_values")?)
    .bind(to_json(assessment.site_visit_ratings(), "site_visit_ratings")?)
    .bind(assessment.overall_signal_score().map(|s| s.value()))
    .bind(i16::from(assessment.completion_percentage().value()))
    .bind(assessment.updated_at().as_datetime())
    .execute(executor)
    .await
    .map_err(|e| DomainError::database("Failed to update assessment", e))?;

    if result.rows_affected() == 0 {
        return Err(DomainError::new(
            ErrorCode::AssessmentNotFound,
            format!("Assessment not found: {}", assessment.id()),
        ));
    }

    Ok(())
}

fn row_to_assessment(row: &PgRow) -> Result<SiteAssessment, DomainError> {
    let id: uuid::Uuid = column(row, "id")?;
    let metric_set_id: uuid::Uuid = column(row, "metric_set_id")?;
    let overall: Option<f64> = column(row, "overall_signal_score")?;
    let completion: i16 = column(row, "completion_percentage")?;
    let created_at: chrono::DateTime<chrono::Utc> = column(row, "created_at")?;
    let updated_at: chrono::DateTime<chrono::Utc> = column(row, "updated_at")?;

    let completion = u8::try_from(completion)
        .ok()
        .and_then(|v| Percentage::try_new(v).ok())
        .ok_or_else(|| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid completion_percentage: {}", completion),
            )
        })?;

    Ok(SiteAssessment::reconstitute(
        AssessmentId::from_uuid(id),
        owner_from_row(row)?,
        MetricSetId::from_uuid(metric_set_id),
        column(row, "site_name")?,
        column(row, "address")?,
        from_json(column(row, "metric_values")?, "metric_values")?,
        from_json(column(row, "site_visit_ratings")?, "site_visit_ratings")?,
        overall.and_then(SignalScore::clamped),
        completion,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}
