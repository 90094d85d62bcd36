//! Assessment repository port.
//!
//! Persists `SiteAssessment` aggregates. The base CRUD operations come from
//! [`Repository`]; this port adds the lookups recalculation needs.

use async_trait::async_trait;

use crate::domain::assessment::SiteAssessment;
use crate::domain::foundation::{AssessmentId, DomainError, MetricSetId, Repository, UserId};

/// Repository port for SiteAssessment aggregate persistence.
#[async_trait]
pub trait AssessmentRepository: Repository<SiteAssessment, AssessmentId> {
    /// Find every assessment scored against a metric set.
    ///
    /// Used to cascade recalculation after targets change.
    async fn find_by_metric_set(
        &self,
        metric_set_id: MetricSetId,
    ) -> Result<Vec<SiteAssessment>, DomainError>;

    /// Find all assessments owned by a user, most recently updated first.
    async fn find_by_owner(&self, owner: &UserId) -> Result<Vec<SiteAssessment>, DomainError>;

    /// Update several assessments all-or-nothing. If any row fails, none of
    /// them are changed.
    async fn update_many(&self, assessments: &[SiteAssessment]) -> Result<(), DomainError>;
}
