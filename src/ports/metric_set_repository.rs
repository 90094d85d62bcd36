//! Metric set repository port.

use async_trait::async_trait;

use crate::domain::assessment::MetricSet;
use crate::domain::foundation::{DomainError, MetricSetId, Repository, UserId};

/// Repository port for MetricSet aggregate persistence.
#[async_trait]
pub trait MetricSetRepository: Repository<MetricSet, MetricSetId> {
    /// Find all metric sets owned by a user, ordered by name.
    async fn find_by_owner(&self, owner: &UserId) -> Result<Vec<MetricSet>, DomainError>;
}
