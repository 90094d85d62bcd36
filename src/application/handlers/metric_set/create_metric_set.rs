//! CreateMetricSetHandler - Command handler for defining a new metric set.

use std::sync::Arc;

use crate::domain::assessment::{AssessmentError, MetricDefinition, MetricSet};
use crate::domain::foundation::{CommandMetadata, Repository};
use crate::ports::MetricSetRepository;

/// Command to create a metric set owned by the caller.
#[derive(Debug, Clone)]
pub struct CreateMetricSetCommand {
    pub name: String,
    pub description: Option<String>,
    pub metrics: Vec<MetricDefinition>,
}

/// Handler for creating metric sets.
pub struct CreateMetricSetHandler {
    repository: Arc<dyn MetricSetRepository>,
}

impl CreateMetricSetHandler {
    pub fn new(repository: Arc<dyn MetricSetRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: CreateMetricSetCommand,
        metadata: CommandMetadata,
    ) -> Result<MetricSet, AssessmentError> {
        let set = MetricSet::new(metadata.user_id, cmd.name, cmd.description, cmd.metrics)?;

        self.repository.save(&set).await?;

        tracing::info!(
            metric_set_id = %set.id(),
            metrics = set.metrics().len(),
            "metric set created"
        );

        Ok(set)
    }
}
