//! Per-template metrics aggregation.
//!
//! The aggregator is fed by the execution engine exactly once per
//! execution, on the transition into `completed`. The metrics blob is
//! written independently of the execution blob; a crash between the two
//! writes can leave metrics one execution behind, which is an accepted
//! inconsistency window.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::execution::{ExecutionStatus, WorkflowExecution};
use crate::domain::models::metrics::{MetricsSummary, WorkflowMetrics};
use crate::domain::ports::MetricsRepository;

/// Accumulates per-template execution statistics.
#[derive(Clone)]
pub struct MetricsAggregator {
    repo: Arc<dyn MetricsRepository>,
}

impl MetricsAggregator {
    pub fn new(repo: Arc<dyn MetricsRepository>) -> Self {
        Self { repo }
    }

    /// Fold a finished execution into the template's aggregates.
    ///
    /// Completion time is `completed_at - started_at` in milliseconds,
    /// 0 when either timestamp is missing.
    pub async fn record_completion(
        &self,
        template_id: Uuid,
        execution: &WorkflowExecution,
    ) -> DomainResult<()> {
        let completion_ms = match (execution.started_at, execution.completed_at) {
            (Some(started), Some(completed)) => {
                (completed - started).num_milliseconds().max(0) as f64
            }
            _ => 0.0,
        };

        let mut metrics = self
            .repo
            .get(template_id)
            .await?
            .unwrap_or_default();
        metrics.record(
            completion_ms,
            execution.status == ExecutionStatus::Completed,
        );
        self.repo.save(template_id, &metrics).await?;

        tracing::info!(
            template_id = %template_id,
            execution_id = %execution.id,
            completion_ms,
            total = metrics.total_executions,
            "Recorded execution completion"
        );
        Ok(())
    }

    /// Stored metrics for one template.
    pub async fn get(&self, template_id: Uuid) -> DomainResult<Option<WorkflowMetrics>> {
        self.repo.get(template_id).await
    }

    /// Aggregate across all templates.
    pub async fn overall(&self) -> DomainResult<MetricsSummary> {
        let all = self.repo.get_all().await?;
        Ok(MetricsSummary::from_metrics(all.values()))
    }
}
