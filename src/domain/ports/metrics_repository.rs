//! Metrics repository port.

use std::collections::HashMap;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::metrics::WorkflowMetrics;

/// Repository interface for per-template metrics persistence.
#[async_trait]
pub trait MetricsRepository: Send + Sync {
    /// Metrics for one template, if any executions have completed.
    async fn get(&self, template_id: Uuid) -> DomainResult<Option<WorkflowMetrics>>;

    /// The full template-id to metrics map.
    async fn get_all(&self) -> DomainResult<HashMap<Uuid, WorkflowMetrics>>;

    /// Insert or replace the metrics entry for a template.
    async fn save(&self, template_id: Uuid, metrics: &WorkflowMetrics) -> DomainResult<()>;
}
