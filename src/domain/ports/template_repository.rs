//! Template repository port.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::template::WorkflowTemplate;

/// Repository interface for workflow template persistence.
#[async_trait]
pub trait TemplateRepository: Send + Sync {
    /// All stored templates, active or not, in insertion order.
    async fn list(&self) -> DomainResult<Vec<WorkflowTemplate>>;

    /// Exact lookup by id.
    async fn get(&self, id: Uuid) -> DomainResult<Option<WorkflowTemplate>>;

    /// Insert or replace a template by id.
    async fn save(&self, template: &WorkflowTemplate) -> DomainResult<()>;
}
