//! Execution repository port.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::execution::WorkflowExecution;

/// Repository interface for workflow execution persistence.
///
/// Executions are never physically deleted; they persist indefinitely.
#[async_trait]
pub trait ExecutionRepository: Send + Sync {
    /// All stored executions, in insertion order.
    async fn list(&self) -> DomainResult<Vec<WorkflowExecution>>;

    /// Exact lookup by id.
    async fn get(&self, id: Uuid) -> DomainResult<Option<WorkflowExecution>>;

    /// Insert or replace an execution by id.
    async fn save(&self, execution: &WorkflowExecution) -> DomainResult<()>;
}
