//! Key-value implementation of the `ExecutionRepository`.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use super::blob::{load_blob, store_blob};
use crate::domain::errors::DomainResult;
use crate::domain::models::execution::WorkflowExecution;
use crate::domain::ports::{ExecutionRepository, KeyValueStore};

/// Blob key for the execution array.
pub const EXECUTIONS_KEY: &str = "workflow_executions";

/// Stores all executions as one ordered JSON array under a single key.
#[derive(Clone)]
pub struct KvExecutionRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KvExecutionRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ExecutionRepository for KvExecutionRepository {
    async fn list(&self) -> DomainResult<Vec<WorkflowExecution>> {
        load_blob(self.store.as_ref(), EXECUTIONS_KEY).await
    }

    async fn get(&self, id: Uuid) -> DomainResult<Option<WorkflowExecution>> {
        let executions: Vec<WorkflowExecution> =
            load_blob(self.store.as_ref(), EXECUTIONS_KEY).await?;
        Ok(executions.into_iter().find(|e| e.id == id))
    }

    async fn save(&self, execution: &WorkflowExecution) -> DomainResult<()> {
        let mut executions: Vec<WorkflowExecution> =
            load_blob(self.store.as_ref(), EXECUTIONS_KEY).await?;

        if let Some(existing) = executions.iter_mut().find(|e| e.id == execution.id) {
            *existing = execution.clone();
        } else {
            executions.push(execution.clone());
        }

        store_blob(self.store.as_ref(), EXECUTIONS_KEY, &executions).await
    }
}
