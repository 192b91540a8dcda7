//! Key-value implementation of the `MetricsRepository`.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use super::blob::{load_blob, store_blob};
use crate::domain::errors::DomainResult;
use crate::domain::models::metrics::WorkflowMetrics;
use crate::domain::ports::{KeyValueStore, MetricsRepository};

/// Blob key for the template-id to metrics map.
pub const METRICS_KEY: &str = "workflow_metrics";

/// Stores all metrics as one JSON map under a single key.
#[derive(Clone)]
pub struct KvMetricsRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KvMetricsRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl MetricsRepository for KvMetricsRepository {
    async fn get(&self, template_id: Uuid) -> DomainResult<Option<WorkflowMetrics>> {
        let metrics: HashMap<Uuid, WorkflowMetrics> =
            load_blob(self.store.as_ref(), METRICS_KEY).await?;
        Ok(metrics.get(&template_id).cloned())
    }

    async fn get_all(&self) -> DomainResult<HashMap<Uuid, WorkflowMetrics>> {
        load_blob(self.store.as_ref(), METRICS_KEY).await
    }

    async fn save(&self, template_id: Uuid, metrics: &WorkflowMetrics) -> DomainResult<()> {
        let mut all: HashMap<Uuid, WorkflowMetrics> =
            load_blob(self.store.as_ref(), METRICS_KEY).await?;
        all.insert(template_id, metrics.clone());
        store_blob(self.store.as_ref(), METRICS_KEY, &all).await
    }
}
