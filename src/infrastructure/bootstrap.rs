//! Application wiring.
//!
//! Builds the service graph from a loaded configuration: opens the
//! file-backed key-value store, constructs the repositories, runs
//! migrations, and hands out the services the CLI drives.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::adapters::kv::{
    migrations, JsonFileKvStore, KvExecutionRepository, KvMetricsRepository, KvTemplateRepository,
};
use crate::domain::models::config::Config;
use crate::domain::ports::{ExecutionRepository, KeyValueStore, MetricsRepository, TemplateRepository};
use crate::services::{ExecutionEngine, Exporter, MetricsAggregator, TemplateStore};

/// Fully wired services over a shared store.
pub struct AppContext {
    pub templates: TemplateStore,
    pub engine: ExecutionEngine,
    pub exporter: Exporter,
    pub metrics: MetricsAggregator,
}

impl AppContext {
    /// Open the data directory and wire everything up.
    pub async fn init(config: &Config) -> Result<Self> {
        let store: Arc<dyn KeyValueStore> = Arc::new(
            JsonFileKvStore::open(&config.data_dir)
                .with_context(|| format!("Failed to open data directory {}", config.data_dir))?,
        );
        Self::from_store(store, config.seed_templates).await
    }

    /// Wire services over an arbitrary store. Exposed for tests that
    /// run against an in-memory store.
    pub async fn from_store(store: Arc<dyn KeyValueStore>, seed_templates: bool) -> Result<Self> {
        let template_repo: Arc<dyn TemplateRepository> =
            Arc::new(KvTemplateRepository::new(store.clone()));
        let execution_repo: Arc<dyn ExecutionRepository> =
            Arc::new(KvExecutionRepository::new(store.clone()));
        let metrics_repo: Arc<dyn MetricsRepository> =
            Arc::new(KvMetricsRepository::new(store.clone()));

        if seed_templates {
            migrations::run(store.as_ref(), template_repo.as_ref())
                .await
                .context("Migrations failed")?;
        }

        let metrics = MetricsAggregator::new(metrics_repo);
        Ok(Self {
            templates: TemplateStore::new(template_repo.clone()),
            engine: ExecutionEngine::new(
                execution_repo.clone(),
                template_repo.clone(),
                metrics.clone(),
            ),
            exporter: Exporter::new(execution_repo, template_repo),
            metrics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::kv::MemoryKvStore;
    use crate::domain::models::TemplateFilters;

    #[tokio::test]
    async fn test_init_seeds_builtin_templates() {
        let context = AppContext::from_store(Arc::new(MemoryKvStore::new()), true)
            .await
            .unwrap();
        let templates = context
            .templates
            .list(&TemplateFilters::default())
            .await
            .unwrap();
        assert_eq!(templates.len(), 3);
    }

    #[tokio::test]
    async fn test_seeding_can_be_disabled() {
        let context = AppContext::from_store(Arc::new(MemoryKvStore::new()), false)
            .await
            .unwrap();
        let templates = context
            .templates
            .list(&TemplateFilters::default())
            .await
            .unwrap();
        assert!(templates.is_empty());
    }
}
