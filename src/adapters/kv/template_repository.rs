//! Key-value implementation of the `TemplateRepository`.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use super::blob::{load_blob, store_blob};
use crate::domain::errors::DomainResult;
use crate::domain::models::template::WorkflowTemplate;
use crate::domain::ports::{KeyValueStore, TemplateRepository};

/// Blob key for the template array.
pub const TEMPLATES_KEY: &str = "workflow_templates";

/// Stores all templates as one ordered JSON array under a single key.
#[derive(Clone)]
pub struct KvTemplateRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KvTemplateRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl TemplateRepository for KvTemplateRepository {
    async fn list(&self) -> DomainResult<Vec<WorkflowTemplate>> {
        load_blob(self.store.as_ref(), TEMPLATES_KEY).await
    }

    async fn get(&self, id: Uuid) -> DomainResult<Option<WorkflowTemplate>> {
        let templates: Vec<WorkflowTemplate> =
            load_blob(self.store.as_ref(), TEMPLATES_KEY).await?;
        Ok(templates.into_iter().find(|t| t.id == id))
    }

    async fn save(&self, template: &WorkflowTemplate) -> DomainResult<()> {
        let mut templates: Vec<WorkflowTemplate> =
            load_blob(self.store.as_ref(), TEMPLATES_KEY).await?;

        if let Some(existing) = templates.iter_mut().find(|t| t.id == template.id) {
            *existing = template.clone();
        } else {
            templates.push(template.clone());
        }

        store_blob(self.store.as_ref(), TEMPLATES_KEY, &templates).await
    }
}
