//! Template store service.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::template::{NewTemplate, TemplateFilters, WorkflowTemplate};
use crate::domain::ports::TemplateRepository;

/// Read/create access to workflow templates.
///
/// Listings only ever surface active templates; missing templates on
/// lookup are a normal branch (`None`), not an error.
#[derive(Clone)]
pub struct TemplateStore {
    repo: Arc<dyn TemplateRepository>,
}

impl TemplateStore {
    pub fn new(repo: Arc<dyn TemplateRepository>) -> Self {
        Self { repo }
    }

    /// Active templates matching `filters`, in store order.
    pub async fn list(&self, filters: &TemplateFilters) -> DomainResult<Vec<WorkflowTemplate>> {
        let templates = self.repo.list().await?;
        Ok(templates
            .into_iter()
            .filter(|t| t.is_active && t.matches(filters))
            .collect())
    }

    /// Exact lookup by id, active or not.
    pub async fn get(&self, id: Uuid) -> DomainResult<Option<WorkflowTemplate>> {
        self.repo.get(id).await
    }

    /// Create a template from caller-supplied fields.
    ///
    /// Assigns a fresh id, sets both timestamps to now and the version
    /// to "1.0.0", validates the structural invariants, and persists.
    pub async fn create(&self, new: NewTemplate) -> DomainResult<WorkflowTemplate> {
        let now = Utc::now();
        let template = WorkflowTemplate {
            id: Uuid::new_v4(),
            title: new.title,
            description: new.description,
            category: new.category,
            steps: new.steps,
            estimated_minutes: new.estimated_minutes,
            display: new.display,
            complexity: new.complexity,
            version: "1.0.0".to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        template
            .validate()
            .map_err(DomainError::ValidationFailed)?;
        self.repo.save(&template).await?;

        tracing::info!(template_id = %template.id, title = %template.title, "Created template");
        Ok(template)
    }

    /// Soft-delete: clear the active flag so the template disappears
    /// from listings while existing executions keep resolving it.
    /// Returns whether a template was found.
    pub async fn deactivate(&self, id: Uuid) -> DomainResult<bool> {
        let Some(mut template) = self.repo.get(id).await? else {
            return Ok(false);
        };
        template.is_active = false;
        template.updated_at = Utc::now();
        self.repo.save(&template).await?;
        tracing::info!(template_id = %id, "Deactivated template");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::kv::{KvTemplateRepository, MemoryKvStore};
    use crate::domain::models::builtin;
    use crate::domain::models::template::{Category, Complexity, DisplayMeta};

    fn store() -> TemplateStore {
        TemplateStore::new(Arc::new(KvTemplateRepository::new(Arc::new(
            MemoryKvStore::new(),
        ))))
    }

    async fn seeded_store() -> TemplateStore {
        let store = store();
        for tpl in builtin::builtin_templates() {
            store.repo.save(&tpl).await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_list_excludes_inactive() {
        let store = seeded_store().await;
        assert_eq!(
            store.list(&TemplateFilters::default()).await.unwrap().len(),
            3
        );

        assert!(store.deactivate(builtin::CLIENT_ALERT_ID).await.unwrap());
        let listed = store.list(&TemplateFilters::default()).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed.iter().all(|t| t.is_active));
    }

    #[tokio::test]
    async fn test_deactivated_template_still_resolves_by_id() {
        let store = seeded_store().await;
        store.deactivate(builtin::CLIENT_ALERT_ID).await.unwrap();
        assert!(store
            .get(builtin::CLIENT_ALERT_ID)
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_list_with_filters() {
        let store = seeded_store().await;

        let ip_only = store
            .list(&TemplateFilters {
                category: Some(Category::IpPortfolio),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(ip_only.len(), 1);
        assert_eq!(ip_only[0].id, builtin::TRADEMARK_SCREENING_ID);

        let searched = store
            .list(&TemplateFilters {
                search: Some("engagement".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(searched.len(), 1);
    }

    #[tokio::test]
    async fn test_create_assigns_identity_fields() {
        let store = store();
        let template = builtin::client_alert_template();

        let created = store
            .create(NewTemplate {
                title: "Custom intake".to_string(),
                description: String::new(),
                category: Category::MatterIntake,
                steps: template.steps,
                estimated_minutes: 30,
                display: DisplayMeta::default(),
                complexity: Complexity::Simple,
            })
            .await
            .unwrap();

        assert_eq!(created.version, "1.0.0");
        assert!(created.is_active);
        assert_eq!(created.created_at, created.updated_at);
        assert!(store.get(created.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_steps() {
        let store = store();
        let result = store
            .create(NewTemplate {
                title: "Broken".to_string(),
                description: String::new(),
                category: Category::Research,
                steps: vec![],
                estimated_minutes: 0,
                display: DisplayMeta::default(),
                complexity: Complexity::Simple,
            })
            .await;
        assert!(matches!(result, Err(DomainError::ValidationFailed(_))));
    }

    #[tokio::test]
    async fn test_deactivate_missing_template() {
        assert!(!store().deactivate(Uuid::new_v4()).await.unwrap());
    }
}
