//! Workflow template domain model.
//!
//! A `WorkflowTemplate` is the immutable definition of a reusable guided
//! task (e.g. "Draft a Client Alert"): an ordered list of steps, the
//! inputs each step needs, and the outputs it is expected to produce.
//! Executions reference templates by id and never mutate them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Practice-area tag for a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Client-facing letters, alerts, and updates.
    ClientCommunication,
    /// Contracts, memos, and other drafted documents.
    DocumentDrafting,
    /// New-matter intake and conflicts checks.
    MatterIntake,
    /// Patent and trademark search / portfolio work.
    IpPortfolio,
    /// Legal research and analysis tasks.
    Research,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ClientCommunication => "client_communication",
            Self::DocumentDrafting => "document_drafting",
            Self::MatterIntake => "matter_intake",
            Self::IpPortfolio => "ip_portfolio",
            Self::Research => "research",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "client_communication" => Some(Self::ClientCommunication),
            "document_drafting" => Some(Self::DocumentDrafting),
            "matter_intake" => Some(Self::MatterIntake),
            "ip_portfolio" => Some(Self::IpPortfolio),
            "research" => Some(Self::Research),
            _ => None,
        }
    }
}

/// Complexity tier used for filtering and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Simple,
    Moderate,
    Complex,
}

impl Default for Complexity {
    fn default() -> Self {
        Self::Moderate
    }
}

impl Complexity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Moderate => "moderate",
            Self::Complex => "complex",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "simple" => Some(Self::Simple),
            "moderate" => Some(Self::Moderate),
            "complex" => Some(Self::Complex),
            _ => None,
        }
    }
}

/// What kind of work a step represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepType {
    /// User uploads one or more documents.
    Upload,
    /// Automated analysis over previously supplied material.
    Analysis,
    /// Content generation (drafts, summaries, alerts).
    Generation,
    /// Human review of generated or analyzed material.
    Review,
    /// Plain data entry.
    Input,
}

impl StepType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upload => "upload",
            Self::Analysis => "analysis",
            Self::Generation => "generation",
            Self::Review => "review",
            Self::Input => "input",
        }
    }
}

/// Type-specific constraints for a step input.
///
/// Closed union: serialization and validation are exhaustive over the
/// five supported input kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputKind {
    /// A file upload, optionally restricted by extension and size.
    File {
        #[serde(default)]
        accepted_extensions: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_size_bytes: Option<u64>,
    },
    /// Free text, optionally with placeholder text for the UI.
    Text {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
    },
    /// A choice from a fixed option list.
    Selection { options: Vec<String> },
    /// A yes/no flag.
    Boolean,
    /// A calendar date.
    Date,
}

/// Declares one piece of data a step needs before it can proceed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepInputDef {
    /// Author-chosen identifier, unique within the step (e.g. "source-document").
    pub id: String,
    /// Short label shown next to the input.
    pub label: String,
    /// Longer help text.
    #[serde(default)]
    pub description: String,
    /// Kind plus type-specific constraints.
    pub kind: InputKind,
    /// Whether the step is blocked until this input is supplied.
    #[serde(default)]
    pub required: bool,
}

/// What an output produced by a step contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
    Document,
    Analysis,
    Summary,
}

/// Serialization format of a produced output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Markdown,
    Html,
    Json,
    Text,
}

/// Descriptor for an output a step is expected to produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedOutput {
    /// Human-readable name (e.g. "Risk analysis report").
    pub name: String,
    pub kind: OutputKind,
    pub format: OutputFormat,
}

/// A single step within a workflow template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowStep {
    /// Author-chosen identifier, unique within the template.
    pub id: String,
    /// Step name (e.g. "Upload source document").
    pub name: String,
    /// Description of what this step does.
    #[serde(default)]
    pub description: String,
    /// What kind of work this step represents.
    pub step_type: StepType,
    /// 0-based position within the template.
    pub order: usize,
    /// Inputs this step needs.
    #[serde(default)]
    pub inputs: Vec<StepInputDef>,
    /// Outputs this step is expected to produce.
    #[serde(default)]
    pub expected_outputs: Vec<ExpectedOutput>,
    /// Rough time estimate in minutes.
    #[serde(default)]
    pub estimated_minutes: u32,
    /// Whether the step may be skipped (reserved; skipping is not yet wired).
    #[serde(default)]
    pub optional: bool,
    /// Ids of steps that must complete before this one. Each referenced
    /// step must have a strictly smaller `order`.
    #[serde(default)]
    pub dependencies: Vec<String>,
}

/// Display metadata attached to a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DisplayMeta {
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A workflow template: the immutable definition of a guided task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowTemplate {
    /// Unique template id.
    pub id: Uuid,
    /// Template title (e.g. "Draft a Client Alert").
    pub title: String,
    /// Description of when to use this template.
    #[serde(default)]
    pub description: String,
    /// Practice-area tag.
    pub category: Category,
    /// Ordered list of steps.
    pub steps: Vec<WorkflowStep>,
    /// Estimated total duration in minutes.
    #[serde(default)]
    pub estimated_minutes: u32,
    /// Icon, color, and tags for display.
    #[serde(default)]
    pub display: DisplayMeta,
    /// Complexity tier.
    #[serde(default)]
    pub complexity: Complexity,
    /// Semantic version; new templates start at "1.0.0".
    pub version: String,
    /// Soft-delete flag; inactive templates are hidden from listings.
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WorkflowTemplate {
    /// Validate the structural invariants of the template.
    ///
    /// Steps must be non-empty with `order` running 0, 1, 2, ... in
    /// list position, step and input ids must be unique, selection
    /// inputs need at least one option, and every dependency must
    /// reference a step with a strictly smaller order.
    pub fn validate(&self) -> Result<(), String> {
        if self.title.is_empty() {
            return Err("Template title cannot be empty".to_string());
        }

        if self.steps.is_empty() {
            return Err(format!(
                "Template '{}' must have at least one step",
                self.title
            ));
        }

        for (i, step) in self.steps.iter().enumerate() {
            if step.id.is_empty() {
                return Err(format!("Step {} in '{}' has an empty id", i, self.title));
            }

            if step.order != i {
                return Err(format!(
                    "Step '{}' in '{}' has order {} but sits at position {}",
                    step.id, self.title, step.order, i
                ));
            }

            if self.steps[..i].iter().any(|s| s.id == step.id) {
                return Err(format!(
                    "Duplicate step id '{}' in '{}'",
                    step.id, self.title
                ));
            }

            for (j, input) in step.inputs.iter().enumerate() {
                if input.id.is_empty() {
                    return Err(format!(
                        "Input {} of step '{}' has an empty id",
                        j, step.id
                    ));
                }
                if step.inputs[..j].iter().any(|other| other.id == input.id) {
                    return Err(format!(
                        "Duplicate input id '{}' in step '{}'",
                        input.id, step.id
                    ));
                }
                if let InputKind::Selection { options } = &input.kind {
                    if options.is_empty() {
                        return Err(format!(
                            "Selection input '{}' in step '{}' has no options",
                            input.id, step.id
                        ));
                    }
                }
            }

            for dep in &step.dependencies {
                let Some(target) = self.steps.iter().find(|s| &s.id == dep) else {
                    return Err(format!(
                        "Step '{}' depends on unknown step '{}'",
                        step.id, dep
                    ));
                };
                if target.order >= step.order {
                    return Err(format!(
                        "Step '{}' depends on '{}' which does not come before it",
                        step.id, dep
                    ));
                }
            }
        }

        Ok(())
    }

    /// Find a step by id.
    pub fn step(&self, step_id: &str) -> Option<&WorkflowStep> {
        self.steps.iter().find(|s| s.id == step_id)
    }

    /// Whether this template passes the given listing filters.
    ///
    /// The active flag is checked by the store, not here.
    pub fn matches(&self, filters: &TemplateFilters) -> bool {
        if let Some(category) = filters.category {
            if self.category != category {
                return false;
            }
        }

        if let Some(complexity) = filters.complexity {
            if self.complexity != complexity {
                return false;
            }
        }

        if let Some(search) = &filters.search {
            let needle = search.to_lowercase();
            let in_title = self.title.to_lowercase().contains(&needle);
            let in_description = self.description.to_lowercase().contains(&needle);
            let in_tags = self
                .display
                .tags
                .iter()
                .any(|t| t.to_lowercase().contains(&needle));
            if !(in_title || in_description || in_tags) {
                return false;
            }
        }

        if !filters.tags.is_empty() {
            let any_tag = filters
                .tags
                .iter()
                .any(|t| self.display.tags.iter().any(|have| have == t));
            if !any_tag {
                return false;
            }
        }

        true
    }
}

/// Filters accepted by the template listing operation.
///
/// All criteria are conjunctive; an empty filter matches everything.
#[derive(Debug, Clone, Default)]
pub struct TemplateFilters {
    /// Exact category match.
    pub category: Option<Category>,
    /// Exact complexity match.
    pub complexity: Option<Complexity>,
    /// Case-insensitive substring match against title, description, and tags.
    pub search: Option<String>,
    /// Match if any of these tags is present on the template.
    pub tags: Vec<String>,
}

/// Caller-supplied fields for creating a template.
///
/// The store assigns id, version, timestamps, and the active flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTemplate {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: Category,
    pub steps: Vec<WorkflowStep>,
    #[serde(default)]
    pub estimated_minutes: u32,
    #[serde(default)]
    pub display: DisplayMeta,
    #[serde(default)]
    pub complexity: Complexity,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::builtin;

    fn minimal_step(id: &str, order: usize) -> WorkflowStep {
        WorkflowStep {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            step_type: StepType::Input,
            order,
            inputs: vec![],
            expected_outputs: vec![],
            estimated_minutes: 5,
            optional: false,
            dependencies: vec![],
        }
    }

    fn minimal_template(steps: Vec<WorkflowStep>) -> WorkflowTemplate {
        WorkflowTemplate {
            id: Uuid::new_v4(),
            title: "Test template".to_string(),
            description: String::new(),
            category: Category::Research,
            steps,
            estimated_minutes: 10,
            display: DisplayMeta::default(),
            complexity: Complexity::Simple,
            version: "1.0.0".to_string(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_validate_minimal() {
        let tpl = minimal_template(vec![minimal_step("a", 0), minimal_step("b", 1)]);
        assert!(tpl.validate().is_ok());
    }

    #[test]
    fn test_validate_no_steps() {
        let tpl = minimal_template(vec![]);
        assert!(tpl.validate().is_err());
    }

    #[test]
    fn test_validate_order_gap() {
        let tpl = minimal_template(vec![minimal_step("a", 0), minimal_step("b", 2)]);
        let err = tpl.validate().unwrap_err();
        assert!(err.contains("order"));
    }

    #[test]
    fn test_validate_duplicate_step_id() {
        let tpl = minimal_template(vec![minimal_step("a", 0), minimal_step("a", 1)]);
        let err = tpl.validate().unwrap_err();
        assert!(err.contains("Duplicate step id"));
    }

    #[test]
    fn test_validate_forward_dependency() {
        let mut early = minimal_step("a", 0);
        early.dependencies = vec!["b".to_string()];
        let tpl = minimal_template(vec![early, minimal_step("b", 1)]);
        let err = tpl.validate().unwrap_err();
        assert!(err.contains("does not come before"));
    }

    #[test]
    fn test_validate_unknown_dependency() {
        let mut step = minimal_step("a", 0);
        step.dependencies = vec!["ghost".to_string()];
        let tpl = minimal_template(vec![step]);
        let err = tpl.validate().unwrap_err();
        assert!(err.contains("unknown step"));
    }

    #[test]
    fn test_validate_selection_without_options() {
        let mut step = minimal_step("a", 0);
        step.inputs = vec![StepInputDef {
            id: "choice".to_string(),
            label: "Choice".to_string(),
            description: String::new(),
            kind: InputKind::Selection { options: vec![] },
            required: true,
        }];
        let tpl = minimal_template(vec![step]);
        assert!(tpl.validate().is_err());
    }

    #[test]
    fn test_filters_category_and_search() {
        let tpl = minimal_template(vec![minimal_step("a", 0)]);

        let by_category = TemplateFilters {
            category: Some(Category::Research),
            ..Default::default()
        };
        assert!(tpl.matches(&by_category));

        let wrong_category = TemplateFilters {
            category: Some(Category::MatterIntake),
            ..Default::default()
        };
        assert!(!tpl.matches(&wrong_category));

        let by_search = TemplateFilters {
            search: Some("TEST".to_string()),
            ..Default::default()
        };
        assert!(tpl.matches(&by_search), "search is case-insensitive");

        let no_match = TemplateFilters {
            search: Some("zebra".to_string()),
            ..Default::default()
        };
        assert!(!tpl.matches(&no_match));
    }

    #[test]
    fn test_filters_tags_any_match() {
        let mut tpl = minimal_template(vec![minimal_step("a", 0)]);
        tpl.display.tags = vec!["alerts".to_string(), "client".to_string()];

        let filters = TemplateFilters {
            tags: vec!["client".to_string(), "unrelated".to_string()],
            ..Default::default()
        };
        assert!(tpl.matches(&filters));

        let miss = TemplateFilters {
            tags: vec!["unrelated".to_string()],
            ..Default::default()
        };
        assert!(!tpl.matches(&miss));
    }

    #[test]
    fn test_builtin_templates_validate() {
        for tpl in builtin::builtin_templates() {
            assert!(
                tpl.validate().is_ok(),
                "built-in template '{}' failed validation: {:?}",
                tpl.title,
                tpl.validate()
            );
            assert!(tpl.is_active);
            assert_eq!(tpl.version, "1.0.0");
        }
    }

    #[test]
    fn test_serde_roundtrip() {
        let tpl = builtin::client_alert_template();
        let json = serde_json::to_string(&tpl).unwrap();
        let back: WorkflowTemplate = serde_json::from_str(&json).unwrap();
        assert_eq!(tpl, back);
    }

    #[test]
    fn test_step_lookup() {
        let tpl = minimal_template(vec![minimal_step("a", 0), minimal_step("b", 1)]);
        assert!(tpl.step("b").is_some());
        assert!(tpl.step("missing").is_none());
    }
}
