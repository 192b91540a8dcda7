//! Export formatting.
//!
//! Projects an execution plus its template into a structured report:
//! summary, step list, raw inputs, exportable outputs, and a
//! chronological timeline. Sections are opt-in; disabled sections are
//! absent from the payload.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::execution::WorkflowExecution;
use crate::domain::models::export::{
    ExportOptions, ExportPayload, ExportStep, ExportSummary, ExportWorkflowInfo, TimelineEvent,
};
use crate::domain::models::template::WorkflowTemplate;
use crate::domain::ports::{ExecutionRepository, TemplateRepository};

/// Builds export payloads from stored executions.
#[derive(Clone)]
pub struct Exporter {
    executions: Arc<dyn ExecutionRepository>,
    templates: Arc<dyn TemplateRepository>,
}

impl Exporter {
    pub fn new(
        executions: Arc<dyn ExecutionRepository>,
        templates: Arc<dyn TemplateRepository>,
    ) -> Self {
        Self { executions, templates }
    }

    /// Assemble an export for `execution_id`, or `None` when the
    /// execution or its template is missing.
    pub async fn export(
        &self,
        execution_id: Uuid,
        options: &ExportOptions,
    ) -> DomainResult<Option<ExportPayload>> {
        let Some(execution) = self.executions.get(execution_id).await? else {
            return Ok(None);
        };
        let Some(template) = self.templates.get(execution.template_id).await? else {
            return Ok(None);
        };

        let sections = options.sections;
        let payload = ExportPayload {
            workflow: ExportWorkflowInfo {
                execution_id: execution.id,
                template_id: template.id,
                title: execution.title.clone(),
                status: execution.status,
                exported_at: Utc::now(),
            },
            summary: sections.summary.then(|| build_summary(&execution, &template)),
            steps: sections.steps.then(|| build_steps(&execution, &template)),
            inputs: (sections.outputs && options.include_inputs)
                .then(|| execution.inputs.clone()),
            outputs: sections.outputs.then(|| {
                execution
                    .outputs
                    .iter()
                    .filter(|o| o.exportable)
                    .cloned()
                    .collect()
            }),
            timeline: sections
                .timeline
                .then(|| build_timeline(&execution, &template)),
        };

        Ok(Some(payload))
    }
}

fn build_summary(execution: &WorkflowExecution, template: &WorkflowTemplate) -> ExportSummary {
    let time_spent_ms = match (execution.started_at, execution.completed_at) {
        (Some(started), Some(completed)) => (completed - started).num_milliseconds().max(0),
        _ => 0,
    };

    ExportSummary {
        total_steps: template.steps.len(),
        completed_steps: execution.current_step.min(template.steps.len()),
        time_spent_ms,
        success_rate: if execution.completed_at.is_some() { 100 } else { 0 },
    }
}

fn build_steps(execution: &WorkflowExecution, template: &WorkflowTemplate) -> Vec<ExportStep> {
    template
        .steps
        .iter()
        .map(|step| ExportStep {
            name: step.name.clone(),
            description: step.description.clone(),
            step_type: step.step_type,
            completed: execution.current_step > step.order,
        })
        .collect()
}

fn build_timeline(
    execution: &WorkflowExecution,
    template: &WorkflowTemplate,
) -> Vec<TimelineEvent> {
    let step_name = |step_id: &str| {
        template
            .step(step_id)
            .map_or_else(|| step_id.to_string(), |s| s.name.clone())
    };

    let mut events = Vec::new();

    if let Some(started) = execution.started_at {
        events.push(TimelineEvent {
            timestamp: started,
            label: "Workflow started".to_string(),
        });
    }

    for input in &execution.inputs {
        events.push(TimelineEvent {
            timestamp: input.submitted_at,
            label: format!("Input provided for {}", step_name(&input.step_id)),
        });
    }

    for output in &execution.outputs {
        events.push(TimelineEvent {
            timestamp: output.produced_at,
            label: format!("Output generated for {}", step_name(&output.step_id)),
        });
    }

    if let Some(completed) = execution.completed_at {
        events.push(TimelineEvent {
            timestamp: completed,
            label: "Workflow completed".to_string(),
        });
    }

    events.sort_by_key(|e| e.timestamp);
    events
}
