//! Workflow execution engine.
//!
//! Instantiates templates into stateful runs and drives them through
//! the status state machine:
//!
//! ```text
//! not_started --complete_step(first)--> in_progress
//! in_progress --complete_step(last)---> completed   (terminal)
//! in_progress --pause--> paused --resume--> in_progress
//! ```
//!
//! `complete_step` deliberately does not enforce step readiness;
//! `can_proceed` is advisory and exposed on the read path via
//! [`calculate_progress`](super::progress::calculate_progress). The
//! engine trusts its caller, keeping the mutation path simple.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use super::metrics_aggregator::MetricsAggregator;
use super::progress::{calculate_progress, WorkflowProgress};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::execution::{
    ExecutionStatus, ProgressSummary, StepInputValue, StepOutputValue, WorkflowExecution,
};
use crate::domain::ports::{ExecutionRepository, TemplateRepository};

/// Drives workflow executions against their templates.
#[derive(Clone)]
pub struct ExecutionEngine {
    executions: Arc<dyn ExecutionRepository>,
    templates: Arc<dyn TemplateRepository>,
    metrics: MetricsAggregator,
}

impl ExecutionEngine {
    pub fn new(
        executions: Arc<dyn ExecutionRepository>,
        templates: Arc<dyn TemplateRepository>,
        metrics: MetricsAggregator,
    ) -> Self {
        Self { executions, templates, metrics }
    }

    /// Instantiate a template into a new run.
    ///
    /// The one hard failure in the engine: an unknown `template_id`
    /// is an error because there is no execution to hand back.
    pub async fn create_execution(
        &self,
        template_id: Uuid,
        title: Option<String>,
        user_id: &str,
    ) -> DomainResult<WorkflowExecution> {
        let template = self
            .templates
            .get(template_id)
            .await?
            .ok_or(DomainError::TemplateNotFound(template_id))?;

        let execution = WorkflowExecution {
            id: Uuid::new_v4(),
            template_id,
            title: title.unwrap_or_else(|| template.title.clone()),
            status: ExecutionStatus::NotStarted,
            current_step: 0,
            started_at: Some(Utc::now()),
            paused_at: None,
            completed_at: None,
            context: std::collections::HashMap::new(),
            inputs: vec![],
            outputs: vec![],
            user_id: user_id.to_string(),
            progress: ProgressSummary::new(0, template.steps.len()),
        };

        self.executions.save(&execution).await?;
        tracing::info!(
            execution_id = %execution.id,
            template_id = %template_id,
            "Created execution"
        );
        Ok(execution)
    }

    /// Fetch an execution by id.
    pub async fn get_execution(&self, execution_id: Uuid) -> DomainResult<Option<WorkflowExecution>> {
        self.executions.get(execution_id).await
    }

    /// Progress snapshot for an execution, `None` when the execution or
    /// its template is missing. This is the read path where callers
    /// check `can_proceed` before advancing.
    pub async fn progress(&self, execution_id: Uuid) -> DomainResult<Option<WorkflowProgress>> {
        let Some(execution) = self.executions.get(execution_id).await? else {
            return Ok(None);
        };
        let Some(template) = self.templates.get(execution.template_id).await? else {
            return Ok(None);
        };
        Ok(Some(calculate_progress(&execution, &template)))
    }

    /// Upsert a submitted input by `(step_id, input_id)`.
    ///
    /// A missing execution yields `Err(ExecutionNotFound)` that callers
    /// are free to ignore. Input recording is fire-and-forget from the
    /// caller's perspective; surfacing the error instead of silently
    /// dropping the write keeps the policy visible.
    pub async fn add_step_input(
        &self,
        execution_id: Uuid,
        input: StepInputValue,
    ) -> DomainResult<()> {
        let Some(mut execution) = self.executions.get(execution_id).await? else {
            tracing::warn!(execution_id = %execution_id, "Input for unknown execution dropped");
            return Err(DomainError::ExecutionNotFound(execution_id));
        };

        tracing::debug!(
            execution_id = %execution_id,
            step_id = %input.step_id,
            input_id = %input.input_id,
            "Recorded step input"
        );
        execution.upsert_input(input);
        self.executions.save(&execution).await
    }

    /// Append a produced output. Outputs are never replaced; a step may
    /// produce several (intermediate and final). Same missing-execution
    /// policy as [`add_step_input`](Self::add_step_input).
    pub async fn add_step_output(
        &self,
        execution_id: Uuid,
        output: StepOutputValue,
    ) -> DomainResult<()> {
        let Some(mut execution) = self.executions.get(execution_id).await? else {
            tracing::warn!(execution_id = %execution_id, "Output for unknown execution dropped");
            return Err(DomainError::ExecutionNotFound(execution_id));
        };

        execution.append_output(output);
        self.executions.save(&execution).await
    }

    /// Mark `step_id` complete and advance the execution.
    ///
    /// Returns `None` when the execution, its template, or the step is
    /// missing. Completing the final step finalizes the execution and
    /// feeds the metrics aggregator. Completing a step of an
    /// already-completed execution returns the current snapshot without
    /// mutating anything, so `current_step` can never move past the
    /// step count and metrics are recorded exactly once per run.
    pub async fn complete_step(
        &self,
        execution_id: Uuid,
        step_id: &str,
    ) -> DomainResult<Option<WorkflowProgress>> {
        let Some(mut execution) = self.executions.get(execution_id).await? else {
            return Ok(None);
        };
        let Some(template) = self.templates.get(execution.template_id).await? else {
            return Ok(None);
        };
        let Some(step_index) = template.steps.iter().position(|s| s.id == step_id) else {
            return Ok(None);
        };

        if execution.status == ExecutionStatus::Completed {
            tracing::debug!(
                execution_id = %execution_id,
                step_id = %step_id,
                "Ignoring completion on finished execution"
            );
            return Ok(Some(calculate_progress(&execution, &template)));
        }

        let next_step_index = step_index + 1;
        execution.current_step = next_step_index;
        execution.progress = ProgressSummary::new(next_step_index, template.steps.len());

        if next_step_index >= template.steps.len() {
            execution.status = ExecutionStatus::Completed;
            execution.completed_at = Some(Utc::now());
            self.executions.save(&execution).await?;
            // Metrics live in a separate blob; a crash between these two
            // writes leaves metrics one run behind (accepted window).
            self.metrics
                .record_completion(execution.template_id, &execution)
                .await?;
            tracing::info!(execution_id = %execution_id, "Execution completed");
        } else {
            execution.status = ExecutionStatus::InProgress;
            self.executions.save(&execution).await?;
            tracing::info!(
                execution_id = %execution_id,
                step_id = %step_id,
                next_step = next_step_index,
                "Step completed"
            );
        }

        Ok(Some(calculate_progress(&execution, &template)))
    }

    /// Pause an execution.
    ///
    /// Permissive: no guard on the current status. A transition the
    /// state machine does not define (such as pausing a completed run)
    /// is logged but not rejected.
    pub async fn pause_execution(&self, execution_id: Uuid) -> DomainResult<()> {
        self.transition(execution_id, ExecutionStatus::Paused, |execution| {
            execution.paused_at = Some(Utc::now());
        })
        .await
    }

    /// Resume a paused execution and clear its pause timestamp. As
    /// permissive as [`pause_execution`](Self::pause_execution).
    pub async fn resume_execution(&self, execution_id: Uuid) -> DomainResult<()> {
        self.transition(execution_id, ExecutionStatus::InProgress, |execution| {
            execution.paused_at = None;
        })
        .await
    }

    async fn transition(
        &self,
        execution_id: Uuid,
        to: ExecutionStatus,
        apply: impl FnOnce(&mut WorkflowExecution),
    ) -> DomainResult<()> {
        let Some(mut execution) = self.executions.get(execution_id).await? else {
            return Err(DomainError::ExecutionNotFound(execution_id));
        };

        if !execution.status.can_transition_to(to) {
            tracing::warn!(
                execution_id = %execution_id,
                from = execution.status.as_str(),
                to = to.as_str(),
                "Undefined status transition applied permissively"
            );
        }

        execution.status = to;
        apply(&mut execution);
        self.executions.save(&execution).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::adapters::kv::{
        KvExecutionRepository, KvMetricsRepository, KvTemplateRepository, MemoryKvStore,
    };
    use crate::domain::models::builtin;
    use crate::domain::models::execution::InputValue;
    use crate::domain::models::template::{OutputFormat, OutputKind};

    fn engine() -> ExecutionEngine {
        let store = Arc::new(MemoryKvStore::new());
        ExecutionEngine::new(
            Arc::new(KvExecutionRepository::new(store.clone())),
            Arc::new(KvTemplateRepository::new(store.clone())),
            MetricsAggregator::new(Arc::new(KvMetricsRepository::new(store))),
        )
    }

    async fn engine_with_template(tpl: &crate::domain::models::WorkflowTemplate) -> ExecutionEngine {
        let engine = engine();
        engine.templates.save(tpl).await.unwrap();
        engine
    }

    fn text_input(step: &str, input: &str, text: &str) -> StepInputValue {
        StepInputValue {
            step_id: step.to_string(),
            input_id: input.to_string(),
            value: InputValue::Text { text: text.to_string() },
            submitted_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_execution_initial_state() {
        let template = builtin::engagement_letter_template();
        let engine = engine_with_template(&template).await;

        let execution = engine
            .create_execution(template.id, None, "user-1")
            .await
            .unwrap();

        assert_eq!(execution.status, ExecutionStatus::NotStarted);
        assert_eq!(execution.current_step, 0);
        assert_eq!(execution.title, template.title);
        assert_eq!(execution.progress.total, template.steps.len());
        assert_eq!(execution.progress.percent, 0);
        assert!(execution.started_at.is_some());
        assert!(execution.inputs.is_empty() && execution.outputs.is_empty());
    }

    #[tokio::test]
    async fn test_create_execution_unknown_template() {
        let result = engine().create_execution(Uuid::new_v4(), None, "user-1").await;
        assert!(matches!(result, Err(DomainError::TemplateNotFound(_))));
    }

    #[tokio::test]
    async fn test_add_input_to_missing_execution_is_visible_noop() {
        let engine = engine();
        let result = engine
            .add_step_input(Uuid::new_v4(), text_input("a", "x", "v"))
            .await;
        assert!(matches!(result, Err(DomainError::ExecutionNotFound(_))));
    }

    #[tokio::test]
    async fn test_complete_step_advances_and_reports_progress() {
        let template = builtin::engagement_letter_template();
        let engine = engine_with_template(&template).await;
        let execution = engine
            .create_execution(template.id, None, "user-1")
            .await
            .unwrap();

        let progress = engine
            .complete_step(execution.id, "matter-details")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(progress.completed_steps, vec!["matter-details".to_string()]);
        assert_eq!(progress.summary.completed, 1);
        assert_eq!(progress.summary.percent, 33);

        let stored = engine.get_execution(execution.id).await.unwrap().unwrap();
        assert_eq!(stored.status, ExecutionStatus::InProgress);
        assert_eq!(stored.current_step, 1);
    }

    #[tokio::test]
    async fn test_complete_final_step_finalizes_and_records_metrics() {
        let template = builtin::engagement_letter_template();
        let engine = engine_with_template(&template).await;
        let execution = engine
            .create_execution(template.id, None, "user-1")
            .await
            .unwrap();

        for step in &template.steps {
            engine.complete_step(execution.id, &step.id).await.unwrap();
        }

        let stored = engine.get_execution(execution.id).await.unwrap().unwrap();
        assert_eq!(stored.status, ExecutionStatus::Completed);
        assert_eq!(stored.current_step, template.steps.len());
        assert_eq!(stored.progress.percent, 100);
        assert!(stored.completed_at.is_some());

        let metrics = engine.metrics.get(template.id).await.unwrap().unwrap();
        assert_eq!(metrics.total_executions, 1);
        assert!((metrics.success_rate - 1.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_repeat_completion_is_idempotent() {
        let template = builtin::engagement_letter_template();
        let engine = engine_with_template(&template).await;
        let execution = engine
            .create_execution(template.id, None, "user-1")
            .await
            .unwrap();

        for step in &template.steps {
            engine.complete_step(execution.id, &step.id).await.unwrap();
        }
        let last = &template.steps[template.steps.len() - 1].id;
        let progress = engine
            .complete_step(execution.id, last)
            .await
            .unwrap()
            .unwrap();

        assert!(progress.is_complete);
        let stored = engine.get_execution(execution.id).await.unwrap().unwrap();
        assert_eq!(stored.current_step, template.steps.len(), "never past the end");

        let metrics = engine.metrics.get(template.id).await.unwrap().unwrap();
        assert_eq!(metrics.total_executions, 1, "metrics recorded once");
    }

    #[tokio::test]
    async fn test_complete_step_unknown_ids_return_none() {
        let template = builtin::engagement_letter_template();
        let engine = engine_with_template(&template).await;
        let execution = engine
            .create_execution(template.id, None, "user-1")
            .await
            .unwrap();

        assert!(engine
            .complete_step(Uuid::new_v4(), "matter-details")
            .await
            .unwrap()
            .is_none());
        assert!(engine
            .complete_step(execution.id, "no-such-step")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_pause_and_resume() {
        let template = builtin::engagement_letter_template();
        let engine = engine_with_template(&template).await;
        let execution = engine
            .create_execution(template.id, None, "user-1")
            .await
            .unwrap();
        engine.complete_step(execution.id, "matter-details").await.unwrap();

        engine.pause_execution(execution.id).await.unwrap();
        let stored = engine.get_execution(execution.id).await.unwrap().unwrap();
        assert_eq!(stored.status, ExecutionStatus::Paused);
        assert!(stored.paused_at.is_some());

        engine.resume_execution(execution.id).await.unwrap();
        let stored = engine.get_execution(execution.id).await.unwrap().unwrap();
        assert_eq!(stored.status, ExecutionStatus::InProgress);
        assert!(stored.paused_at.is_none());
    }

    #[tokio::test]
    async fn test_pause_completed_execution_is_permissive() {
        // The state machine defines no transition out of completed, but
        // the engine stays permissive and only logs. Pinned here so a
        // future hardening shows up as a deliberate change.
        let template = builtin::engagement_letter_template();
        let engine = engine_with_template(&template).await;
        let execution = engine
            .create_execution(template.id, None, "user-1")
            .await
            .unwrap();
        for step in &template.steps {
            engine.complete_step(execution.id, &step.id).await.unwrap();
        }

        engine.pause_execution(execution.id).await.unwrap();
        let stored = engine.get_execution(execution.id).await.unwrap().unwrap();
        assert_eq!(stored.status, ExecutionStatus::Paused);
    }

    #[tokio::test]
    async fn test_outputs_append_through_engine() {
        let template = builtin::trademark_screening_template();
        let engine = engine_with_template(&template).await;
        let execution = engine
            .create_execution(template.id, Some("Acme mark".to_string()), "user-1")
            .await
            .unwrap();

        let output = StepOutputValue {
            step_id: "run-search".to_string(),
            kind: OutputKind::Analysis,
            format: OutputFormat::Json,
            content: "[]".to_string(),
            produced_at: Utc::now(),
            exportable: true,
        };
        engine.add_step_output(execution.id, output.clone()).await.unwrap();
        engine.add_step_output(execution.id, output).await.unwrap();

        let stored = engine.get_execution(execution.id).await.unwrap().unwrap();
        assert_eq!(stored.outputs.len(), 2);
        assert_eq!(stored.title, "Acme mark");
    }
}
