//! Progress calculation.
//!
//! `calculate_progress` is a pure function from an execution and its
//! template to a progress snapshot. Readiness (`can_proceed`) lives
//! here, on the read path: the engine's `complete_step` deliberately
//! does not enforce it and callers are expected to consult the snapshot
//! before advancing.

use serde::Serialize;

use crate::domain::models::execution::{ProgressSummary, WorkflowExecution};
use crate::domain::models::template::{WorkflowStep, WorkflowTemplate};

/// Snapshot of an execution's position within its template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkflowProgress {
    /// Ids of steps at indices below `current_step`.
    pub completed_steps: Vec<String>,
    /// Ids of steps at `current_step` and beyond.
    pub pending_steps: Vec<String>,
    /// Always empty; reserved for optional-step skipping.
    pub skipped_steps: Vec<String>,
    /// Whether every step has been completed.
    pub is_complete: bool,
    /// Id of the step at `current_step`, absent when complete.
    pub next_step_id: Option<String>,
    /// Whether the current step's preconditions (required inputs and
    /// dependencies) are satisfied.
    pub can_proceed: bool,
    /// Compact counters matching what the execution itself stores.
    pub summary: ProgressSummary,
}

/// Compute a progress snapshot for `execution` against `template`.
pub fn calculate_progress(
    execution: &WorkflowExecution,
    template: &WorkflowTemplate,
) -> WorkflowProgress {
    let steps = &template.steps;
    let current = execution.current_step.min(steps.len());
    let is_complete = execution.current_step >= steps.len();

    let completed_steps = steps[..current].iter().map(|s| s.id.clone()).collect();
    let pending_steps = steps[current..].iter().map(|s| s.id.clone()).collect();

    let next_step_id = if is_complete {
        None
    } else {
        Some(steps[current].id.clone())
    };

    let can_proceed = if is_complete {
        false
    } else {
        step_is_ready(execution, template, &steps[current], current)
    };

    WorkflowProgress {
        completed_steps,
        pending_steps,
        skipped_steps: Vec::new(),
        is_complete,
        next_step_id,
        can_proceed,
        summary: ProgressSummary::new(current, steps.len()),
    }
}

/// A step is ready when every required input has a present value and
/// every declared dependency sits before the current position.
fn step_is_ready(
    execution: &WorkflowExecution,
    template: &WorkflowTemplate,
    step: &WorkflowStep,
    current_index: usize,
) -> bool {
    let inputs_satisfied = step
        .inputs
        .iter()
        .filter(|def| def.required)
        .all(|def| {
            execution
                .input_value(&step.id, &def.id)
                .is_some_and(|submitted| submitted.value.is_present())
        });

    let dependencies_satisfied = step.dependencies.iter().all(|dep| {
        template.steps[..current_index]
            .iter()
            .any(|earlier| &earlier.id == dep)
    });

    inputs_satisfied && dependencies_satisfied
}
