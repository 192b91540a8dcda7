//! Workflow execution domain model.
//!
//! A `WorkflowExecution` is one stateful run of a template. It owns its
//! submitted inputs, produced outputs, and progress summary, and holds a
//! read-only reference (by id) to the template it was instantiated from.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status of an execution.
///
/// ```text
/// not_started --complete_step(first)--> in_progress
/// in_progress --complete_step(last)---> completed   (terminal)
/// in_progress --pause--> paused --resume--> in_progress
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    /// Created but no step completed yet.
    NotStarted,
    /// At least one step completed, more remain.
    InProgress,
    /// Paused by the user.
    Paused,
    /// All steps completed.
    Completed,
}

impl Default for ExecutionStatus {
    fn default() -> Self {
        Self::NotStarted
    }
}

impl ExecutionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::Paused => "paused",
            Self::Completed => "completed",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "not_started" => Some(Self::NotStarted),
            "in_progress" => Some(Self::InProgress),
            "paused" => Some(Self::Paused),
            "completed" | "complete" => Some(Self::Completed),
            _ => None,
        }
    }

    /// Whether this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Transitions the state machine defines from this status.
    ///
    /// Advisory only: the engine stays permissive on pause/resume and
    /// logs a warning instead of rejecting.
    pub fn valid_transitions(&self) -> Vec<ExecutionStatus> {
        match self {
            Self::NotStarted => vec![Self::InProgress, Self::Completed],
            Self::InProgress => vec![Self::InProgress, Self::Paused, Self::Completed],
            Self::Paused => vec![Self::InProgress],
            Self::Completed => vec![],
        }
    }

    pub fn can_transition_to(&self, new_status: Self) -> bool {
        self.valid_transitions().contains(&new_status)
    }
}

/// A submitted input value, tagged by input kind.
///
/// Closed union over the five supported input kinds so persistence and
/// readiness checks are exhaustive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputValue {
    /// An uploaded file, recorded by name and size.
    File { name: String, size_bytes: u64 },
    /// Free text.
    Text { text: String },
    /// One choice from a selection input's option list.
    Selection { choice: String },
    /// A yes/no flag.
    Boolean { value: bool },
    /// A calendar date.
    Date { date: NaiveDate },
}

impl InputValue {
    /// Whether this value counts as "present" for readiness checks.
    ///
    /// Empty text, an empty selection, and a file without a name do not
    /// satisfy a required input.
    pub fn is_present(&self) -> bool {
        match self {
            Self::File { name, .. } => !name.is_empty(),
            Self::Text { text } => !text.trim().is_empty(),
            Self::Selection { choice } => !choice.is_empty(),
            Self::Boolean { .. } | Self::Date { .. } => true,
        }
    }
}

/// One submitted value for a step input.
///
/// At most one live value exists per `(step_id, input_id)` pair; a later
/// submission replaces the earlier one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepInputValue {
    pub step_id: String,
    pub input_id: String,
    pub value: InputValue,
    pub submitted_at: DateTime<Utc>,
}

/// One output produced by a generation or analysis step. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepOutputValue {
    pub step_id: String,
    pub kind: super::template::OutputKind,
    pub format: super::template::OutputFormat,
    pub content: String,
    pub produced_at: DateTime<Utc>,
    /// Whether this output appears in exports.
    pub exportable: bool,
}

/// Compact progress counters stored on the execution itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProgressSummary {
    /// Number of completed steps.
    pub completed: usize,
    /// Total number of steps in the template.
    pub total: usize,
    /// `round(100 * completed / total)`.
    pub percent: u8,
}

impl ProgressSummary {
    /// Build a summary, rounding the percentage to the nearest integer.
    pub fn new(completed: usize, total: usize) -> Self {
        #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let percent = if total == 0 {
            0
        } else {
            ((completed as f64 * 100.0) / total as f64).round() as u8
        };
        Self { completed, total, percent }
    }
}

/// One run of a workflow template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowExecution {
    /// Unique execution id.
    pub id: Uuid,
    /// The template this run was instantiated from. Never mutated
    /// through the execution.
    pub template_id: Uuid,
    /// Run title; defaults to the template title.
    pub title: String,
    pub status: ExecutionStatus,
    /// Index into the template's step list. Equal to the step count when
    /// the execution is complete.
    pub current_step: usize,
    pub started_at: Option<DateTime<Utc>>,
    pub paused_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    /// Free-form cross-step data.
    #[serde(default)]
    pub context: HashMap<String, serde_json::Value>,
    /// Submitted input values, at most one per `(step_id, input_id)`.
    #[serde(default)]
    pub inputs: Vec<StepInputValue>,
    /// Produced outputs, append-only.
    #[serde(default)]
    pub outputs: Vec<StepOutputValue>,
    /// Owning user.
    pub user_id: String,
    /// Compact progress counters, recomputed on every step completion.
    #[serde(default)]
    pub progress: ProgressSummary,
}

impl WorkflowExecution {
    /// Upsert a submitted input by `(step_id, input_id)`.
    ///
    /// Any existing value for the pair is removed before the new one is
    /// appended, so resubmission replaces rather than accumulates.
    pub fn upsert_input(&mut self, input: StepInputValue) {
        self.inputs
            .retain(|i| !(i.step_id == input.step_id && i.input_id == input.input_id));
        self.inputs.push(input);
    }

    /// Append a produced output. Multiple outputs per step are allowed.
    pub fn append_output(&mut self, output: StepOutputValue) {
        self.outputs.push(output);
    }

    /// Look up the live value for a `(step_id, input_id)` pair.
    pub fn input_value(&self, step_id: &str, input_id: &str) -> Option<&StepInputValue> {
        self.inputs
            .iter()
            .find(|i| i.step_id == step_id && i.input_id == input_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_execution() -> WorkflowExecution {
        WorkflowExecution {
            id: Uuid::new_v4(),
            template_id: Uuid::new_v4(),
            title: "Test run".to_string(),
            status: ExecutionStatus::NotStarted,
            current_step: 0,
            started_at: Some(Utc::now()),
            paused_at: None,
            completed_at: None,
            context: HashMap::new(),
            inputs: vec![],
            outputs: vec![],
            user_id: "user-1".to_string(),
            progress: ProgressSummary::new(0, 3),
        }
    }

    fn text_input(step: &str, input: &str, text: &str) -> StepInputValue {
        StepInputValue {
            step_id: step.to_string(),
            input_id: input.to_string(),
            value: InputValue::Text { text: text.to_string() },
            submitted_at: Utc::now(),
        }
    }

    #[test]
    fn test_upsert_replaces_same_pair() {
        let mut exec = sample_execution();
        exec.upsert_input(text_input("a", "x", "first"));
        exec.upsert_input(text_input("a", "x", "second"));

        assert_eq!(exec.inputs.len(), 1);
        assert_eq!(
            exec.inputs[0].value,
            InputValue::Text { text: "second".to_string() }
        );
    }

    #[test]
    fn test_upsert_keeps_other_pairs() {
        let mut exec = sample_execution();
        exec.upsert_input(text_input("a", "x", "1"));
        exec.upsert_input(text_input("a", "y", "2"));
        exec.upsert_input(text_input("b", "x", "3"));

        assert_eq!(exec.inputs.len(), 3);
        assert!(exec.input_value("a", "y").is_some());
    }

    #[test]
    fn test_outputs_append_only() {
        let mut exec = sample_execution();
        let output = StepOutputValue {
            step_id: "a".to_string(),
            kind: crate::domain::models::template::OutputKind::Summary,
            format: crate::domain::models::template::OutputFormat::Markdown,
            content: "draft".to_string(),
            produced_at: Utc::now(),
            exportable: true,
        };
        exec.append_output(output.clone());
        exec.append_output(output);
        assert_eq!(exec.outputs.len(), 2);
    }

    #[test]
    fn test_progress_summary_rounding() {
        assert_eq!(ProgressSummary::new(1, 3).percent, 33);
        assert_eq!(ProgressSummary::new(2, 3).percent, 67);
        assert_eq!(ProgressSummary::new(3, 3).percent, 100);
        assert_eq!(ProgressSummary::new(0, 0).percent, 0);
    }

    #[test]
    fn test_input_presence() {
        assert!(InputValue::Text { text: "hi".to_string() }.is_present());
        assert!(!InputValue::Text { text: "   ".to_string() }.is_present());
        assert!(!InputValue::Selection { choice: String::new() }.is_present());
        assert!(InputValue::Boolean { value: false }.is_present());
        assert!(
            !InputValue::File { name: String::new(), size_bytes: 0 }.is_present()
        );
    }

    #[test]
    fn test_status_transitions() {
        assert!(ExecutionStatus::NotStarted.can_transition_to(ExecutionStatus::InProgress));
        assert!(ExecutionStatus::InProgress.can_transition_to(ExecutionStatus::Paused));
        assert!(ExecutionStatus::Paused.can_transition_to(ExecutionStatus::InProgress));
        assert!(!ExecutionStatus::Completed.can_transition_to(ExecutionStatus::InProgress));
        assert!(ExecutionStatus::Completed.is_terminal());
    }

    #[test]
    fn test_status_string_roundtrip() {
        for status in [
            ExecutionStatus::NotStarted,
            ExecutionStatus::InProgress,
            ExecutionStatus::Paused,
            ExecutionStatus::Completed,
        ] {
            assert_eq!(ExecutionStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(ExecutionStatus::from_str("bogus"), None);
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut exec = sample_execution();
        exec.upsert_input(text_input("a", "x", "v"));
        let json = serde_json::to_string(&exec).unwrap();
        let back: WorkflowExecution = serde_json::from_str(&json).unwrap();
        assert_eq!(exec, back);
    }
}
