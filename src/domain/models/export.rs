//! Export payload types.
//!
//! A completed (or in-flight) execution plus its template can be
//! projected into a structured report. Callers choose which sections to
//! include; omitted sections are absent from the serialized payload
//! entirely, not null.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::execution::{ExecutionStatus, StepInputValue, StepOutputValue};
use super::template::StepType;

/// Which sections to include in an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSections {
    #[serde(default)]
    pub summary: bool,
    #[serde(default)]
    pub steps: bool,
    #[serde(default)]
    pub outputs: bool,
    #[serde(default)]
    pub timeline: bool,
}

impl Default for ExportSections {
    /// Everything on.
    fn default() -> Self {
        Self { summary: true, steps: true, outputs: true, timeline: true }
    }
}

/// Export configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ExportOptions {
    #[serde(default)]
    pub sections: ExportSections,
    /// Include raw submitted inputs. Only honored when the outputs
    /// section is enabled.
    #[serde(default)]
    pub include_inputs: bool,
}

/// Header block present in every export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportWorkflowInfo {
    pub execution_id: Uuid,
    pub template_id: Uuid,
    pub title: String,
    pub status: ExecutionStatus,
    pub exported_at: DateTime<Utc>,
}

/// Summary section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSummary {
    pub total_steps: usize,
    pub completed_steps: usize,
    /// `completed_at - started_at` in milliseconds; 0 while running.
    pub time_spent_ms: i64,
    /// 100 if completed, otherwise 0.
    pub success_rate: u8,
}

/// One row of the steps section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportStep {
    pub name: String,
    pub description: String,
    pub step_type: StepType,
    pub completed: bool,
}

/// One event in the chronological timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub timestamp: DateTime<Utc>,
    pub label: String,
}

/// The assembled export.
///
/// `workflow` is always present; every other section appears only when
/// enabled in the options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportPayload {
    pub workflow: ExportWorkflowInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<ExportSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<ExportStep>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inputs: Option<Vec<StepInputValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Vec<StepOutputValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeline: Option<Vec<TimelineEvent>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_sections_absent_from_json() {
        let payload = ExportPayload {
            workflow: ExportWorkflowInfo {
                execution_id: Uuid::new_v4(),
                template_id: Uuid::new_v4(),
                title: "Run".to_string(),
                status: ExecutionStatus::Completed,
                exported_at: Utc::now(),
            },
            summary: Some(ExportSummary {
                total_steps: 2,
                completed_steps: 2,
                time_spent_ms: 100,
                success_rate: 100,
            }),
            steps: None,
            inputs: None,
            outputs: None,
            timeline: None,
        };

        let json = serde_json::to_value(&payload).unwrap();
        let mut keys: Vec<String> = json.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, vec!["summary".to_string(), "workflow".to_string()]);
    }

    #[test]
    fn test_default_sections_all_on() {
        let sections = ExportSections::default();
        assert!(sections.summary && sections.steps && sections.outputs && sections.timeline);
    }
}
