//! Domain models for templates, executions, metrics, and exports.

pub mod builtin;
pub mod config;
pub mod execution;
pub mod export;
pub mod metrics;
pub mod template;

pub use config::{Config, LoggingConfig};
pub use execution::{
    ExecutionStatus, InputValue, ProgressSummary, StepInputValue, StepOutputValue,
    WorkflowExecution,
};
pub use export::{ExportOptions, ExportPayload, ExportSections};
pub use metrics::{MetricsSummary, WorkflowMetrics};
pub use template::{
    Category, Complexity, InputKind, NewTemplate, StepInputDef, StepType, TemplateFilters,
    WorkflowStep, WorkflowTemplate,
};
