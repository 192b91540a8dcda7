//! Service layer: orchestration logic between the CLI and the domain.

pub mod execution_engine;
pub mod exporter;
pub mod metrics_aggregator;
pub mod progress;
pub mod template_store;

pub use execution_engine::ExecutionEngine;
pub use exporter::Exporter;
pub use metrics_aggregator::MetricsAggregator;
pub use progress::{calculate_progress, WorkflowProgress};
pub use template_store::TemplateStore;
