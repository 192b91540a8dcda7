//! Port trait definitions (Hexagonal Architecture).
//!
//! Async trait interfaces that storage adapters implement:
//! - `KeyValueStore`: keyed JSON blob persistence
//! - `TemplateRepository`: workflow template storage
//! - `ExecutionRepository`: workflow execution storage
//! - `MetricsRepository`: per-template metrics storage
//!
//! These contracts keep the services independent of any specific
//! storage backing, and make the engine trivially testable against an
//! in-memory store.

pub mod execution_repository;
pub mod kv_store;
pub mod metrics_repository;
pub mod template_repository;

pub use execution_repository::ExecutionRepository;
pub use kv_store::KeyValueStore;
pub use metrics_repository::MetricsRepository;
pub use template_repository::TemplateRepository;
