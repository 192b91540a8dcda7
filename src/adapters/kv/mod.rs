//! Key-value storage adapters.
//!
//! The persisted state is three independent keyed JSON blobs (the
//! template array, the execution array, and the template-id to metrics
//! map) over a generic `KeyValueStore`. Two stores are provided: an
//! in-memory one for tests and a JSON-file-per-key one for the CLI.

mod blob;
pub mod execution_repository;
pub mod json_file;
pub mod memory;
pub mod migrations;
pub mod metrics_repository;
pub mod template_repository;

pub use execution_repository::{KvExecutionRepository, EXECUTIONS_KEY};
pub use json_file::JsonFileKvStore;
pub use memory::MemoryKvStore;
pub use metrics_repository::{KvMetricsRepository, METRICS_KEY};
pub use template_repository::{KvTemplateRepository, TEMPLATES_KEY};
