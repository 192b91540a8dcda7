//! Common test utilities for integration tests
//!
//! Provides shared fixtures and helpers used across multiple
//! integration test files.

use std::sync::Arc;

use chrono::Utc;
use tempfile::TempDir;

use caseflow::adapters::kv::MemoryKvStore;
use caseflow::domain::models::{InputValue, StepInputValue};
use caseflow::infrastructure::AppContext;

/// Create a temporary directory for test isolation
///
/// Returns a TempDir that will be cleaned up when dropped.
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Fully wired services over an in-memory store, with the built-in
/// templates seeded.
pub async fn memory_context() -> AppContext {
    AppContext::from_store(Arc::new(MemoryKvStore::new()), true)
        .await
        .expect("Failed to wire in-memory context")
}

/// A text input value for a step.
pub fn text_input(step_id: &str, input_id: &str, text: &str) -> StepInputValue {
    StepInputValue {
        step_id: step_id.to_string(),
        input_id: input_id.to_string(),
        value: InputValue::Text {
            text: text.to_string(),
        },
        submitted_at: Utc::now(),
    }
}

/// A file input value for a step.
pub fn file_input(step_id: &str, input_id: &str, name: &str, size_bytes: u64) -> StepInputValue {
    StepInputValue {
        step_id: step_id.to_string(),
        input_id: input_id.to_string(),
        value: InputValue::File {
            name: name.to_string(),
            size_bytes,
        },
        submitted_at: Utc::now(),
    }
}

/// A selection input value for a step.
pub fn selection_input(step_id: &str, input_id: &str, choice: &str) -> StepInputValue {
    StepInputValue {
        step_id: step_id.to_string(),
        input_id: input_id.to_string(),
        value: InputValue::Selection {
            choice: choice.to_string(),
        },
        submitted_at: Utc::now(),
    }
}
