//! Caseflow - Legal workflow template and execution tracker
//!
//! Caseflow manages reusable workflow templates for common legal tasks
//! (client alerts, engagement letters, trademark screenings) and tracks
//! step-by-step executions of those templates, with progress
//! calculation, per-template metrics, and structured report export.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Pure models, errors, and repository ports
//! - **Service Layer** (`services`): Template store, execution engine,
//!   progress calculator, metrics aggregator, exporter
//! - **Adapters** (`adapters`): Key-value persistence implementations
//! - **Infrastructure Layer** (`infrastructure`): Configuration, logging, wiring
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```ignore
//! use caseflow::infrastructure::AppContext;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = caseflow::infrastructure::ConfigLoader::load()?;
//!     let context = AppContext::init(&config).await?;
//!     // drive context.engine / context.templates ...
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

pub use domain::{DomainError, DomainResult};
