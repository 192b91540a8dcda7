//! CLI command implementations.

pub mod metrics;
pub mod run;
pub mod template;
