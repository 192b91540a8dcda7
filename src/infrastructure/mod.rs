//! Infrastructure: configuration, logging, and application wiring.

pub mod bootstrap;
pub mod config;
pub mod logging;

pub use bootstrap::AppContext;
pub use config::{ConfigError, ConfigLoader};
