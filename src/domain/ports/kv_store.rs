//! Key-value persistence port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;

/// Generic keyed-blob persistence facility.
///
/// The tracker stores three independent JSON blobs (templates,
/// executions, metrics) under fixed keys. Writes are last-writer-wins;
/// no transaction spans more than one key.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Fetch the blob stored under `key`, if any.
    async fn get(&self, key: &str) -> DomainResult<Option<String>>;

    /// Store `value` under `key`, replacing any existing blob.
    async fn set(&self, key: &str, value: &str) -> DomainResult<()>;
}
