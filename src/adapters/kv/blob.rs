//! Shared blob (de)serialization helpers for the key-value repositories.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::errors::DomainResult;
use crate::domain::ports::KeyValueStore;

/// Load and deserialize the blob under `key`; a missing blob yields the
/// type's default (empty list / empty map).
pub(crate) async fn load_blob<T>(store: &dyn KeyValueStore, key: &str) -> DomainResult<T>
where
    T: DeserializeOwned + Default,
{
    match store.get(key).await? {
        Some(raw) => Ok(serde_json::from_str(&raw)?),
        None => Ok(T::default()),
    }
}

/// Serialize `value` and store it under `key`, replacing the whole blob.
pub(crate) async fn store_blob<T>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> DomainResult<()>
where
    T: Serialize,
{
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw).await
}
