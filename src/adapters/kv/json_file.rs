//! File-backed key-value store.
//!
//! Each key maps to `<data_dir>/<key>.json`. Writes replace the file in
//! place; there is no locking beyond the single-caller discipline the
//! tracker assumes.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::KeyValueStore;

/// `KeyValueStore` over one JSON file per key in a data directory.
#[derive(Debug, Clone)]
pub struct JsonFileKvStore {
    dir: PathBuf,
}

impl JsonFileKvStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl AsRef<Path>) -> DomainResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> DomainResult<PathBuf> {
        // Keys are fixed blob names; reject anything that would escape
        // the data directory.
        if key.is_empty() || key.contains(['/', '\\', '.']) {
            return Err(DomainError::StorageError(format!(
                "Invalid storage key: {key:?}"
            )));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

#[async_trait]
impl KeyValueStore for JsonFileKvStore {
    async fn get(&self, key: &str) -> DomainResult<Option<String>> {
        let path = self.path_for(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> DomainResult<()> {
        let path = self.path_for(key)?;
        tokio::fs::write(&path, value).await?;
        Ok(())
    }
}
