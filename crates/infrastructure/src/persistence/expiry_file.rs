//! File-backed session-expiry store.
//!
//! The single persisted session value lives in `.vitae/session.json`
//! under the given root. A missing file reads as "no stored expiry".

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vitae_application::ports::{ExpiryStore, ExpiryStoreError};

/// On-disk shape of the stored value.
#[derive(Debug, Serialize, Deserialize)]
struct SessionRecord {
    schema_version: u32,
    expires_at: DateTime<Utc>,
}

/// Expiry store persisting to `.vitae/session.json`.
#[derive(Debug, Clone)]
pub struct FileExpiryStore {
    path: PathBuf,
}

impl FileExpiryStore {
    /// Creates a store rooted at `root`; the value is kept in
    /// `root/.vitae/session.json`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            path: root.as_ref().join(".vitae").join("session.json"),
        }
    }

    fn io_error(e: &std::io::Error) -> ExpiryStoreError {
        ExpiryStoreError::Io(e.to_string())
    }
}

#[async_trait]
impl ExpiryStore for FileExpiryStore {
    async fn load(&self) -> Result<Option<DateTime<Utc>>, ExpiryStoreError> {
        let content = match tokio::fs::read(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Self::io_error(&e)),
        };

        let record: SessionRecord = serde_json::from_slice(&content)
            .map_err(|e| ExpiryStoreError::Serialization(e.to_string()))?;
        Ok(Some(record.expires_at))
    }

    async fn store(&self, expires_at: DateTime<Utc>) -> Result<(), ExpiryStoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| Self::io_error(&e))?;
        }

        let record = SessionRecord {
            schema_version: 1,
            expires_at,
        };
        let content = serde_json::to_vec_pretty(&record)
            .map_err(|e| ExpiryStoreError::Serialization(e.to_string()))?;

        tokio::fs::write(&self.path, content)
            .await
            .map_err(|e| Self::io_error(&e))
    }

    async fn clear(&self) -> Result<(), ExpiryStoreError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::io_error(&e)),
        }
    }
}
