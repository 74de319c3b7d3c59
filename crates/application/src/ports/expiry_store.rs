//! Session-expiry persistence port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors from the expiry store.
#[derive(Debug, Error)]
pub enum ExpiryStoreError {
    /// Reading or writing the stored value failed.
    #[error("i/o error: {0}")]
    Io(String),

    /// The stored value could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Port for the single persisted session value: the credential expiry
/// timestamp. Written on every credential change, cleared on sign-out.
#[async_trait]
pub trait ExpiryStore: Send + Sync {
    /// Loads the stored expiry instant, if any.
    ///
    /// # Errors
    ///
    /// Returns an [`ExpiryStoreError`] when the value exists but cannot
    /// be read.
    async fn load(&self) -> Result<Option<DateTime<Utc>>, ExpiryStoreError>;

    /// Stores the expiry instant, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an [`ExpiryStoreError`] when the value cannot be written.
    async fn store(&self, expires_at: DateTime<Utc>) -> Result<(), ExpiryStoreError>;

    /// Removes the stored value.
    ///
    /// # Errors
    ///
    /// Returns an [`ExpiryStoreError`] when removal fails.
    async fn clear(&self) -> Result<(), ExpiryStoreError>;
}
