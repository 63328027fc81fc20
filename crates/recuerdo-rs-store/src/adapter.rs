//! Storage adapter trait shared by all backends.

use crate::error::StoreError;
use async_trait::async_trait;

#[async_trait]
/// Asynchronous key-value storage abstraction used by the repository.
///
/// Implementations must treat `delete` of an absent key as success and
/// return an empty list when no key shares the requested prefix.
pub trait StorageAdapter: Send + Sync {
    /// Upsert the value stored at `key`.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Fetch the value stored at `key`, or `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Delete the value stored at `key`.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// List every key sharing `prefix`.
    async fn list(&self, prefix: &str) -> Result<Vec<String>, StoreError>;
}

/// Reject keys that cannot address a stored value.
pub(crate) fn check_key(key: &str) -> Result<(), StoreError> {
    if key.is_empty() {
        return Err(StoreError::InvalidKey("empty key".to_string()));
    }
    Ok(())
}
