use async_trait::async_trait;
use recuerdo_rs_store::{MemStorage, StorageAdapter, StoreError};

/// Storage wrapper with per-operation failure injection.
///
/// Delegates to an inner [`MemStorage`] unless the matching flag is
/// set, in which case the operation fails with a backend error.
#[derive(Default)]
pub struct FaultyStorage {
    inner: MemStorage,
    fail_set: bool,
    fail_get: bool,
    fail_delete: bool,
    fail_delete_keys: Vec<String>,
    fail_list: bool,
}

impl FaultyStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_set(mut self) -> Self {
        self.fail_set = true;
        self
    }

    pub fn failing_get(mut self) -> Self {
        self.fail_get = true;
        self
    }

    pub fn failing_delete(mut self) -> Self {
        self.fail_delete = true;
        self
    }

    /// Fail deletes of one specific key, for mixed-batch outcomes.
    pub fn failing_delete_for(mut self, key: &str) -> Self {
        self.fail_delete_keys.push(key.to_string());
        self
    }

    pub fn failing_list(mut self) -> Self {
        self.fail_list = true;
        self
    }

    /// The inner store, for seeding state before the failure matters.
    pub fn inner(&self) -> &MemStorage {
        &self.inner
    }

    fn injected() -> StoreError {
        StoreError::Backend("injected failure".to_string())
    }
}

#[async_trait]
impl StorageAdapter for FaultyStorage {
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.fail_set {
            return Err(Self::injected());
        }
        self.inner.set(key, value).await
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if self.fail_get {
            return Err(Self::injected());
        }
        self.inner.get(key).await
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        if self.fail_delete || self.fail_delete_keys.iter().any(|k| k == key) {
            return Err(Self::injected());
        }
        self.inner.delete(key).await
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        if self.fail_list {
            return Err(Self::injected());
        }
        self.inner.list(prefix).await
    }
}
