//! Repository layer: CRUD over a storage adapter plus the in-memory cache.

use crate::error::GalleryError;
use crate::model::Memory;
use crate::query::{self, GalleryStats};
use futures_util::{StreamExt, stream};
use log::{debug, info, warn};
use parking_lot::RwLock;
use recuerdo_rs_config::GalleryConfig;
use recuerdo_rs_store::{StorageAdapter, StoreError};
use std::collections::HashSet;
use std::sync::Arc;

/// Outcome of a single delete within a bulk wipe.
#[derive(Debug)]
pub struct DeleteOutcome {
    /// Storage key the delete targeted.
    pub key: String,
    /// Result of the individual delete.
    pub result: Result<(), StoreError>,
}

/// Domain-level CRUD and query layer over a [`StorageAdapter`].
///
/// Owns the in-memory cache (initialized empty, populated by
/// [`load_all`](Self::load_all), mutated only by the CRUD operations)
/// and a last-error slot for the UI. Storage and parse failures are
/// caught here and logged; no raw error reaches callers outside the
/// documented `Result`s. There is no timeout or cancellation: a hung
/// storage call stalls the dependent operation (known gap).
pub struct MemoryRepository {
    storage: Arc<dyn StorageAdapter>,
    config: GalleryConfig,
    cache: RwLock<Vec<Memory>>,
    last_error: RwLock<Option<String>>,
}

impl MemoryRepository {
    /// Create a repository with default configuration.
    pub fn new(storage: Arc<dyn StorageAdapter>) -> Self {
        Self::from_config(storage, GalleryConfig::default())
    }

    /// Create a repository using the given configuration.
    pub fn from_config(storage: Arc<dyn StorageAdapter>, config: GalleryConfig) -> Self {
        Self {
            storage,
            config,
            cache: RwLock::new(Vec::new()),
            last_error: RwLock::new(None),
        }
    }

    /// Key prefix under which memories are stored.
    pub fn key_prefix(&self) -> &str {
        &self.config.storage.key_prefix
    }

    /// Active configuration.
    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    /// Storage key for a memory id.
    fn key(&self, id: &str) -> String {
        format!("{}{id}", self.config.storage.key_prefix)
    }

    /// Snapshot of the current cache.
    pub fn memories(&self) -> Vec<Memory> {
        self.cache.read().clone()
    }

    /// Error indicator from the most recent failing operation.
    pub fn last_error(&self) -> Option<String> {
        self.last_error.read().clone()
    }

    fn record_error(&self, message: &str) {
        *self.last_error.write() = Some(message.to_string());
    }

    /// Reload the cache from storage.
    ///
    /// Lists keys under the prefix, fetches values with a bounded
    /// fan-out, silently discards entries that fail to fetch, parse, or
    /// pass structural validation, and sorts the rest newest first.
    /// Never fails: when the list call itself rejects, the cache becomes
    /// empty and the error slot records the failure.
    pub async fn load_all(&self) -> Vec<Memory> {
        let keys = match self.storage.list(self.key_prefix()).await {
            Ok(keys) => keys,
            Err(err) => {
                warn!("failed to list memories (prefix={}): {err}", self.key_prefix());
                self.record_error("could not load memories");
                self.cache.write().clear();
                return Vec::new();
            }
        };

        let mut memories = self.fetch_keys(keys).await;
        memories.sort_by(|a, b| b.parsed_date().cmp(&a.parsed_date()));

        debug!("loaded memories (count={})", memories.len());
        *self.cache.write() = memories.clone();
        *self.last_error.write() = None;
        memories
    }

    /// Fetch and parse a single memory by id, bypassing the cache.
    ///
    /// Returns `None` on absence, fetch failure, or structural
    /// invalidity; failures are logged, never raised.
    pub async fn load_one(&self, id: &str) -> Option<Memory> {
        Self::fetch_one(Arc::clone(&self.storage), self.key(id)).await
    }

    /// Persist a memory and insert it into the cache in date order.
    pub async fn save(&self, memory: Memory) -> Result<Memory, GalleryError> {
        let memory = self.write_record(memory, "save").await?;
        self.insert_sorted(memory.clone());
        debug!("saved memory (id={})", memory.id);
        Ok(memory)
    }

    /// Rewrite an existing memory, replacing the cache entry with its id.
    pub async fn update(&self, memory: Memory) -> Result<Memory, GalleryError> {
        let memory = self.write_record(memory, "update").await?;
        self.insert_sorted(memory.clone());
        debug!("updated memory (id={})", memory.id);
        Ok(memory)
    }

    /// Delete one memory by id. Success when the id was already absent.
    pub async fn delete_one(&self, id: &str) -> Result<(), GalleryError> {
        if let Err(err) = self.storage.delete(&self.key(id)).await {
            warn!("failed to delete memory (id={id}): {err}");
            self.record_error("could not delete memory");
            return Err(err.into());
        }
        self.cache.write().retain(|memory| memory.id != id);
        debug!("deleted memory (id={id})");
        Ok(())
    }

    /// Delete every memory under the prefix, one outcome per key.
    ///
    /// The batch is not atomic: only cache entries whose delete
    /// succeeded are removed, so partial failure stays visible to the
    /// caller through the outcome list.
    pub async fn delete_all(&self) -> Result<Vec<DeleteOutcome>, GalleryError> {
        let keys = match self.storage.list(self.key_prefix()).await {
            Ok(keys) => keys,
            Err(err) => {
                warn!("failed to list memories (prefix={}): {err}", self.key_prefix());
                self.record_error("could not clear memories");
                return Err(err.into());
            }
        };

        let concurrency = self.load_concurrency();
        let outcomes: Vec<DeleteOutcome> = stream::iter(keys)
            .map(|key| {
                let storage = Arc::clone(&self.storage);
                async move {
                    let result = storage.delete(&key).await;
                    DeleteOutcome { key, result }
                }
            })
            .buffer_unordered(concurrency)
            .collect()
            .await;

        let deleted: HashSet<&str> = outcomes
            .iter()
            .filter(|outcome| outcome.result.is_ok())
            .map(|outcome| {
                outcome
                    .key
                    .strip_prefix(self.key_prefix())
                    .unwrap_or(outcome.key.as_str())
            })
            .collect();
        self.cache
            .write()
            .retain(|memory| !deleted.contains(memory.id.as_str()));

        let failed = outcomes
            .iter()
            .filter(|outcome| outcome.result.is_err())
            .count();
        if failed > 0 {
            for outcome in outcomes.iter().filter(|outcome| outcome.result.is_err()) {
                warn!("failed to delete memory (key={})", outcome.key);
            }
            self.record_error("could not clear all memories");
        }
        info!(
            "cleared memories (deleted={}, failed={failed})",
            outcomes.len() - failed
        );
        Ok(outcomes)
    }

    /// Case-insensitive substring search over name and message.
    pub fn search(&self, query: &str) -> Vec<Memory> {
        query::search(&self.cache.read(), query)
    }

    /// Memories created in the given calendar year.
    pub fn filter_by_year(&self, year: i32) -> Vec<Memory> {
        query::filter_by_year(&self.cache.read(), year)
    }

    /// Aggregate statistics over the cached memories.
    pub fn stats(&self) -> GalleryStats {
        query::stats(&self.cache.read())
    }

    pub(crate) fn storage(&self) -> &Arc<dyn StorageAdapter> {
        &self.storage
    }

    /// List every key under the prefix.
    pub(crate) async fn storage_list(&self) -> Result<Vec<String>, GalleryError> {
        Ok(self.storage.list(self.key_prefix()).await?)
    }

    /// Fetch and parse every listed key with a bounded fan-out.
    pub(crate) async fn fetch_keys(&self, keys: Vec<String>) -> Vec<Memory> {
        let concurrency = self.load_concurrency();
        stream::iter(keys)
            .map(|key| {
                let storage = Arc::clone(&self.storage);
                async move { Self::fetch_one(storage, key).await }
            })
            .buffer_unordered(concurrency)
            .filter_map(|memory| async move { memory })
            .collect()
            .await
    }

    /// Fetch one key, parse it, and validate its structure.
    async fn fetch_one(storage: Arc<dyn StorageAdapter>, key: String) -> Option<Memory> {
        let value = match storage.get(&key).await {
            Ok(Some(value)) => value,
            Ok(None) => return None,
            Err(err) => {
                debug!("failed to fetch memory (key={key}): {err}");
                return None;
            }
        };
        match serde_json::from_str::<Memory>(&value) {
            Ok(memory) => Some(memory),
            Err(err) => {
                debug!("discarding malformed memory (key={key}): {err}");
                None
            }
        }
    }

    /// Shared write path for save and update.
    async fn write_record(&self, memory: Memory, action: &str) -> Result<Memory, GalleryError> {
        let memory = memory.sanitized(&self.config.limits.placeholder_photo_url);
        let payload = serde_json::to_string(&memory)?;
        if let Err(err) = self.storage.set(&self.key(&memory.id), &payload).await {
            warn!("failed to {action} memory (id={}): {err}", memory.id);
            self.record_error(&format!("could not {action} memory"));
            return Err(err.into());
        }
        Ok(memory)
    }

    /// Insert into the cache keeping descending date order.
    ///
    /// Any existing entry with the same id is replaced, keeping ids
    /// unique across the active set.
    fn insert_sorted(&self, memory: Memory) {
        let mut cache = self.cache.write();
        cache.retain(|existing| existing.id != memory.id);
        let date = memory.parsed_date();
        let position = cache
            .iter()
            .position(|existing| existing.parsed_date() <= date)
            .unwrap_or(cache.len());
        cache.insert(position, memory);
    }

    fn load_concurrency(&self) -> usize {
        self.config.limits.load_concurrency.max(1)
    }
}
