//! Bulk export, import, and storage footprint helpers.

use crate::error::GalleryError;
use crate::model::Memory;
use crate::repository::MemoryRepository;
use log::debug;
use recuerdo_rs_store::StorageAdapter;

impl MemoryRepository {
    /// Export every stored memory as a pretty-printed JSON array.
    ///
    /// Reads from storage, not the cache, so unsaved cache state never
    /// leaks into a backup.
    pub async fn export_json(&self) -> Result<String, GalleryError> {
        let keys = self.storage_list().await?;
        let mut memories = self.fetch_keys(keys).await;
        memories.sort_by(|a, b| b.parsed_date().cmp(&a.parsed_date()));
        Ok(serde_json::to_string_pretty(&memories)?)
    }

    /// Import memories from a JSON array.
    ///
    /// Each element is validated independently; invalid elements are
    /// skipped without aborting the batch. Returns the count of
    /// successfully imported records. The cache is untouched; callers
    /// reload with [`load_all`](Self::load_all) afterwards.
    pub async fn import_json(&self, text: &str) -> Result<usize, GalleryError> {
        let payload: serde_json::Value = serde_json::from_str(text)?;
        let serde_json::Value::Array(elements) = payload else {
            return Err(GalleryError::NotAnArray);
        };

        let placeholder = self.config().limits.placeholder_photo_url.clone();
        let mut imported = 0;
        for element in elements {
            let memory = match serde_json::from_value::<Memory>(element) {
                Ok(memory) => memory.sanitized(&placeholder),
                Err(err) => {
                    debug!("skipping invalid import element: {err}");
                    continue;
                }
            };
            let key = format!("{}{}", self.key_prefix(), memory.id);
            let payload = match serde_json::to_string(&memory) {
                Ok(payload) => payload,
                Err(err) => {
                    debug!("skipping unserializable import element (id={}): {err}", memory.id);
                    continue;
                }
            };
            match self.storage().set(&key, &payload).await {
                Ok(()) => imported += 1,
                Err(err) => debug!("failed to import memory (id={}): {err}", memory.id),
            }
        }
        debug!("imported memories (count={imported})");
        Ok(imported)
    }

    /// Total byte size of the stored values under the prefix.
    pub async fn storage_footprint(&self) -> Result<u64, GalleryError> {
        let keys = self.storage_list().await?;
        let mut total = 0u64;
        for key in keys {
            if let Some(value) = self.storage().get(&key).await? {
                total += value.len() as u64;
            }
        }
        Ok(total)
    }
}

/// Render a byte count for display, 1024-based.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["bytes", "KB", "MB", "GB"];
    if bytes < 1024 {
        return format!("{bytes} bytes");
    }
    let exponent = (((bytes as f64).ln() / 1024f64.ln()).floor() as usize).min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exponent as i32);
    format!("{:.2} {}", (value * 100.0).round() / 100.0, UNITS[exponent])
}
