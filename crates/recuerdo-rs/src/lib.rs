//! Public surface for the Recuerdo core.
//!
//! This crate re-exports the building blocks and provides small helpers
//! to keep consumer setup consistent.

use recuerdo_rs_config::GalleryConfig;
use recuerdo_rs_gallery::MemoryRepository;
use recuerdo_rs_store::{FileStorage, StoreError};
use std::sync::Arc;

/// Re-export for convenience.
pub use recuerdo_rs_config as config;
/// Re-export for convenience.
pub use recuerdo_rs_gallery as gallery;
/// Re-export for convenience.
pub use recuerdo_rs_store as store;

#[inline]
/// Initialize logging using env_logger if the "logging" feature is enabled.
///
/// This is a no-op if the feature is not enabled. Binaries are still expected
/// to call this early in startup to ensure log output is wired up.
pub fn init_logging() {
    #[cfg(feature = "logging")]
    {
        let _ = env_logger::try_init();
    }
}

/// Open a file-backed gallery at the configured data directory.
///
/// Falls back to the platform data directory when no root is configured.
pub fn open_gallery(config: &GalleryConfig) -> Result<MemoryRepository, StoreError> {
    let root = match &config.storage.root {
        Some(root) => root.clone(),
        None => recuerdo_rs_config::default_data_dir()
            .ok_or_else(|| StoreError::Backend("no platform data directory".to_string()))?,
    };
    let storage = Arc::new(FileStorage::new(root)?);
    Ok(MemoryRepository::from_config(storage, config.clone()))
}
