//! Configuration schema for Recuerdo.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Placeholder photo shown for memories saved without one.
pub const DEFAULT_PHOTO_URL: &str =
    "https://images.unsplash.com/photo-1518531933037-91b2f5f229cc?w=400";

/// Key prefix under which memories are stored.
///
/// Changing this invalidates previously stored data; there is no
/// migration path.
pub const DEFAULT_KEY_PREFIX: &str = "memory:";

/// Root config for the Recuerdo core.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GalleryConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
}

impl GalleryConfig {
    /// Start building a config programmatically with defaults applied.
    pub fn builder() -> GalleryConfigBuilder {
        GalleryConfigBuilder::new()
    }
}

/// Builder for assembling a `GalleryConfig` in code.
#[derive(Debug, Default, Clone)]
pub struct GalleryConfigBuilder {
    config: GalleryConfig,
}

impl GalleryConfigBuilder {
    /// Create a new builder seeded with default config values.
    pub fn new() -> Self {
        Self {
            config: GalleryConfig::default(),
        }
    }

    /// Replace the storage configuration.
    pub fn storage(mut self, storage: StorageConfig) -> Self {
        self.config.storage = storage;
        self
    }

    /// Replace the limits configuration.
    pub fn limits(mut self, limits: LimitsConfig) -> Self {
        self.config.limits = limits;
        self
    }

    /// Finalize and return the built `GalleryConfig`.
    pub fn build(self) -> GalleryConfig {
        self.config
    }
}

/// Where and under which key prefix memories are persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Data directory for file-backed storage. Platform default when unset.
    #[serde(default)]
    pub root: Option<PathBuf>,
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: None,
            key_prefix: default_key_prefix(),
        }
    }
}

fn default_key_prefix() -> String {
    DEFAULT_KEY_PREFIX.to_string()
}

/// Validation and loading limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Maximum message length accepted from the form layer.
    #[serde(default = "default_max_message_chars")]
    pub max_message_chars: usize,
    /// Photo URL substituted when a memory is saved without one.
    #[serde(default = "default_placeholder_photo_url")]
    pub placeholder_photo_url: String,
    /// Concurrent storage fetches during bulk loads.
    #[serde(default = "default_load_concurrency")]
    pub load_concurrency: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_message_chars: default_max_message_chars(),
            placeholder_photo_url: default_placeholder_photo_url(),
            load_concurrency: default_load_concurrency(),
        }
    }
}

fn default_max_message_chars() -> usize {
    1000
}

fn default_placeholder_photo_url() -> String {
    DEFAULT_PHOTO_URL.to_string()
}

fn default_load_concurrency() -> usize {
    8
}
