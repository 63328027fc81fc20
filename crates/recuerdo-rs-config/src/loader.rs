//! Config file loading and validation.

use crate::error::ConfigError;
use crate::model::GalleryConfig;
use directories::BaseDirs;
use log::debug;
use std::path::{Path, PathBuf};

/// Load and validate a config file.
pub fn load_from_path(path: &Path) -> Result<GalleryConfig, ConfigError> {
    let raw = std::fs::read_to_string(path)?;
    let config: GalleryConfig = serde_json::from_str(&raw)?;
    validate(&config)?;
    debug!("loaded config (path={})", path.display());
    Ok(config)
}

/// Load a config file, falling back to defaults when it does not exist.
pub fn load_or_default(path: &Path) -> Result<GalleryConfig, ConfigError> {
    if !path.exists() {
        debug!("config file absent, using defaults (path={})", path.display());
        return Ok(GalleryConfig::default());
    }
    load_from_path(path)
}

/// Default location of the user config file.
pub fn default_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.config_dir().join("recuerdo").join("recuerdo.json"))
}

/// Default data directory for file-backed storage.
pub fn default_data_dir() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.data_dir().join("recuerdo").join("memories"))
}

/// Reject configs that cannot be used safely.
fn validate(config: &GalleryConfig) -> Result<(), ConfigError> {
    if config.storage.key_prefix.is_empty() {
        return Err(ConfigError::InvalidField {
            path: "storage.key_prefix".to_string(),
            message: "must not be empty".to_string(),
        });
    }
    if config.limits.load_concurrency == 0 {
        return Err(ConfigError::InvalidField {
            path: "limits.load_concurrency".to_string(),
            message: "must be at least 1".to_string(),
        });
    }
    if config.limits.max_message_chars == 0 {
        return Err(ConfigError::InvalidField {
            path: "limits.max_message_chars".to_string(),
            message: "must be at least 1".to_string(),
        });
    }
    if url::Url::parse(&config.limits.placeholder_photo_url).is_err() {
        return Err(ConfigError::InvalidField {
            path: "limits.placeholder_photo_url".to_string(),
            message: "must be an absolute URL".to_string(),
        });
    }
    Ok(())
}
