//! Configuration models and file loading.
//!
//! This crate owns the Recuerdo config schema, validation, and the
//! platform-directory helpers used by consumers to locate data on disk.

mod error;
mod loader;
mod model;

/// Public error type returned by config loading and validation APIs.
pub use error::ConfigError;
/// Config file loading and platform path helpers.
pub use loader::{default_config_path, default_data_dir, load_from_path, load_or_default};
/// Configuration schema models.
pub use model::*;
