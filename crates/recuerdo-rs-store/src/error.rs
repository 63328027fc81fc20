//! Error types for storage operations.

/// Errors returned by storage adapters.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Key is empty or cannot be mapped to a storage location.
    #[error("invalid key: {0}")]
    InvalidKey(String),
    /// Backend-specific failure.
    #[error("backend error: {0}")]
    Backend(String),
}
