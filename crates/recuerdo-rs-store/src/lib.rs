//! Key-value storage adapters for Recuerdo.

pub mod adapter;
pub mod error;
pub mod file;
pub mod mem;

/// Storage adapter abstraction.
pub use adapter::StorageAdapter;
/// Storage error type.
pub use error::StoreError;
/// File-per-key storage backend.
pub use file::FileStorage;
/// In-memory storage backend.
pub use mem::MemStorage;
