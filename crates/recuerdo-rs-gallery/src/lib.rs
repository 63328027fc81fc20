//! Memory records and the repository built on top of a storage adapter.

pub mod archive;
pub mod error;
pub mod model;
pub mod query;
pub mod repository;

/// Storage footprint display helper.
pub use archive::format_size;
/// Gallery error types.
pub use error::{FieldError, GalleryError, ValidationErrors};
/// Memory record model and form-level validation.
pub use model::{Memory, MemoryDraft, generate_memory_id, is_valid_url};
/// Cache-side queries and statistics.
pub use query::GalleryStats;
/// Repository over a storage adapter.
pub use repository::{DeleteOutcome, MemoryRepository};
