//! Error types for gallery operations.

use recuerdo_rs_store::StoreError;

/// Errors returned by the repository and archive helpers.
#[derive(Debug, thiserror::Error)]
pub enum GalleryError {
    /// Storage adapter failure.
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
    /// Serialization error.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Form-level validation failure.
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),
    /// Import payload was valid JSON but not an array.
    #[error("import payload must be a JSON array")]
    NotAnArray,
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Form field the failure belongs to.
    pub field: &'static str,
    /// Human-readable reason.
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// All field failures from one validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, error) in self.0.iter().enumerate() {
            if index > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}
