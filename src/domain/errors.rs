use thiserror::Error;

/// Failures surfaced by every repository implementation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Store unavailable: {0}")]
    Unavailable(String),
    #[error("Database error: {0}")]
    Database(String),
}

impl StoreError {
    pub fn not_found(kind: &str, id: impl std::fmt::Display) -> Self {
        StoreError::NotFound(format!("{} {}", kind, id))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}
