use thiserror::Error;

use crate::domain::StoreError;

#[derive(Debug, Error)]
pub enum UseCaseError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for UseCaseError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound(msg) => UseCaseError::NotFound(msg),
            StoreError::Validation(msg) => UseCaseError::Validation(msg),
            StoreError::Forbidden(msg) => UseCaseError::Forbidden(msg),
            other => UseCaseError::Store(other),
        }
    }
}
