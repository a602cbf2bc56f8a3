use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::application::UseCaseError;
use crate::domain::StoreError;
use crate::presentation::http::dto::ApiResponse;

pub type ApiResult<T> = Result<(StatusCode, Json<ApiResponse<T>>), ApiFailure>;

/// Use-case failure rendered as an error envelope.
#[derive(Debug)]
pub struct ApiFailure(pub UseCaseError);

impl From<UseCaseError> for ApiFailure {
    fn from(error: UseCaseError) -> Self {
        Self(error)
    }
}

impl ApiFailure {
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match &self.0 {
            UseCaseError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            UseCaseError::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            UseCaseError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            UseCaseError::Store(store) => match store {
                StoreError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
                StoreError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
                StoreError::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
                StoreError::Unavailable(_) => {
                    (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE")
                }
                StoreError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
            },
        }
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            error!("Request failed: {}", self.0);
        }

        let body: ApiResponse<()> = ApiResponse::error(code.to_string(), self.0.to_string(), None);
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (UseCaseError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (UseCaseError::Forbidden("x".into()), StatusCode::FORBIDDEN),
            (UseCaseError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (
                UseCaseError::Store(StoreError::Unavailable("pool".into())),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                UseCaseError::Store(StoreError::Database("syntax".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(ApiFailure(error).status_and_code().0, expected);
        }
    }
}
