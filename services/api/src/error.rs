//! Custom error types for the API service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::services::ServiceError;

/// Custom error type for the API service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing or invalid bearer token
    #[error("Unauthorized")]
    Unauthorized,

    /// Authenticated but not allowed into this area
    #[error("Forbidden")]
    Forbidden,

    /// Failure outside the service layer
    #[error("{0}")]
    Internal(String),

    /// Service outcome carrying its own classification
    #[error("{0}")]
    Service(#[from] ServiceError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            ApiError::Forbidden => (StatusCode::FORBIDDEN, "Forbidden".to_string()),
            ApiError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
            ApiError::Service(err) => {
                let status = match &err {
                    ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
                    ServiceError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
                    ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
                    ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
                    ServiceError::Conflict(_) => StatusCode::CONFLICT,
                    ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, err.to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_status_mapping() {
        let cases = [
            (
                ServiceError::Validation("v".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                ServiceError::Unauthorized("u".to_string()),
                StatusCode::UNAUTHORIZED,
            ),
            (
                ServiceError::Forbidden("f".to_string()),
                StatusCode::FORBIDDEN,
            ),
            (
                ServiceError::NotFound("n".to_string()),
                StatusCode::NOT_FOUND,
            ),
            (
                ServiceError::Conflict("c".to_string()),
                StatusCode::CONFLICT,
            ),
            (
                ServiceError::Internal("i".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            let response = ApiError::from(err).into_response();
            assert_eq!(response.status(), expected);
        }
    }

    #[test]
    fn test_error_body_carries_the_message() {
        let response =
            ApiError::Service(ServiceError::NotFound("User not found.".to_string()))
                .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_bare_variants_map_to_auth_statuses() {
        let unauthorized = ApiError::Unauthorized.into_response();
        assert_eq!(unauthorized.status(), StatusCode::UNAUTHORIZED);

        let forbidden = ApiError::Forbidden.into_response();
        assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);
    }
}
