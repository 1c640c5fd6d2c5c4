//! API response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;
use trust_core::{ErrorResponse, TrustError};

/// Standard API response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorResponse>,
}

impl<T> ApiResponse<T> {
    /// Creates a successful response.
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Creates an error response.
    pub fn error(error: ErrorResponse) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

/// Builds an error envelope response with an explicit status.
pub fn error_response(status: StatusCode, error: ErrorResponse) -> Response {
    (status, Json(ApiResponse::<()>::error(error))).into_response()
}

/// Application error type for Axum.
#[derive(Debug)]
pub struct AppError(pub TrustError);

impl From<TrustError> for AppError {
    fn from(err: TrustError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!("Request failed: {}", self.0);
        }

        error_response(status, ErrorResponse::from_error(&self.0))
    }
}

/// Result type for Axum handlers.
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, AppError>;

/// Helper to create a success response.
pub fn ok<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(Json(ApiResponse::success(data)))
}

/// Helper to create a created (201) response.
pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<ApiResponse<T>>) {
    (StatusCode::CREATED, Json(ApiResponse::success(data)))
}

/// Helper to create a no content (204) response.
pub fn no_content() -> StatusCode {
    StatusCode::NO_CONTENT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        let cases = [
            (TrustError::validation("bad"), StatusCode::BAD_REQUEST),
            (TrustError::not_found("User", 1), StatusCode::NOT_FOUND),
            (TrustError::conflict("raced"), StatusCode::CONFLICT),
            (
                TrustError::Timeout("100s".to_string()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                TrustError::PartialFailure {
                    user_id: 9,
                    message: "gone".to_string(),
                },
                StatusCode::BAD_GATEWAY,
            ),
            (TrustError::decode("truncated"), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            assert_eq!(AppError(err).into_response().status(), expected);
        }
    }

    #[test]
    fn test_success_envelope_omits_error() {
        let json = serde_json::to_value(ApiResponse::success(5)).unwrap();
        assert_eq!(json, serde_json::json!({"success": true, "data": 5}));
    }
}
