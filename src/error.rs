use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::models::ApiResponse;

/// Application-wide error types.
///
/// Authentication rejections do not pass through here - the middleware maps
/// those to the 401 envelope itself so a well-formed response is written
/// exactly once per request. `AppError` covers everything else: startup
/// configuration problems, caller-configuration bugs surfaced by the
/// signature codec, and unexpected internal faults.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Full details stay server-side; clients get sanitized messages
        tracing::error!(error = %self, "Request failed");

        let (status, code, message) = match &self {
            AppError::InvalidArgument(msg) => {
                (StatusCode::BAD_REQUEST, "INVALID_ARGUMENT", msg.as_str())
            }
            AppError::ConfigError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIG_ERROR",
                "Service configuration error. Please contact support.",
            ),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred. Please try again later.",
            ),
        };

        (status, Json(ApiResponse::<()>::error(code, message))).into_response()
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_error_hides_details() {
        let response = AppError::Internal("sensitive backend detail".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_invalid_argument_is_bad_request() {
        let response = AppError::InvalidArgument("project token must not be empty".to_string())
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_error_display() {
        let err = AppError::ConfigError("TIMESTAMP_TOLERANCE_SECS must be positive".to_string());
        assert!(err.to_string().contains("TIMESTAMP_TOLERANCE_SECS"));
    }
}
