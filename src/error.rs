// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::aspect::{AspectError, OperationError};

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),
    ValidationError(String),

    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error
    InternalServerError(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::ValidationError(_) => 400,
            ApiError::NotFound(_) => 404,
            ApiError::InternalServerError(_) => 500,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::ValidationError(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::ValidationError(_) => "VALIDATION_ERROR",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({
            "error": true,
            "message": self.message(),
            "code": self.error_code()
        })
    }
}

// Static constructor methods
impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn validation_error(message: impl Into<String>) -> Self {
        ApiError::ValidationError(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }
}

// Convert other error types to ApiError
impl From<OperationError> for ApiError {
    fn from(err: OperationError) -> Self {
        match err {
            OperationError::ValidationError(msg) => ApiError::validation_error(msg),
            OperationError::NotFound(msg) => ApiError::not_found(msg),
            OperationError::DatabaseError(msg) => {
                // Don't expose internal storage errors to clients
                tracing::error!("Database error: {}", msg);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
        }
    }
}

impl From<AspectError> for ApiError {
    fn from(err: AspectError) -> Self {
        match err {
            AspectError::Operation(e) => e.into(),
            AspectError::WrappedInvocation { owner, operation, .. } => {
                // The original failure was already logged by the around advice
                tracing::debug!("Wrapped invocation failure from {}.{}", owner, operation);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
            AspectError::AdviceFailed { advice, source } => {
                tracing::error!("Advice {} failed: {}", advice, source);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
            AspectError::ReturnTypeMismatch { expected, found } => {
                tracing::error!("Around advice returned {} where {} was expected", found, expected);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
        }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapped_failures_become_generic_500s() {
        let err: ApiError = AspectError::WrappedInvocation {
            owner: "EmployeeController".into(),
            operation: "update_employee".into(),
            source: Box::new(OperationError::ValidationError("firstName must not be null".into()).into()),
        }
        .into();

        assert_eq!(err.status_code(), 500);
        assert_eq!(err.error_code(), "INTERNAL_SERVER_ERROR");
        assert!(!err.to_json().to_string().contains("firstName"));
    }

    #[test]
    fn native_failures_keep_their_status() {
        let validation: ApiError = AspectError::from(OperationError::ValidationError("bad".into())).into();
        assert_eq!(validation.status_code(), 400);
        assert_eq!(validation.to_json()["code"], "VALIDATION_ERROR");

        let missing: ApiError = OperationError::NotFound("employee 9 not found".into()).into();
        assert_eq!(missing.status_code(), 404);
        assert_eq!(missing.message(), "employee 9 not found");
    }

    #[test]
    fn error_body_carries_message_and_code() {
        let body = ApiError::validation_error("firstName must not be null").to_json();
        assert_eq!(
            body,
            json!({
                "error": true,
                "message": "firstName must not be null",
                "code": "VALIDATION_ERROR"
            })
        );
    }

    #[test]
    fn storage_failures_hide_their_detail() {
        let err: ApiError = OperationError::DatabaseError("disk I/O error".into()).into();
        assert_eq!(err.status_code(), 500);
        assert!(!err.message().contains("disk"));
    }
}
