//! Error types and error handling for the application
//!
//! This module defines custom error types that can be converted to HTTP responses.
//! All errors implement `IntoResponse` to provide consistent error formatting.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::state::{AgentStatus, RegistryError};

/// Application-level error types
///
/// Every registry failure surfaces here; each variant maps to an HTTP status
/// and a `{success: false, error}` body via `IntoResponse`. No error is fatal
/// and the registry is never left partially mutated.
#[derive(Error, Debug)]
pub enum AppError {
    /// Agent with the given code was not found
    #[error("Agent not found")]
    AgentNotFound(String),

    /// Requested status is not in the enumerated set
    #[error("Invalid status")]
    InvalidStatus(String),

    /// A required request field was absent or empty
    #[error("{0} is required")]
    MissingField(String),
}

impl From<RegistryError> for AppError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::AgentNotFound(code) => AppError::AgentNotFound(code),
            RegistryError::InvalidStatus(status) => AppError::InvalidStatus(status),
            RegistryError::MissingField(field) => AppError::MissingField(field.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::AgentNotFound(_) => (
                StatusCode::NOT_FOUND,
                json!({ "success": false, "error": self.to_string() }),
            ),
            // Callers get the full valid set for guidance
            AppError::InvalidStatus(_) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "success": false,
                    "error": self.to_string(),
                    "validStatuses": AgentStatus::ALL
                        .iter()
                        .map(|s| s.as_str())
                        .collect::<Vec<_>>(),
                }),
            ),
            AppError::MissingField(_) => (
                StatusCode::BAD_REQUEST,
                json!({ "success": false, "error": self.to_string() }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_error_conversion() {
        let err: AppError = RegistryError::AgentNotFound("ZZZ9".to_string()).into();
        assert!(matches!(err, AppError::AgentNotFound(code) if code == "ZZZ9"));

        let err: AppError = RegistryError::MissingField("Agent name").into();
        assert_eq!(err.to_string(), "Agent name is required");
    }

    #[test]
    fn test_http_status_mapping() {
        let response = AppError::AgentNotFound("ZZZ9".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = AppError::InvalidStatus("Busy".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = AppError::MissingField("Agent name".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
