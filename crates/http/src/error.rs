//! Error handling for the adboard HTTP layer

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

/// Message returned in place of internal error details.
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal server error occurred";

/// Standard error response format for all HTTP errors
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    pub details: Vec<serde_json::Value>,
    pub trace_id: String,
    pub timestamp: String,
}

/// Envelope wrapping [`ErrorBody`] under an `error` key
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

/// Application error types that map to HTTP responses
#[derive(Error, Debug)]
pub enum AppError {
    #[error("validation error: {message}")]
    Validation {
        details: Vec<serde_json::Value>,
        code: String,
        message: String,
    },

    #[error("not found: {message}")]
    NotFound { message: String, code: String },

    #[error("not acceptable: {message}")]
    NotAcceptable { message: String, code: String },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Create a validation error
    pub fn validation(details: Vec<serde_json::Value>, message: impl Into<String>) -> Self {
        Self::Validation {
            details,
            code: "validation_error".to_string(),
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            code: "not_found".to_string(),
        }
    }

    /// Create a not acceptable error
    pub fn not_acceptable(message: impl Into<String>) -> Self {
        Self::NotAcceptable {
            message: message.into(),
            code: "not_acceptable".to_string(),
        }
    }

    /// Status code this error maps to
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::NotAcceptable { .. } => StatusCode::NOT_ACCEPTABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_id = Uuid::new_v4();
        let timestamp = OffsetDateTime::now_utc().to_string();
        let status = self.status();

        let (error_code, message, details) = match self {
            AppError::Validation {
                details,
                code,
                message,
            } => (code, message, details),
            AppError::NotFound { message, code } => (code, message, Vec::new()),
            AppError::NotAcceptable { message, code } => (code, message, Vec::new()),
            AppError::Internal(e) => {
                // Full cause chain stays in the log; the client only gets the trace id.
                tracing::error!(
                    error_id = %error_id,
                    error = %format!("{:#}", e),
                    "internal error"
                );
                (
                    "internal_error".to_string(),
                    INTERNAL_ERROR_MESSAGE.to_string(),
                    Vec::new(),
                )
            }
        };

        if status.is_server_error() {
            tracing::error!(
                error_id = %error_id,
                error_code = %error_code,
                status_code = %status.as_u16(),
                "Request error"
            );
        } else {
            tracing::debug!(
                error_id = %error_id,
                error_code = %error_code,
                status_code = %status.as_u16(),
                "Request error"
            );
        }

        let envelope = ErrorEnvelope {
            error: ErrorBody {
                code: error_code,
                message,
                details,
                trace_id: error_id.to_string(),
                timestamp,
            },
        };

        (status, Json(envelope)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), 64 * 1024).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_validation_error() {
        let details = vec![serde_json::json!({"field": "price", "error": "required"})];
        let error = AppError::validation(details.clone(), "No required fields");

        match error {
            AppError::Validation {
                details: d,
                code,
                message,
            } => {
                assert_eq!(d, details);
                assert_eq!(code, "validation_error");
                assert_eq!(message, "No required fields");
            }
            _ => panic!("Expected Validation error"),
        }
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::validation(vec![], "x").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::not_found("x").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::not_acceptable("x").status(),
            StatusCode::NOT_ACCEPTABLE
        );
    }

    #[tokio::test]
    async fn test_error_response_format() {
        let response = AppError::not_found("Advertisement not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "not_found");
        assert_eq!(body["error"]["message"], "Advertisement not found");
        assert_eq!(body["error"]["details"], serde_json::json!([]));
        let trace_id = body["error"]["trace_id"].as_str().unwrap();
        assert!(Uuid::parse_str(trace_id).is_ok());
        assert!(body["error"]["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_internal_error_is_opaque() {
        let internal_error = anyhow::anyhow!("connection refused by 10.0.0.7:27017");
        let response = AppError::Internal(internal_error).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "internal_error");
        assert_eq!(body["error"]["message"], INTERNAL_ERROR_MESSAGE);
        assert!(!body.to_string().contains("10.0.0.7"));
    }
}
