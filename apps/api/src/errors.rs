use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Seconds the caller is told to wait while the hosted model warms up.
pub const MODEL_LOADING_RETRY_AFTER_SECS: u64 = 30;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Extraction failed: {0}")]
    Extraction(String),

    #[error("Model loading, retry after {retry_after}s")]
    ModelLoading { retry_after: u64 },

    #[error("Upstream error: {details}")]
    Upstream { details: String },

    #[error("Unexpected response format from AI service")]
    UnexpectedResponse,

    #[error("Optimization failed: {0}")]
    Optimization(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::ModelLoading => AppError::ModelLoading {
                retry_after: MODEL_LOADING_RETRY_AFTER_SECS,
            },
            LlmError::Api { status, message } => {
                tracing::error!("Hugging Face API error (status {status}): {message}");
                AppError::Upstream { details: message }
            }
            LlmError::Http(e) => AppError::Upstream {
                details: e.to_string(),
            },
            LlmError::UnexpectedShape(body) => {
                tracing::error!("Unexpected HF response format: {body}");
                AppError::UnexpectedResponse
            }
            LlmError::Parse(e) => {
                tracing::error!("Could not decode HF response: {e}");
                AppError::UnexpectedResponse
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "METHOD_NOT_ALLOWED",
                "Method not allowed".to_string(),
            ),
            AppError::Extraction(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "EXTRACTION_FAILED",
                msg.clone(),
            ),
            AppError::ModelLoading { retry_after } => (
                StatusCode::SERVICE_UNAVAILABLE,
                "MODEL_LOADING",
                format!("AI model is loading. Please try again in {retry_after} seconds."),
            ),
            AppError::Upstream { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "UPSTREAM_ERROR",
                "AI service temporarily unavailable".to_string(),
            ),
            AppError::UnexpectedResponse => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "UNEXPECTED_RESPONSE",
                "Unexpected response format from AI service".to_string(),
            ),
            AppError::Optimization(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "OPTIMIZATION_FAILED",
                msg.clone(),
            ),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error. Please try again later.".to_string(),
                )
            }
        };

        let mut body = json!({
            "success": false,
            "error": message,
            "code": code,
        });

        match &self {
            AppError::ModelLoading { retry_after } => {
                body["retryAfter"] = json!(retry_after);
            }
            AppError::Upstream { details } => {
                body["details"] = json!(details);
            }
            _ => {}
        }

        (status, Json(body)).into_response()
    }
}
