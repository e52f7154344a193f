use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::interview::store::StoreError;
use crate::llm_client::LlmError;

/// Hint returned with a throttling error when the provider gives none.
pub const DEFAULT_RETRY_AFTER: &str = "60s";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid request body: {0}")]
    BadRequest(String),

    #[error("LLM provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("LLM provider throttled the request")]
    ProviderThrottled { retry_after: Option<String> },

    #[error("LLM provider error: {0}")]
    Provider(String),

    #[error("No question/answer pairs could be parsed from the completion")]
    ParseEmpty,

    #[error("Persistence error: {0}")]
    Persistence(#[from] StoreError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<LlmError> for AppError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::Unavailable(msg) => AppError::ProviderUnavailable(msg),
            LlmError::Throttled { retry_after } => AppError::ProviderThrottled { retry_after },
            LlmError::EmptyPrompt => AppError::Internal("prompt must not be empty".to_string()),
            // An empty completion parses to zero records.
            LlmError::EmptyContent => AppError::ParseEmpty,
            other @ LlmError::Provider { .. } => AppError::Provider(other.to_string()),
        }
    }
}

/// Turns a hint such as `"37s"` or `"37"` into whole seconds for the header.
fn retry_after_seconds(hint: &str) -> Option<u64> {
    let hint = hint.trim();
    hint.strip_suffix('s').unwrap_or(hint).parse().ok()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid request body: {msg}"),
            ),
            AppError::ProviderUnavailable(msg) => {
                tracing::error!("LLM provider unavailable: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "LLM provider is unavailable".to_string(),
                )
            }
            AppError::ProviderThrottled { retry_after } => {
                let retry_after = retry_after
                    .clone()
                    .unwrap_or_else(|| DEFAULT_RETRY_AFTER.to_string());
                tracing::warn!("LLM provider throttled, retry after {retry_after}");

                let body = Json(json!({
                    "error": "LLM provider quota exceeded. Please try again later.",
                    "retryAfter": retry_after,
                }));
                let mut response = (StatusCode::SERVICE_UNAVAILABLE, body).into_response();
                if let Some(seconds) = retry_after_seconds(&retry_after) {
                    response
                        .headers_mut()
                        .insert(header::RETRY_AFTER, HeaderValue::from(seconds));
                }
                return response;
            }
            AppError::Provider(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to generate interview questions".to_string(),
                )
            }
            AppError::ParseEmpty => {
                tracing::error!("Failed to parse questions from completion");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to parse LLM response properly.".to_string(),
                )
            }
            AppError::Persistence(e) => {
                tracing::error!("Persistence error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to save interview questions".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
