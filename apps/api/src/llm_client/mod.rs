/// LLM Client: the single point of entry for all completion calls.
///
/// ARCHITECTURAL RULE: No other module may call a provider API directly.
/// Each provider is an adapter behind `CompletionClient`; which one runs is
/// decided once at startup from `Config::provider`.
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::config::{Config, Provider};

pub mod anthropic;
pub mod gemini;
pub mod openai;
pub mod prompts;

pub use anthropic::AnthropicClient;
pub use gemini::GeminiClient;
pub use openai::OpenAiCompatClient;

/// Sampling temperature sent with every completion request.
pub const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 4096;

/// Normalized provider failure. Adapters map their own error shapes onto this.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    #[error("provider throttled the request")]
    Throttled { retry_after: Option<String> },

    #[error("API error (status {status}): {message}")]
    Provider { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("prompt must not be empty")]
    EmptyPrompt,
}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            LlmError::Provider {
                status: e.status().map(|s| s.as_u16()).unwrap_or(200),
                message: format!("malformed response body: {e}"),
            }
        } else {
            LlmError::Unavailable(e.to_string())
        }
    }
}

/// Submit a prompt, get back one completion's text.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    fn provider(&self) -> &str;

    fn model(&self) -> &str;

    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}

/// Builds the adapter for the configured provider.
pub fn build_client(config: &Config) -> Result<Arc<dyn CompletionClient>, LlmError> {
    let http = http_client()?;
    let key = config.llm_api_key.clone();
    let model = config.llm_model.clone();

    let client: Arc<dyn CompletionClient> = match config.provider {
        Provider::Groq => Arc::new(OpenAiCompatClient::groq(http, key, model)),
        Provider::OpenAi => Arc::new(OpenAiCompatClient::openai(http, key, model)),
        Provider::Anthropic => Arc::new(AnthropicClient::new(http, key, model)),
        Provider::Gemini => Arc::new(GeminiClient::new(http, key, model)),
    };
    Ok(client)
}

/// No request timeout: a hung provider call holds only its own request.
fn http_client() -> Result<Client, LlmError> {
    Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| LlmError::Unavailable(format!("failed to build HTTP client: {e}")))
}

pub(crate) fn ensure_prompt(prompt: &str) -> Result<(), LlmError> {
    if prompt.trim().is_empty() {
        return Err(LlmError::EmptyPrompt);
    }
    Ok(())
}

/// Reads a non-success response and turns it into an `LlmError`.
pub(crate) async fn failure_from_response(response: reqwest::Response) -> LlmError {
    let status = response.status();
    let retry_after = response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = response.text().await.unwrap_or_default();
    classify_failure(status, retry_after.as_deref(), &body)
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

/// Maps an HTTP failure onto the normalized taxonomy.
///
/// All three providers wrap errors as `{"error": {"message": ...}}`; Gemini
/// adds `status` and a `details` array that may carry a `retryDelay`.
pub(crate) fn classify_failure(
    status: StatusCode,
    retry_after_header: Option<&str>,
    body: &str,
) -> LlmError {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let envelope = parsed
        .as_ref()
        .and_then(|v| ErrorEnvelope::deserialize(v).ok());

    let exhausted = envelope
        .as_ref()
        .and_then(|e| e.error.status.as_deref())
        .is_some_and(|s| s == "RESOURCE_EXHAUSTED");

    if status == StatusCode::TOO_MANY_REQUESTS || exhausted {
        let retry_after = retry_after_header
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty())
            .or_else(|| parsed.as_ref().and_then(find_retry_delay));
        return LlmError::Throttled { retry_after };
    }

    let message = envelope
        .and_then(|e| e.error.message)
        .unwrap_or_else(|| body.trim().to_string());

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return LlmError::Unavailable(format!("authentication failed ({status}): {message}"));
    }

    LlmError::Provider {
        status: status.as_u16(),
        message,
    }
}

/// Depth-first search for the first string `retryDelay` in an error payload.
fn find_retry_delay(value: &Value) -> Option<String> {
    match value {
        Value::Object(map) => {
            if let Some(Value::String(delay)) = map.get("retryDelay") {
                return Some(delay.clone());
            }
            map.values().find_map(find_retry_delay)
        }
        Value::Array(items) => items.iter().find_map(find_retry_delay),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GEMINI_QUOTA_BODY: &str = r#"{
        "error": {
            "code": 429,
            "message": "You exceeded your current quota.",
            "status": "RESOURCE_EXHAUSTED",
            "details": [
                {"@type": "type.googleapis.com/google.rpc.QuotaFailure", "violations": []},
                {"@type": "type.googleapis.com/google.rpc.RetryInfo", "retryDelay": "37s"}
            ]
        }
    }"#;

    #[test]
    fn test_429_uses_retry_after_header() {
        let err = classify_failure(StatusCode::TOO_MANY_REQUESTS, Some("12"), "");
        match err {
            LlmError::Throttled { retry_after } => assert_eq!(retry_after.as_deref(), Some("12")),
            other => panic!("expected Throttled, got {other:?}"),
        }
    }

    #[test]
    fn test_429_reads_retry_delay_from_gemini_details() {
        let err = classify_failure(StatusCode::TOO_MANY_REQUESTS, None, GEMINI_QUOTA_BODY);
        match err {
            LlmError::Throttled { retry_after } => assert_eq!(retry_after.as_deref(), Some("37s")),
            other => panic!("expected Throttled, got {other:?}"),
        }
    }

    #[test]
    fn test_resource_exhausted_status_is_throttled_even_without_429() {
        let err = classify_failure(StatusCode::BAD_REQUEST, None, GEMINI_QUOTA_BODY);
        assert!(matches!(err, LlmError::Throttled { .. }));
    }

    #[test]
    fn test_429_without_hint_has_none() {
        let body = r#"{"error": {"message": "Rate limit reached", "type": "tokens"}}"#;
        let err = classify_failure(StatusCode::TOO_MANY_REQUESTS, None, body);
        match err {
            LlmError::Throttled { retry_after } => assert!(retry_after.is_none()),
            other => panic!("expected Throttled, got {other:?}"),
        }
    }

    #[test]
    fn test_401_is_unavailable() {
        let body = r#"{"error": {"message": "Invalid API Key"}}"#;
        let err = classify_failure(StatusCode::UNAUTHORIZED, None, body);
        match err {
            LlmError::Unavailable(msg) => assert!(msg.contains("Invalid API Key")),
            other => panic!("expected Unavailable, got {other:?}"),
        }
    }

    #[test]
    fn test_other_status_is_provider_error_with_message() {
        let body = r#"{"type": "error", "error": {"type": "invalid_request_error", "message": "model not found"}}"#;
        let err = classify_failure(StatusCode::NOT_FOUND, None, body);
        match err {
            LlmError::Provider { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "model not found");
            }
            other => panic!("expected Provider, got {other:?}"),
        }
    }

    #[test]
    fn test_non_json_body_falls_back_to_raw_text() {
        let err = classify_failure(StatusCode::BAD_GATEWAY, None, "  upstream connect error  ");
        match err {
            LlmError::Provider { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "upstream connect error");
            }
            other => panic!("expected Provider, got {other:?}"),
        }
    }

    #[test]
    fn test_ensure_prompt_rejects_blank() {
        assert!(matches!(ensure_prompt("  \n"), Err(LlmError::EmptyPrompt)));
        assert!(ensure_prompt("Generate questions").is_ok());
    }
}
