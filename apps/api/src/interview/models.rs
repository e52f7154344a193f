use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::errors::AppError;

/// Role parameters posted by the caller. No field is required; anything
/// missing renders as an empty string in the prompt and the stored batch.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InterviewRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub job_type: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub work_experience: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub company_type: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub location: String,
}

/// Accepts any JSON scalar: strings verbatim, numbers and booleans
/// stringified, null as empty. Arrays and objects are kept as their JSON text.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

/// One question/answer pair. Only the response parser creates these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaRecord {
    pub question: String,
    pub answer: String,
}

/// A request plus the records generated for it. Never empty.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewBatch {
    #[serde(flatten)]
    pub request: InterviewRequest,
    pub questions: Vec<QaRecord>,
}

impl InterviewBatch {
    /// Zero records means the generation failed; such a batch is never built.
    pub fn new(request: InterviewRequest, questions: Vec<QaRecord>) -> Result<Self, AppError> {
        if questions.is_empty() {
            return Err(AppError::ParseEmpty);
        }
        Ok(Self { request, questions })
    }
}

/// Success body: the records only, never the echoed input.
#[derive(Debug, Serialize, Deserialize)]
pub struct QuestionsResponse {
    pub questions: Vec<QaRecord>,
}
