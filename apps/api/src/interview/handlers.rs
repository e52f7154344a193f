//! Axum route handlers for the interview question API.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::interview::models::{InterviewBatch, InterviewRequest, QuestionsResponse};
use crate::interview::parser::parse_completion;
use crate::interview::prompts::build_prompt;
use crate::state::AppState;

/// Full pipeline for one request:
/// build prompt → await completion → parse → persist → respond.
///
/// The store is only reached after the completion has resolved and produced
/// at least one record.
pub async fn generate_questions(
    state: &AppState,
    request: InterviewRequest,
) -> Result<QuestionsResponse, AppError> {
    let prompt = build_prompt(&request);

    let completion = state.llm.complete(&prompt).await?;
    debug!(
        provider = state.llm.provider(),
        "Completion received:\n{completion}"
    );

    let questions = parse_completion(&completion);
    if questions.is_empty() {
        warn!(
            provider = state.llm.provider(),
            "Completion contained no question/answer pairs"
        );
    }
    let batch = InterviewBatch::new(request, questions)?;

    state
        .store
        .save(&batch, state.llm.provider(), state.llm.model())
        .await?;

    Ok(QuestionsResponse {
        questions: batch.questions,
    })
}

/// POST /api/interview-questions (also POST /generate-qa)
///
/// Generates, stores and returns interview question/answer pairs for a role.
pub async fn handle_interview_questions(
    State(state): State<AppState>,
    payload: Result<Json<InterviewRequest>, JsonRejection>,
) -> Result<Json<QuestionsResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    info!(
        job_type = %request.job_type,
        company_type = %request.company_type,
        "Generating interview questions"
    );

    let response = generate_questions(&state, request).await?;

    info!(count = response.questions.len(), "Interview questions generated");
    Ok(Json(response))
}
