pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::interview::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/interview-questions",
            post(handlers::handle_interview_questions),
        )
        .route("/generate-qa", post(handlers::handle_interview_questions))
        .with_state(state)
}
