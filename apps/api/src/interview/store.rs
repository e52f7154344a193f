//! Record store: persists generated batches. Write-only from this service.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::interview::models::InterviewBatch;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Carried in `AppState` as `Arc<dyn BatchStore>`.
#[async_trait]
pub trait BatchStore: Send + Sync {
    /// Persists one batch and returns its id.
    async fn save(
        &self,
        batch: &InterviewBatch,
        provider: &str,
        model: &str,
    ) -> Result<Uuid, StoreError>;
}

/// PostgreSQL-backed store. `questions` is kept as a JSONB document.
#[derive(Clone)]
pub struct PgBatchStore {
    pool: PgPool,
}

impl PgBatchStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BatchStore for PgBatchStore {
    async fn save(
        &self,
        batch: &InterviewBatch,
        provider: &str,
        model: &str,
    ) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO interview_batches
                (id, job_type, work_experience, company_type, location, questions, provider, model)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(id)
        .bind(&batch.request.job_type)
        .bind(&batch.request.work_experience)
        .bind(&batch.request.company_type)
        .bind(&batch.request.location)
        .bind(Json(&batch.questions))
        .bind(provider)
        .bind(model)
        .execute(&self.pool)
        .await?;

        info!(batch_id = %id, questions = batch.questions.len(), "Interview batch saved");
        Ok(id)
    }
}
