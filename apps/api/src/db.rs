use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Table holding every generated batch. `created_at` gives creation order.
const CREATE_INTERVIEW_BATCHES: &str = r#"
CREATE TABLE IF NOT EXISTS interview_batches (
    id              UUID PRIMARY KEY,
    job_type        TEXT NOT NULL,
    work_experience TEXT NOT NULL,
    company_type    TEXT NOT NULL,
    location        TEXT NOT NULL,
    questions       JSONB NOT NULL,
    provider        TEXT NOT NULL,
    model           TEXT NOT NULL,
    created_at      TIMESTAMPTZ NOT NULL DEFAULT now()
)
"#;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Creates the batch table if it does not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(CREATE_INTERVIEW_BATCHES).execute(pool).await?;
    info!("Schema ready");
    Ok(())
}
