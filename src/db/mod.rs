//! Database module for PostgreSQL + pgvector persistence

pub mod repository;
pub mod store;

pub use repository::{CaseRepository, RepositoryError};
pub use store::{PgVectorStore, RecordFilter, ScoredRecord, StoredRecord, VectorStore};

use std::env;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

// Environment variable names
const ENV_POSTGRES_HOST: &str = "PRECEDENT_INTEL_POSTGRES_HOST";
const ENV_POSTGRES_PORT: &str = "PRECEDENT_INTEL_POSTGRES_PORT";
const ENV_POSTGRES_USER: &str = "PRECEDENT_INTEL_POSTGRES_USER";
const ENV_POSTGRES_PASSWORD: &str = "PRECEDENT_INTEL_POSTGRES_PASSWORD";
const ENV_POSTGRES_DB: &str = "PRECEDENT_INTEL_POSTGRES_DB";

// Default values
const DEFAULT_POSTGRES_HOST: &str = "127.0.0.1";
const DEFAULT_POSTGRES_PORT: &str = "5432";
const DEFAULT_POSTGRES_USER: &str = "precedent_intel";
const DEFAULT_POSTGRES_PASSWORD: &str = "precedent_intel";
const DEFAULT_POSTGRES_DB: &str = "precedent_intel";

/// Failure modes of the vector store contract
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store write failed: {0}")]
    Write(String),

    #[error("store query failed: {0}")]
    Query(String),

    #[error("store operation timed out after {0:?}")]
    Timeout(Duration),
}

/// Create a new database connection pool
pub async fn create_pool() -> Result<PgPool, sqlx::Error> {
    let host = env::var(ENV_POSTGRES_HOST).unwrap_or_else(|_| DEFAULT_POSTGRES_HOST.to_string());
    let port = env::var(ENV_POSTGRES_PORT).unwrap_or_else(|_| DEFAULT_POSTGRES_PORT.to_string());
    let user = env::var(ENV_POSTGRES_USER).unwrap_or_else(|_| DEFAULT_POSTGRES_USER.to_string());
    let password =
        env::var(ENV_POSTGRES_PASSWORD).unwrap_or_else(|_| DEFAULT_POSTGRES_PASSWORD.to_string());
    let database = env::var(ENV_POSTGRES_DB).unwrap_or_else(|_| DEFAULT_POSTGRES_DB.to_string());

    let database_url = format!(
        "postgres://{}:{}@{}:{}/{}",
        user, password, host, port, database
    );

    tracing::debug!(host = %host, port = %port, database = %database, "Connecting to PostgreSQL");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await?;

    tracing::info!(host = %host, port = %port, "PostgreSQL connection established");

    Ok(pool)
}

/// Initialize database schema
///
/// `dimension` must match the embedding provider's output dimension; the
/// column type is fixed at creation time.
pub async fn init_schema(pool: &PgPool, dimension: usize) -> Result<(), sqlx::Error> {
    sqlx::query("CREATE EXTENSION IF NOT EXISTS vector")
        .execute(pool)
        .await?;

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS legal_cases (
            id VARCHAR(64) PRIMARY KEY,
            document TEXT NOT NULL,
            metadata JSONB NOT NULL DEFAULT '{{}}',
            embedding vector({dimension}) NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#
    ))
    .execute(pool)
    .await?;

    // Create indexes separately
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_legal_cases_jurisdiction ON legal_cases ((metadata->>'jurisdiction'))",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_legal_cases_case_type ON legal_cases ((metadata->>'case_type'))",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_legal_cases_embedding ON legal_cases USING hnsw (embedding vector_l2_ops)",
    )
    .execute(pool)
    .await?;

    tracing::info!(dimension = dimension, "Database schema initialized");

    Ok(())
}
