//! Vector store contract and its PostgreSQL/pgvector implementation

use async_trait::async_trait;
use pgvector::Vector;
use sqlx::{FromRow, PgPool};

use super::StoreError;

/// Record shape accepted by the store
#[derive(Debug, Clone)]
pub struct StoredRecord {
    pub id: String,
    pub embedding: Vec<f32>,
    pub document: String,
    /// Flat metadata object with scalar string values
    pub metadata: serde_json::Value,
}

/// A nearest-neighbor hit
#[derive(Debug, Clone)]
pub struct ScoredRecord {
    pub id: String,
    pub document: String,
    pub metadata: serde_json::Value,
    pub distance: f64,
}

/// Equality clauses over metadata fields, combined with logical AND
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    clauses: Vec<(String, String)>,
}

impl RecordFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn equals(mut self, field: &str, value: &str) -> Self {
        self.clauses.push((field.to_string(), value.to_string()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn clauses(&self) -> &[(String, String)] {
        &self.clauses
    }
}

/// Nearest-neighbor store for embeddings with attached document text and
/// metadata.
///
/// Query results come back in the store's native ascending-distance order.
/// Ties are broken by the store's internal order, which is not guaranteed to
/// be stable across runs.
#[async_trait]
pub trait VectorStore: Send + Sync {
    async fn insert(&self, record: StoredRecord) -> Result<(), StoreError>;

    async fn query(
        &self,
        embedding: &[f32],
        top_k: usize,
        filter: &RecordFilter,
    ) -> Result<Vec<ScoredRecord>, StoreError>;

    async fn count(&self) -> Result<u64, StoreError>;
}

/// pgvector-backed store over a shared connection pool.
///
/// The pool is process-wide and internally synchronized; concurrent readers
/// and writers need no additional locking here.
#[derive(Clone)]
pub struct PgVectorStore {
    pool: PgPool,
}

#[derive(Debug, FromRow)]
struct ScoredRow {
    id: String,
    document: String,
    metadata: serde_json::Value,
    distance: f64,
}

impl PgVectorStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VectorStore for PgVectorStore {
    async fn insert(&self, record: StoredRecord) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO legal_cases (id, document, metadata, embedding)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE SET
                document = EXCLUDED.document,
                metadata = EXCLUDED.metadata,
                embedding = EXCLUDED.embedding
            "#,
        )
        .bind(&record.id)
        .bind(&record.document)
        .bind(&record.metadata)
        .bind(Vector::from(record.embedding.clone()))
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Write(e.to_string()))?;

        tracing::debug!(id = %record.id, "Inserted vector record");
        Ok(())
    }

    async fn query(
        &self,
        embedding: &[f32],
        top_k: usize,
        filter: &RecordFilter,
    ) -> Result<Vec<ScoredRecord>, StoreError> {
        // Build dynamic query; the embedding is always $1. Field names come
        // from this crate, not from callers.
        let mut conditions = Vec::new();
        let mut params: Vec<String> = Vec::new();

        for (field, value) in filter.clauses() {
            params.push(value.clone());
            conditions.push(format!("metadata->>'{}' = ${}", field, params.len() + 1));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let select_query = format!(
            r#"
            SELECT id, document, metadata, embedding <-> $1 AS distance
            FROM legal_cases
            {}
            ORDER BY embedding <-> $1
            LIMIT {}
            "#,
            where_clause, top_k
        );

        let rows: Vec<ScoredRow> = {
            let mut q = sqlx::query_as(&select_query).bind(Vector::from(embedding.to_vec()));
            for param in &params {
                q = q.bind(param);
            }
            q.fetch_all(&self.pool)
                .await
                .map_err(|e| StoreError::Query(e.to_string()))?
        };

        Ok(rows
            .into_iter()
            .map(|row| ScoredRecord {
                id: row.id,
                document: row.document,
                metadata: row.metadata,
                distance: row.distance,
            })
            .collect())
    }

    async fn count(&self) -> Result<u64, StoreError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM legal_cases")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(total as u64)
    }
}
