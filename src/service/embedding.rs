//! Embedding provider contract and OpenAI-backed implementation

use std::time::Duration;

use async_trait::async_trait;
use rig::client::EmbeddingsClient;
use rig::embeddings::EmbeddingModel;
use rig::providers::openai;

use crate::service::llm::LlmClient;

/// Environment variable overriding the embedding model
const ENV_EMBEDDING_MODEL: &str = "EMBEDDING_MODEL";

/// Default embedding model
const DEFAULT_MODEL: &str = openai::TEXT_EMBEDDING_3_SMALL;

#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    #[error("embedding provider failed: {0}")]
    Provider(String),

    #[error("provider returned {actual} dimensions, expected {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("embedding call timed out after {0:?}")]
    Timeout(Duration),
}

/// Maps text to a fixed-length vector.
///
/// Deterministic for identical input within a process lifetime; not
/// guaranteed across provider versions.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Fixed output dimension of every vector this provider produces
    fn dimension(&self) -> usize;

    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;
}

/// OpenAI embedding provider using the shared LLM client
pub struct OpenAiEmbeddingProvider {
    model: openai::EmbeddingModel,
    model_name: String,
}

impl OpenAiEmbeddingProvider {
    /// Uses EMBEDDING_MODEL env var (defaults to text-embedding-3-small)
    pub fn new(llm_client: &LlmClient) -> Self {
        let model_name =
            std::env::var(ENV_EMBEDDING_MODEL).unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let model = llm_client.openai_client().embedding_model(&model_name);

        tracing::info!(model = %model_name, "Embedding provider initialized");

        Self { model, model_name }
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAiEmbeddingProvider {
    fn dimension(&self) -> usize {
        self.model.ndims()
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let start_time = std::time::Instant::now();

        let embedding = self.model.embed_text(text).await.map_err(|e| {
            tracing::error!(model = %self.model_name, error = %e, "Embedding request failed");
            EmbeddingError::Provider(e.to_string())
        })?;

        tracing::debug!(
            model = %self.model_name,
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            text_length = text.len(),
            "Embedded text"
        );

        Ok(embedding.vec.into_iter().map(|v| v as f32).collect())
    }
}
