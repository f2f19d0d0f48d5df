//! Application state and service initialization
//!
//! Centralizes service construction and dependency injection: the embedding
//! provider, vector store, and legal model are built once here and handed to
//! the services that consume them.

use std::sync::Arc;

use crate::db::repository::CaseRepository;
use crate::db::store::PgVectorStore;
use crate::model::Config;
use crate::service::batch::BatchProcessor;
use crate::service::embedding::{EmbeddingProvider, OpenAiEmbeddingProvider};
use crate::service::llm::{LegalModel, LlmClient, OpenAiLegalModel};
use crate::service::{DefenseStrategyService, LegalAnalysisService};

/// Application state containing all services and shared resources
pub struct AppState {
    /// Case storage and similarity retrieval
    pub repository: Arc<CaseRepository>,
    /// Case analysis facade
    pub analysis_service: Arc<LegalAnalysisService>,
    /// Defense strategy generation
    pub defense_service: Arc<DefenseStrategyService>,
    /// Batch task runner
    pub batch_processor: BatchProcessor,
}

impl AppState {
    /// Initialize all services and build application state
    ///
    /// This performs:
    /// 1. LLM client initialization (requires OPENAI_API_KEY)
    /// 2. Database connection and schema initialization, sized to the
    ///    embedding provider's dimension
    /// 3. Service dependency graph construction
    pub async fn new(config: Config) -> Result<Self, AppError> {
        // Create shared LLM client (required)
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| AppError::MissingConfig("OPENAI_API_KEY"))?;

        let llm_client =
            LlmClient::new(&api_key).map_err(|_| AppError::InvalidConfig("Invalid OPENAI_API_KEY"))?;

        let embedder: Arc<dyn EmbeddingProvider> =
            Arc::new(OpenAiEmbeddingProvider::new(&llm_client));

        // Initialize PostgreSQL database
        let db_pool = crate::db::create_pool()
            .await
            .map_err(|e| AppError::DatabaseInit(e.to_string()))?;

        // Initialize database schema
        crate::db::init_schema(&db_pool, embedder.dimension())
            .await
            .map_err(|e| AppError::DatabaseInit(e.to_string()))?;

        let store = Arc::new(PgVectorStore::new(db_pool));

        // Build service dependency graph
        let repository = Arc::new(CaseRepository::new(store, embedder, config.store_timeout));

        let model: Arc<dyn LegalModel> = Arc::new(OpenAiLegalModel::new(llm_client));

        let analysis_service = Arc::new(LegalAnalysisService::new(
            Arc::clone(&repository),
            Arc::clone(&model),
            config.rules.clone(),
            config.llm_timeout,
        ));

        let defense_service = Arc::new(DefenseStrategyService::new(
            Arc::clone(&repository),
            Arc::clone(&model),
            config.llm_timeout,
        ));

        let batch_processor = BatchProcessor::new(
            Arc::clone(&analysis_service),
            Arc::clone(&defense_service),
            model,
            config.llm_timeout,
        );

        Ok(Self {
            repository,
            analysis_service,
            defense_service,
            batch_processor,
        })
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AppError {
    /// Database initialization failed
    #[error("Database initialization failed: {0}")]
    DatabaseInit(String),

    /// Missing required configuration
    #[error("Missing required configuration: {0}")]
    MissingConfig(&'static str),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(&'static str),
}
