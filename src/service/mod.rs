pub mod analysis;
pub mod batch;
pub mod defense;
pub mod embedding;
pub mod extraction;
pub mod llm;
pub mod risk;

pub use analysis::LegalAnalysisService;
pub use batch::{AnalysisTask, BatchProcessor, TaskOutcome};
pub use defense::DefenseStrategyService;
pub use embedding::{EmbeddingProvider, OpenAiEmbeddingProvider};
pub use llm::{LegalModel, LlmClient, OpenAiLegalModel};
