//! Error types for case analysis

use thiserror::Error;

use crate::service::llm::LlmError;

/// Error type for the analysis facade.
///
/// Retrieval failures never appear here; they degrade to an empty
/// similar-case set before analysis begins.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AnalysisError {
    #[error("case analysis failed: {0}")]
    Llm(#[from] LlmError),
}
