//! Shared LLM client, the legal-model contract, and its OpenAI implementation
//!
//! Substantive legal reasoning is delegated here: case analysis, precedent
//! analysis, and defense generation, each as a structured extraction.

use std::time::Duration;

use async_trait::async_trait;
use rig::client::CompletionClient;
use rig::providers::openai;

use crate::model::extracted::{
    ExtractedCaseAnalysis, ExtractedDefenseStrategy, ExtractedPrecedentAnalysis,
};
use crate::model::{Case, CaseAnalysis, DefenseStrategy, PrecedentAnalysis};

pub mod prompts;

/// Environment variable for the case analysis model (defaults to gpt-4o-mini)
const ENV_CASE_ANALYSIS_MODEL: &str = "CASE_ANALYSIS_MODEL";

/// Environment variable for the precedent analysis model
const ENV_PRECEDENT_ANALYSIS_MODEL: &str = "PRECEDENT_ANALYSIS_MODEL";

/// Environment variable for the defense generation model
const ENV_DEFENSE_MODEL: &str = "DEFENSE_MODEL";

/// Default model for all three operations
const DEFAULT_MODEL: &str = openai::GPT_4O_MINI;

/// Shared OpenAI client wrapper.
///
/// One client is created at startup and handed to both the legal model and
/// the embedding provider.
#[derive(Clone)]
pub struct LlmClient {
    client: openai::Client,
}

impl LlmClient {
    pub fn new(api_key: &str) -> Result<Self, String> {
        let client = openai::Client::new(api_key);

        Ok(Self { client })
    }

    /// The underlying OpenAI client, for building extractors and embedding
    /// models
    pub fn openai_client(&self) -> &openai::Client {
        &self.client
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("LLM extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("LLM call timed out after {0:?}")]
    Timeout(Duration),
}

/// The three model-backed operations this system consumes.
///
/// Every payload carries a confidence in [0, 1]; implementations clamp
/// whatever the model reports.
#[async_trait]
pub trait LegalModel: Send + Sync {
    async fn analyze_case(
        &self,
        case_facts: &str,
        jurisdiction: &str,
        case_type: &str,
        similar_cases: &[Case],
    ) -> Result<CaseAnalysis, LlmError>;

    async fn analyze_precedent(
        &self,
        case_name: &str,
        case_text: &str,
    ) -> Result<PrecedentAnalysis, LlmError>;

    async fn generate_defense(
        &self,
        case_facts: &str,
        similar_cases: &[Case],
        jurisdiction: &str,
    ) -> Result<DefenseStrategy, LlmError>;
}

/// OpenAI-backed legal model using structured extraction
pub struct OpenAiLegalModel {
    llm_client: LlmClient,
    case_model: String,
    precedent_model: String,
    defense_model: String,
}

impl OpenAiLegalModel {
    /// Uses a shared LLM client passed from startup. Per-operation models
    /// can be overridden via env vars (all default to gpt-4o-mini).
    pub fn new(llm_client: LlmClient) -> Self {
        let case_model =
            std::env::var(ENV_CASE_ANALYSIS_MODEL).unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let precedent_model = std::env::var(ENV_PRECEDENT_ANALYSIS_MODEL)
            .unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let defense_model =
            std::env::var(ENV_DEFENSE_MODEL).unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        tracing::info!(
            case_model = %case_model,
            precedent_model = %precedent_model,
            defense_model = %defense_model,
            "Legal model initialized"
        );

        Self {
            llm_client,
            case_model,
            precedent_model,
            defense_model,
        }
    }
}

#[async_trait]
impl LegalModel for OpenAiLegalModel {
    async fn analyze_case(
        &self,
        case_facts: &str,
        jurisdiction: &str,
        case_type: &str,
        similar_cases: &[Case],
    ) -> Result<CaseAnalysis, LlmError> {
        let prompt =
            prompts::build_case_analysis_prompt(case_facts, jurisdiction, case_type, similar_cases);
        let prompt_length = prompt.len();

        tracing::debug!(
            model = %self.case_model,
            jurisdiction = %jurisdiction,
            case_type = %case_type,
            similar_cases = similar_cases.len(),
            prompt_length = prompt_length,
            "Initiating OpenAI API call for case analysis"
        );

        let start_time = std::time::Instant::now();

        let extractor = self
            .llm_client
            .openai_client()
            .extractor::<ExtractedCaseAnalysis>(&self.case_model)
            .preamble(prompts::CASE_ANALYSIS_SYSTEM_PROMPT)
            .additional_params(serde_json::json!({
                "temperature": 0.1
            }))
            .build();

        match extractor.extract(&prompt).await {
            Ok(extracted) => {
                tracing::info!(
                    model = %self.case_model,
                    elapsed_ms = start_time.elapsed().as_millis(),
                    prompt_length = prompt_length,
                    "OpenAI API call for case analysis completed successfully"
                );
                Ok(CaseAnalysis {
                    analysis: extracted.analysis,
                    model: self.case_model.clone(),
                    confidence: clamp_confidence(extracted.confidence),
                })
            }
            Err(e) => {
                tracing::error!(
                    model = %self.case_model,
                    elapsed_ms = start_time.elapsed().as_millis(),
                    error = %e,
                    "OpenAI API call for case analysis failed"
                );
                Err(LlmError::ExtractionFailed(e.to_string()))
            }
        }
    }

    async fn analyze_precedent(
        &self,
        case_name: &str,
        case_text: &str,
    ) -> Result<PrecedentAnalysis, LlmError> {
        let prompt = prompts::build_precedent_prompt(case_name, case_text);

        tracing::debug!(
            model = %self.precedent_model,
            case_name = %case_name,
            "Initiating OpenAI API call for precedent analysis"
        );

        let start_time = std::time::Instant::now();

        let extractor = self
            .llm_client
            .openai_client()
            .extractor::<ExtractedPrecedentAnalysis>(&self.precedent_model)
            .preamble(prompts::PRECEDENT_SYSTEM_PROMPT)
            .build();

        match extractor.extract(&prompt).await {
            Ok(extracted) => {
                tracing::info!(
                    model = %self.precedent_model,
                    case_name = %case_name,
                    elapsed_ms = start_time.elapsed().as_millis(),
                    "OpenAI API call for precedent analysis completed successfully"
                );
                Ok(PrecedentAnalysis {
                    case_name: case_name.to_string(),
                    analysis: extracted.analysis,
                    principles: extracted.principles,
                    model: self.precedent_model.clone(),
                    confidence: clamp_confidence(extracted.confidence),
                })
            }
            Err(e) => {
                tracing::error!(
                    model = %self.precedent_model,
                    case_name = %case_name,
                    elapsed_ms = start_time.elapsed().as_millis(),
                    error = %e,
                    "OpenAI API call for precedent analysis failed"
                );
                Err(LlmError::ExtractionFailed(e.to_string()))
            }
        }
    }

    async fn generate_defense(
        &self,
        case_facts: &str,
        similar_cases: &[Case],
        jurisdiction: &str,
    ) -> Result<DefenseStrategy, LlmError> {
        let prompt = prompts::build_defense_prompt(case_facts, similar_cases, jurisdiction);

        tracing::debug!(
            model = %self.defense_model,
            jurisdiction = %jurisdiction,
            similar_cases = similar_cases.len(),
            "Initiating OpenAI API call for defense generation"
        );

        let start_time = std::time::Instant::now();

        let extractor = self
            .llm_client
            .openai_client()
            .extractor::<ExtractedDefenseStrategy>(&self.defense_model)
            .preamble(prompts::DEFENSE_SYSTEM_PROMPT)
            .build();

        match extractor.extract(&prompt).await {
            Ok(extracted) => {
                tracing::info!(
                    model = %self.defense_model,
                    elapsed_ms = start_time.elapsed().as_millis(),
                    "OpenAI API call for defense generation completed successfully"
                );
                Ok(DefenseStrategy {
                    strategy: extracted.strategy,
                    model: self.defense_model.clone(),
                    similar_cases_used: similar_cases.len(),
                    confidence: clamp_confidence(extracted.confidence),
                })
            }
            Err(e) => {
                tracing::error!(
                    model = %self.defense_model,
                    elapsed_ms = start_time.elapsed().as_millis(),
                    error = %e,
                    "OpenAI API call for defense generation failed"
                );
                Err(LlmError::ExtractionFailed(e.to_string()))
            }
        }
    }
}

/// Model-reported confidence values arrive unchecked
fn clamp_confidence(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}
