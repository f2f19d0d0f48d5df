//! Defense strategy generation service

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;

use crate::db::repository::CaseRepository;
use crate::model::DefenseStrategy;
use crate::service::llm::{LegalModel, LlmError};

/// Similar cases supplied to the model as context
const SIMILAR_CASE_LIMIT: usize = 5;

/// Generates defense strategies grounded in retrieved precedents
pub struct DefenseStrategyService {
    repository: Arc<CaseRepository>,
    model: Arc<dyn LegalModel>,
    llm_timeout: Duration,
}

impl DefenseStrategyService {
    pub fn new(
        repository: Arc<CaseRepository>,
        model: Arc<dyn LegalModel>,
        llm_timeout: Duration,
    ) -> Self {
        tracing::info!("Defense strategy service initialized");
        Self {
            repository,
            model,
            llm_timeout,
        }
    }

    /// Generate a defense strategy for a new matter.
    ///
    /// Retrieval degrades to an empty precedent set; the generation call
    /// itself is fatal since the strategy is the deliverable.
    pub async fn generate_defense(
        &self,
        case_facts: &str,
        jurisdiction: &str,
    ) -> Result<DefenseStrategy, LlmError> {
        let similar_cases = self
            .repository
            .query_similar(case_facts, Some(jurisdiction), None, Some(SIMILAR_CASE_LIMIT))
            .await;

        match timeout(
            self.llm_timeout,
            self.model
                .generate_defense(case_facts, &similar_cases, jurisdiction),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(LlmError::Timeout(self.llm_timeout)),
        }
    }
}
