//! Case analysis facade
//!
//! Composes similarity retrieval, LLM case and precedent analysis, risk
//! bucketing, recommendations, and confidence scoring into one operation.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::time::timeout;

use crate::db::repository::{CaseRepository, RepositoryError};
use crate::model::{AnalysisResult, Case, CaseId, LegalRules, Precedent};
use crate::service::llm::{LegalModel, LlmError};
use crate::service::risk;

pub mod confidence;
pub mod error;

pub use error::AnalysisError;

/// Similar cases retrieved per analysis
const SIMILAR_CASE_LIMIT: usize = 5;

/// Top similar cases analyzed as precedents
const PRECEDENT_LIMIT: usize = 3;

/// Facade over case storage, retrieval, and LLM-backed analysis
pub struct LegalAnalysisService {
    repository: Arc<CaseRepository>,
    model: Arc<dyn LegalModel>,
    rules: LegalRules,
    llm_timeout: Duration,
}

impl LegalAnalysisService {
    pub fn new(
        repository: Arc<CaseRepository>,
        model: Arc<dyn LegalModel>,
        rules: LegalRules,
        llm_timeout: Duration,
    ) -> Self {
        tracing::info!("Legal analysis service initialized");
        Self {
            repository,
            model,
            rules,
            llm_timeout,
        }
    }

    /// Embed and persist a case
    pub async fn add_case(&self, case: &Case) -> Result<CaseId, RepositoryError> {
        self.repository.add(case).await
    }

    /// Retrieve cases similar to a fact pattern
    pub async fn find_similar_cases(
        &self,
        case_facts: &str,
        jurisdiction: Option<&str>,
        case_type: Option<&str>,
        limit: Option<usize>,
    ) -> Vec<Case> {
        self.repository
            .query_similar(case_facts, jurisdiction, case_type, limit)
            .await
    }

    /// Full analysis of a new matter.
    ///
    /// Only the primary LLM analysis is fatal; retrieval degrades to an
    /// empty similar-case set and per-precedent failures are skipped.
    pub async fn analyze_case(
        &self,
        case_facts: &str,
        jurisdiction: &str,
        case_type: &str,
    ) -> Result<AnalysisResult, AnalysisError> {
        self.check_rules(jurisdiction, case_type);

        let similar_cases = self
            .repository
            .query_similar(
                case_facts,
                Some(jurisdiction),
                Some(case_type),
                Some(SIMILAR_CASE_LIMIT),
            )
            .await;

        let case_analysis = match timeout(
            self.llm_timeout,
            self.model
                .analyze_case(case_facts, jurisdiction, case_type, &similar_cases),
        )
        .await
        {
            Ok(result) => result?,
            Err(_) => return Err(LlmError::Timeout(self.llm_timeout).into()),
        };

        let mut precedents = Vec::new();
        for case in similar_cases.iter().take(PRECEDENT_LIMIT) {
            let case_text = case.summary_text();
            match timeout(
                self.llm_timeout,
                self.model.analyze_precedent(&case.case_name, &case_text),
            )
            .await
            {
                Ok(Ok(analysis)) => precedents.push(Precedent {
                    case: case.clone(),
                    analysis,
                }),
                Ok(Err(e)) => {
                    tracing::warn!(case_name = %case.case_name, error = %e, "Skipping precedent analysis")
                }
                Err(_) => {
                    tracing::warn!(case_name = %case.case_name, timeout = ?self.llm_timeout, "Skipping precedent analysis after timeout")
                }
            }
        }

        let risk_assessment = risk::assess_risk(case_facts, &similar_cases, jurisdiction);
        let recommendations = risk::recommend(&case_analysis, &similar_cases, &risk_assessment);
        let confidence_score =
            confidence::confidence_score(&case_analysis, &precedents, similar_cases.len());

        tracing::info!(
            similar_cases = similar_cases.len(),
            precedents = precedents.len(),
            risk_level = %risk_assessment.risk_level,
            confidence = confidence_score,
            "Case analysis complete"
        );

        Ok(AnalysisResult {
            case_analysis,
            similar_cases,
            precedents,
            risk_assessment,
            recommendations,
            confidence_score,
            generated_at: Utc::now(),
        })
    }

    /// Rule tables are validation/display only; unknown keys warn and never
    /// affect retrieval.
    fn check_rules(&self, jurisdiction: &str, case_type: &str) {
        if self.rules.jurisdiction_name(jurisdiction).is_none() {
            tracing::warn!(jurisdiction = %jurisdiction, "Jurisdiction not present in the legal rules table");
        }
        if !self.rules.is_known_case_type(case_type) {
            tracing::warn!(case_type = %case_type, "Case type not present in the legal rules table");
        }
    }
}
