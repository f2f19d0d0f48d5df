//! LLM-extractable payloads for case, precedent, and defense analysis

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// LLM-extracted case analysis structure
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[schemars(description = "Structured legal analysis of a new fact pattern")]
pub struct ExtractedCaseAnalysis {
    /// Narrative analysis of the fact pattern
    #[schemars(description = "Narrative legal analysis covering the governing law, how it applies to the facts, and the likely outcome")]
    pub analysis: String,

    /// Self-reported confidence
    #[schemars(description = "Confidence in the analysis as a number between 0 and 1, where 1 means the outcome is near-certain")]
    pub confidence: f64,
}

/// LLM-extracted precedent analysis structure
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[schemars(description = "Analysis of a prior case used as comparative authority")]
pub struct ExtractedPrecedentAnalysis {
    /// Narrative analysis of the precedent
    #[schemars(description = "What the precedent decided and how it bears on comparable fact patterns")]
    pub analysis: String,

    /// Key principles the precedent stands for
    #[schemars(description = "Short statements of the legal principles the precedent establishes (e.g., 'A written agreement controls over oral modifications')")]
    pub principles: Vec<String>,

    /// Self-reported confidence
    #[schemars(description = "Confidence in the analysis as a number between 0 and 1")]
    pub confidence: f64,
}

/// LLM-extracted defense strategy structure
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[schemars(description = "A defense strategy grounded in the supplied precedents")]
pub struct ExtractedDefenseStrategy {
    /// Narrative defense strategy
    #[schemars(description = "Comprehensive defense strategy: theory of the case, anticipated opposing arguments, and responses grounded in the supplied precedents")]
    pub strategy: String,

    /// Self-reported confidence
    #[schemars(description = "Confidence in the strategy as a number between 0 and 1")]
    pub confidence: f64,
}
