//! Analysis result types: LLM payloads, risk buckets, and the assembled report

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::case::Case;

fn default_confidence() -> f64 {
    0.5
}

/// Primary LLM analysis of a new fact pattern
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseAnalysis {
    /// Narrative analysis text produced by the model
    pub analysis: String,
    /// Model that produced the analysis
    pub model: String,
    /// Model's own confidence in the analysis, in [0, 1]
    #[serde(default = "default_confidence")]
    pub confidence: f64,
}

/// LLM analysis of a single retrieved precedent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrecedentAnalysis {
    pub case_name: String,
    pub analysis: String,
    /// Key legal principles the model extracted from the precedent
    #[serde(default)]
    pub principles: Vec<String>,
    pub model: String,
    #[serde(default = "default_confidence")]
    pub confidence: f64,
}

/// A retrieved precedent paired with its analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Precedent {
    pub case: Case,
    pub analysis: PrecedentAnalysis,
}

/// LLM-generated defense strategy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefenseStrategy {
    pub strategy: String,
    pub model: String,
    /// Number of similar cases supplied to the model as context
    pub similar_cases_used: usize,
    #[serde(default = "default_confidence")]
    pub confidence: f64,
}

/// Risk bucket derived from retrieved precedent outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    /// No similar cases were available to assess against
    Unknown,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Unknown => "unknown",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome-based risk assessment over the retrieved similar cases
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub risk_level: RiskLevel,
    /// 0.2 / 0.5 / 0.8 for low / medium / high; 0.5 when unknown
    pub risk_score: f64,
    pub favorable_cases: usize,
    pub unfavorable_cases: usize,
    pub total_similar_cases: usize,
    /// favorable_cases / total_similar_cases; 0 when no cases were retrieved
    pub favorable_ratio: f64,
}

/// The assembled output of one `analyze_case` call.
///
/// Constructed fresh per call and never persisted by this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub case_analysis: CaseAnalysis,
    /// Ranked by ascending distance, most similar first
    pub similar_cases: Vec<Case>,
    pub precedents: Vec<Precedent>,
    pub risk_assessment: RiskAssessment,
    pub recommendations: Vec<String>,
    pub confidence_score: f64,
    pub generated_at: DateTime<Utc>,
}
