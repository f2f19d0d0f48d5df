//! Risk bucketing and recommendation generation from retrieved precedent
//! outcomes

use crate::model::{Case, CaseAnalysis, RiskAssessment, RiskLevel};

/// Holding keywords counting toward a favorable outcome
const FAVORABLE_KEYWORDS: &[&str] = &["grant", "favor", "win", "success"];

/// Holding keywords counting toward an unfavorable outcome. "denied" appears
/// alongside "deny" because substring matching does not cover the inflected
/// form.
const UNFAVORABLE_KEYWORDS: &[&str] = &["deny", "denied", "dismiss", "lose", "fail"];

/// Favorable-ratio floor for the low-risk bucket
const LOW_RISK_RATIO: f64 = 0.7;

/// Favorable-ratio floor for the medium-risk bucket
const MEDIUM_RISK_RATIO: f64 = 0.4;

/// Bucket the risk of a new matter from the outcomes of its similar cases.
///
/// A holding matching both keyword sets counts as favorable only; a holding
/// matching neither contributes to the total but to no bucket.
pub fn assess_risk(case_facts: &str, similar_cases: &[Case], jurisdiction: &str) -> RiskAssessment {
    let mut favorable = 0usize;
    let mut unfavorable = 0usize;

    for case in similar_cases {
        let holding = case.holding.to_lowercase();
        if FAVORABLE_KEYWORDS.iter().any(|kw| holding.contains(kw)) {
            favorable += 1;
        } else if UNFAVORABLE_KEYWORDS.iter().any(|kw| holding.contains(kw)) {
            unfavorable += 1;
        }
    }

    let total = similar_cases.len();
    let (risk_level, risk_score, favorable_ratio) = if total == 0 {
        (RiskLevel::Unknown, 0.5, 0.0)
    } else {
        let ratio = favorable as f64 / total as f64;
        if ratio >= LOW_RISK_RATIO {
            (RiskLevel::Low, 0.2, ratio)
        } else if ratio >= MEDIUM_RISK_RATIO {
            (RiskLevel::Medium, 0.5, ratio)
        } else {
            (RiskLevel::High, 0.8, ratio)
        }
    };

    tracing::debug!(
        jurisdiction = %jurisdiction,
        facts_length = case_facts.len(),
        total = total,
        favorable = favorable,
        unfavorable = unfavorable,
        risk_level = %risk_level,
        "Assessed case risk"
    );

    RiskAssessment {
        risk_level,
        risk_score,
        favorable_cases: favorable,
        unfavorable_cases: unfavorable,
        total_similar_cases: total,
        favorable_ratio,
    }
}

/// Recommendation list for a matter: risk-specific guidance, a precedent
/// pointer when similar cases exist, then a fixed preparation tail.
pub fn recommend(
    _case_analysis: &CaseAnalysis,
    similar_cases: &[Case],
    risk_assessment: &RiskAssessment,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    match risk_assessment.risk_level {
        RiskLevel::High => {
            recommendations
                .push("Consider settlement negotiations early in the process".to_string());
            recommendations
                .push("Focus on strong evidence collection and witness preparation".to_string());
        }
        RiskLevel::Low => {
            recommendations.push("Prepare comprehensive defense strategy".to_string());
            recommendations.push("Consider expert witness testimony".to_string());
        }
        RiskLevel::Medium | RiskLevel::Unknown => {
            recommendations
                .push("Proceed with confidence but maintain thorough preparation".to_string());
        }
    }

    if !similar_cases.is_empty() {
        recommendations.push(format!(
            "Study {} similar cases for precedent",
            similar_cases.len()
        ));
    }

    recommendations.extend([
        "Ensure all evidence is properly documented and preserved".to_string(),
        "Prepare witnesses thoroughly for testimony".to_string(),
        "Consider alternative dispute resolution if appropriate".to_string(),
    ]);

    recommendations
}
