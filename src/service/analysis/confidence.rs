//! Confidence computation for assembled case analyses

use crate::model::{CaseAnalysis, Precedent};

/// Weight of the model's own confidence in the primary analysis
const BASE_WEIGHT: f64 = 0.5;

/// Weight of retrieval coverage
const CASE_FACTOR_WEIGHT: f64 = 0.3;

/// Weight of mean precedent-analysis confidence
const PRECEDENT_WEIGHT: f64 = 0.2;

/// Similar-case count at which retrieval coverage saturates
const CASE_FACTOR_SATURATION: f64 = 5.0;

/// Stand-in confidence when no precedent analyses are available
const NEUTRAL_CONFIDENCE: f64 = 0.5;

/// Weighted confidence for one analysis, rounded to two decimals.
///
/// Every term lies in [0, 1] and the weights sum to 1, so the result is
/// bounded in [0, 1] by construction.
pub fn confidence_score(
    case_analysis: &CaseAnalysis,
    precedents: &[Precedent],
    similar_case_count: usize,
) -> f64 {
    let base = case_analysis.confidence;

    let case_factor = (similar_case_count as f64 / CASE_FACTOR_SATURATION).min(1.0);

    let precedent_confidence = if precedents.is_empty() {
        NEUTRAL_CONFIDENCE
    } else {
        precedents
            .iter()
            .map(|p| p.analysis.confidence)
            .sum::<f64>()
            / precedents.len() as f64
    };

    let score = BASE_WEIGHT * base
        + CASE_FACTOR_WEIGHT * case_factor
        + PRECEDENT_WEIGHT * precedent_confidence;

    (score * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PrecedentAnalysis;
    use crate::testing::sample_case;

    fn analysis(confidence: f64) -> CaseAnalysis {
        CaseAnalysis {
            analysis: "analysis".to_string(),
            model: "test-model".to_string(),
            confidence,
        }
    }

    fn precedent(confidence: f64) -> Precedent {
        Precedent {
            case: sample_case("P v. D", "federal", "civil", "Granted"),
            analysis: PrecedentAnalysis {
                case_name: "P v. D".to_string(),
                analysis: "precedent analysis".to_string(),
                principles: Vec::new(),
                model: "test-model".to_string(),
                confidence,
            },
        }
    }

    #[test]
    fn test_score_is_bounded() {
        for base in [0.0, 0.25, 0.5, 1.0] {
            for count in [0usize, 1, 5, 50] {
                for pc in [0.0, 0.5, 1.0] {
                    let score = confidence_score(&analysis(base), &[precedent(pc)], count);
                    assert!((0.0..=1.0).contains(&score), "score {score} out of bounds");
                }
            }
        }
    }

    #[test]
    fn test_no_precedents_uses_neutral_confidence() {
        // 0.5*0.8 + 0.3*1.0 + 0.2*0.5 = 0.80
        let score = confidence_score(&analysis(0.8), &[], 5);
        assert_eq!(score, 0.8);
    }

    #[test]
    fn test_precedent_confidences_average() {
        // precedent mean = 0.7; 0.5*0.6 + 0.3*0.4 + 0.2*0.7 = 0.56
        let score = confidence_score(&analysis(0.6), &[precedent(0.9), precedent(0.5)], 2);
        assert_eq!(score, 0.56);
    }

    #[test]
    fn test_case_factor_saturates_at_five() {
        let at_five = confidence_score(&analysis(0.5), &[], 5);
        let at_fifty = confidence_score(&analysis(0.5), &[], 50);
        assert_eq!(at_five, at_fifty);
    }

    #[test]
    fn test_rounds_to_two_decimals() {
        // 0.5*0.333 + 0.3*0.2 + 0.2*0.5 = 0.3265 -> 0.33
        let score = confidence_score(&analysis(0.333), &[], 1);
        assert_eq!(score, 0.33);
    }
}
