//! Core case entity and its stored-document representation

use serde::{Deserialize, Serialize};

/// Identifier assigned to a case when it is persisted (`case_<uuid>`)
pub type CaseId = String;

/// Separator between sections of the stored document text
const SUMMARY_SEPARATOR: &str = " | ";

/// A legal precedent or matter under analysis.
///
/// Constructed by callers from parsed documents or user input, embedded and
/// persisted through the case repository, and immutable thereafter; an update
/// is modeled as a re-insertion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Case {
    pub case_name: String,
    pub court: String,
    pub date: String,
    pub jurisdiction: String,
    pub case_type: String,
    pub key_facts: Vec<String>,
    pub legal_issues: Vec<String>,
    pub holding: String,
    pub reasoning: String,
    pub citation: Option<String>,
    #[serde(default)]
    pub judges: Vec<String>,
    #[serde(default)]
    pub parties: Vec<String>,
    /// Present only after embedding computation; length always equals the
    /// embedding provider's output dimension.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
}

impl Case {
    /// Flatten the case into the document text that is embedded and stored
    /// alongside its vector.
    ///
    /// Narrative sections are appended only when non-empty, so a bare case
    /// still produces a searchable document from its descriptive fields.
    pub fn summary_text(&self) -> String {
        let mut parts = vec![
            format!("Case: {}", self.case_name),
            format!("Court: {}", self.court),
            format!("Date: {}", self.date),
            format!("Jurisdiction: {}", self.jurisdiction),
            format!("Case Type: {}", self.case_type),
        ];

        if !self.key_facts.is_empty() {
            parts.push(format!("Key Facts: {}", self.key_facts.join(" ")));
        }

        if !self.legal_issues.is_empty() {
            parts.push(format!("Legal Issues: {}", self.legal_issues.join(" ")));
        }

        if !self.holding.is_empty() {
            parts.push(format!("Holding: {}", self.holding));
        }

        if !self.reasoning.is_empty() {
            parts.push(format!("Reasoning: {}", self.reasoning));
        }

        parts.join(SUMMARY_SEPARATOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_case() -> Case {
        Case {
            case_name: "Smith v. Jones".to_string(),
            court: "Superior Court".to_string(),
            date: "2021-03-15".to_string(),
            jurisdiction: "california".to_string(),
            case_type: "civil".to_string(),
            key_facts: Vec::new(),
            legal_issues: Vec::new(),
            holding: String::new(),
            reasoning: String::new(),
            citation: None,
            judges: Vec::new(),
            parties: Vec::new(),
            embedding: None,
        }
    }

    #[test]
    fn test_summary_text_minimal_case() {
        let case = minimal_case();
        assert_eq!(
            case.summary_text(),
            "Case: Smith v. Jones | Court: Superior Court | Date: 2021-03-15 \
             | Jurisdiction: california | Case Type: civil"
        );
    }

    #[test]
    fn test_summary_text_includes_narrative_sections() {
        let mut case = minimal_case();
        case.key_facts = vec!["Evidence of non-payment".to_string(), "Written agreement".to_string()];
        case.legal_issues = vec!["Whether the contract was breached".to_string()];
        case.holding = "Judgment granted for plaintiff".to_string();
        case.reasoning = "Because the agreement was unambiguous".to_string();

        let text = case.summary_text();
        assert!(text.contains("Key Facts: Evidence of non-payment Written agreement"));
        assert!(text.contains("Legal Issues: Whether the contract was breached"));
        assert!(text.contains("Holding: Judgment granted for plaintiff"));
        assert!(text.ends_with("Reasoning: Because the agreement was unambiguous"));
    }

    #[test]
    fn test_summary_text_skips_empty_sections() {
        let mut case = minimal_case();
        case.holding = "Claim denied".to_string();

        let text = case.summary_text();
        assert!(!text.contains("Key Facts:"));
        assert!(!text.contains("Legal Issues:"));
        assert!(!text.contains("Reasoning:"));
        assert!(text.ends_with("Holding: Claim denied"));
    }
}
