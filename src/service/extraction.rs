//! Keyword-heuristic recovery of case fields from stored document text
//!
//! These are crude lexical filters, not NLP: a sentence is kept when it
//! contains a keyword, nothing more. They run only when structured fields
//! are absent, i.e. when rebuilding a case from its stored document.

const FACT_KEYWORDS: &[&str] = &["alleged", "evidence", "witness", "testimony", "found"];
const ISSUE_KEYWORDS: &[&str] = &["issue", "question", "whether", "claim"];
const HOLDING_KEYWORDS: &[&str] = &["hold", "holding", "conclude", "find", "determine"];
const REASONING_KEYWORDS: &[&str] = &["because", "therefore", "thus", "consequently"];

/// Sentences kept per extraction
const MAX_SENTENCES: usize = 5;

/// A sentence shorter than this cannot be a holding
const MIN_HOLDING_LEN: usize = 20;

/// Returned when no sentence qualifies as a holding
pub const HOLDING_NOT_FOUND: &str = "Holding not found";

/// Sentences that read like factual findings
pub fn extract_facts(text: &str) -> Vec<String> {
    matching_sentences(text, FACT_KEYWORDS)
}

/// Sentences that frame a legal issue
pub fn extract_issues(text: &str) -> Vec<String> {
    matching_sentences(text, ISSUE_KEYWORDS)
}

/// Sentences that carry the court's reasoning
pub fn extract_reasoning(text: &str) -> Vec<String> {
    matching_sentences(text, REASONING_KEYWORDS)
}

/// First substantial sentence that reads like a holding, or the literal
/// "Holding not found"
pub fn extract_holding(text: &str) -> String {
    text.split('.')
        .map(str::trim)
        .find(|s| s.len() > MIN_HOLDING_LEN && contains_any(s, HOLDING_KEYWORDS))
        .map(str::to_string)
        .unwrap_or_else(|| HOLDING_NOT_FOUND.to_string())
}

fn matching_sentences(text: &str, keywords: &[&str]) -> Vec<String> {
    text.split('.')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter(|s| contains_any(s, keywords))
        .take(MAX_SENTENCES)
        .map(str::to_string)
        .collect()
}

fn contains_any(sentence: &str, keywords: &[&str]) -> bool {
    let lower = sentence.to_lowercase();
    keywords.iter().any(|kw| lower.contains(kw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_facts_keeps_keyword_sentences_only() {
        let text = "Defendant failed to pay under contract; evidence shows written agreement \
                    and witness testimony of non-payment. The weather was cold that day. \
                    The plaintiff alleged breach.";

        let facts = extract_facts(text);

        assert_eq!(facts.len(), 2);
        assert!(facts[0].contains("evidence"));
        assert!(facts[0].contains("witness"));
        assert!(facts[1].contains("alleged"));
        assert!(facts.iter().all(|f| !f.contains("weather")));
    }

    #[test]
    fn test_extract_facts_caps_at_five() {
        let text = "Evidence one. Evidence two. Evidence three. Evidence four. \
                    Evidence five. Evidence six. Evidence seven.";
        assert_eq!(extract_facts(text).len(), 5);
    }

    #[test]
    fn test_extract_facts_is_case_insensitive() {
        let facts = extract_facts("EVIDENCE was presented");
        assert_eq!(facts, vec!["EVIDENCE was presented"]);
    }

    #[test]
    fn test_extract_issues() {
        let text = "The question is whether the contract was valid. The sky was blue. \
                    Plaintiff raises a claim of negligence.";

        let issues = extract_issues(text);

        assert_eq!(issues.len(), 2);
        assert!(issues[0].contains("whether"));
        assert!(issues[1].contains("claim"));
    }

    #[test]
    fn test_extract_holding_returns_first_qualifying_sentence() {
        let text = "Background facts here. We hold that the defendant breached the contract \
                    and is liable for damages. Further discussion follows.";

        assert_eq!(
            extract_holding(text),
            "We hold that the defendant breached the contract and is liable for damages"
        );
    }

    #[test]
    fn test_extract_holding_skips_short_sentences() {
        // "We so hold" carries a keyword but is under the length floor
        let text = "We so hold. The court concludes that the motion for summary judgment \
                    must be denied.";

        assert!(extract_holding(text).starts_with("The court concludes"));
    }

    #[test]
    fn test_extract_holding_not_found() {
        assert_eq!(
            extract_holding("Nothing dispositive appears in this text at all"),
            HOLDING_NOT_FOUND
        );
        assert_eq!(extract_holding(""), HOLDING_NOT_FOUND);
    }

    #[test]
    fn test_extract_reasoning() {
        let text = "The agreement was written. Because the terms were unambiguous, \
                    extrinsic evidence was excluded. Therefore the plaintiff prevails.";

        let reasoning = extract_reasoning(text);

        assert_eq!(reasoning.len(), 2);
        assert!(reasoning[0].starts_with("Because"));
        assert!(reasoning[1].starts_with("Therefore"));
    }

    #[test]
    fn test_empty_text_extracts_nothing() {
        assert!(extract_facts("").is_empty());
        assert!(extract_issues("").is_empty());
        assert!(extract_reasoning("").is_empty());
    }
}
