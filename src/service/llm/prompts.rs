//! Prompts for case analysis, precedent analysis, and defense generation

use crate::model::Case;

/// Similar cases included in a prompt
const PROMPT_SIMILAR_CASE_LIMIT: usize = 5;

/// Precedent text is truncated to this many characters to stay inside
/// token limits
const PRECEDENT_TEXT_LIMIT: usize = 3000;

/// System prompt for case analysis
pub const CASE_ANALYSIS_SYSTEM_PROMPT: &str = r#"You are an expert legal analyst. Your task is to analyze a new fact pattern and produce a structured, defensible legal analysis.

## Rules

1. **Ground the analysis in the supplied facts and precedents only.**
   - Do not invent facts, statutes, or case names that were not provided.
   - If the precedents are thin or off-point, say so rather than stretching them.

2. **Structure the analysis.**
   - Identify the governing legal framework for the jurisdiction and case type.
   - Apply the framework to the supplied facts.
   - State the likely outcome and the main points of uncertainty.

3. **Report confidence honestly.**
   - Confidence is a number between 0 and 1.
   - Strong, on-point precedents and clear facts justify high confidence.
   - Sparse facts, conflicting precedents, or novel questions justify low confidence.

## What to avoid

- Boilerplate disclaimers ("consult an attorney")
- Restating the facts without analysis
- Citing authority that was not supplied
"#;

/// System prompt for precedent analysis
pub const PRECEDENT_SYSTEM_PROMPT: &str = r#"You are a legal researcher. Your task is to analyze a prior case and extract the principles it stands for.

## Rules

1. Describe what the case decided, based only on the supplied text.
2. State each principle as a short, standalone sentence a practitioner could cite.
3. Note how the case is likely to be used as comparative authority.
4. Report confidence between 0 and 1; lower it when the supplied text is fragmentary.
"#;

/// System prompt for defense generation
pub const DEFENSE_SYSTEM_PROMPT: &str = r#"You are a skilled defense attorney. Your task is to produce a comprehensive defense strategy for a new matter.

## Rules

1. Build the strategy around the supplied facts and the outcomes of the supplied similar cases.
2. Cover: the theory of the case, the strongest arguments, anticipated opposing arguments with responses, and evidentiary priorities.
3. Where a similar case's holding cuts against the client, address it directly rather than ignoring it.
4. Report confidence between 0 and 1.
"#;

/// Build the case analysis prompt
pub fn build_case_analysis_prompt(
    case_facts: &str,
    jurisdiction: &str,
    case_type: &str,
    similar_cases: &[Case],
) -> String {
    format!(
        r#"Analyze the following matter.

## Matter
- Jurisdiction: {jurisdiction}
- Case Type: {case_type}

## Case Facts

{case_facts}

## Similar Cases Retrieved

{}

---

Produce a structured legal analysis grounded in the facts and precedents above, with:
- analysis: the governing framework, its application to these facts, and the likely outcome
- confidence: a number between 0 and 1"#,
        format_similar_cases(similar_cases)
    )
}

/// Build the precedent analysis prompt
pub fn build_precedent_prompt(case_name: &str, case_text: &str) -> String {
    format!(
        r#"Analyze the following precedent.

## Precedent Case
{case_name}

## Case Text

{}

---

Extract what the case decided and the principles it stands for. Return:
- analysis: what the case decided and how it bears on comparable fact patterns
- principles: short standalone statements of the legal principles established
- confidence: a number between 0 and 1"#,
        truncate_chars(case_text, PRECEDENT_TEXT_LIMIT)
    )
}

/// Build the defense generation prompt
pub fn build_defense_prompt(case_facts: &str, similar_cases: &[Case], jurisdiction: &str) -> String {
    format!(
        r#"Generate a defense strategy for the following matter.

## Matter
- Jurisdiction: {jurisdiction}

## Case Facts

{case_facts}

## Similar Cases Retrieved

{}

---

Return:
- strategy: the comprehensive defense strategy
- confidence: a number between 0 and 1"#,
        format_similar_cases(similar_cases)
    )
}

/// One-line-per-case digest of the retrieved precedents
fn format_similar_cases(similar_cases: &[Case]) -> String {
    if similar_cases.is_empty() {
        return "(none retrieved)".to_string();
    }

    similar_cases
        .iter()
        .take(PROMPT_SIMILAR_CASE_LIMIT)
        .map(|case| format!("Case: {}\nHolding: {}\n", case.case_name, case.holding))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Truncate on a character boundary
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}
