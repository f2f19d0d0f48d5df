//! Test doubles shared across unit tests: a deterministic embedder, an
//! in-memory vector store, and a scripted legal model.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::db::store::{RecordFilter, ScoredRecord, StoredRecord, VectorStore};
use crate::db::StoreError;
use crate::model::{Case, CaseAnalysis, DefenseStrategy, PrecedentAnalysis};
use crate::service::embedding::{EmbeddingError, EmbeddingProvider};
use crate::service::llm::{LegalModel, LlmError};

/// Bag-of-words embedder: deterministic, and similar texts land near each
/// other under L2 distance.
pub(crate) struct StaticEmbedder {
    dimension: usize,
}

impl StaticEmbedder {
    pub(crate) fn new(dimension: usize) -> Self {
        Self { dimension }
    }
}

#[async_trait]
impl EmbeddingProvider for StaticEmbedder {
    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let mut vector = vec![0.0f32; self.dimension];
        for word in text.to_lowercase().split_whitespace() {
            // Strip punctuation so document structure ("|", "Facts:") does
            // not drown out the words themselves
            let word: String = word.chars().filter(|c| c.is_alphanumeric()).collect();
            if word.is_empty() {
                continue;
            }
            let bucket = word
                .bytes()
                .fold(0usize, |acc, b| (acc * 31 + b as usize) % self.dimension);
            vector[bucket] += 1.0;
        }
        Ok(vector)
    }
}

/// Embedder that always fails
pub(crate) struct FailingEmbedder;

#[async_trait]
impl EmbeddingProvider for FailingEmbedder {
    fn dimension(&self) -> usize {
        64
    }

    async fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
        Err(EmbeddingError::Provider("provider offline".to_string()))
    }
}

/// In-memory vector store with L2 distance and optional forced query
/// failure
pub(crate) struct InMemoryStore {
    records: Mutex<Vec<StoredRecord>>,
    fail_queries: AtomicBool,
}

impl InMemoryStore {
    pub(crate) fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            fail_queries: AtomicBool::new(false),
        }
    }

    pub(crate) fn fail_queries(&self, fail: bool) {
        self.fail_queries.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl VectorStore for InMemoryStore {
    async fn insert(&self, record: StoredRecord) -> Result<(), StoreError> {
        self.records.lock().unwrap().push(record);
        Ok(())
    }

    async fn query(
        &self,
        embedding: &[f32],
        top_k: usize,
        filter: &RecordFilter,
    ) -> Result<Vec<ScoredRecord>, StoreError> {
        if self.fail_queries.load(Ordering::SeqCst) {
            return Err(StoreError::Query("forced failure".to_string()));
        }

        let records = self.records.lock().unwrap();
        let mut scored: Vec<ScoredRecord> = records
            .iter()
            .filter(|record| {
                filter.clauses().iter().all(|(field, value)| {
                    record
                        .metadata
                        .get(field)
                        .and_then(serde_json::Value::as_str)
                        == Some(value.as_str())
                })
            })
            .map(|record| ScoredRecord {
                id: record.id.clone(),
                document: record.document.clone(),
                metadata: record.metadata.clone(),
                distance: l2_distance(embedding, &record.embedding),
            })
            .collect();

        scored.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        scored.truncate(top_k);
        Ok(scored)
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.records.lock().unwrap().len() as u64)
    }
}

fn l2_distance(a: &[f32], b: &[f32]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = (x - y) as f64;
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

/// Legal model returning canned payloads, with per-operation failure
/// switches
pub(crate) struct ScriptedModel {
    pub(crate) fail_case_analysis: bool,
    pub(crate) fail_defense: bool,
    pub(crate) fail_precedents_for: Vec<String>,
    pub(crate) case_confidence: f64,
    pub(crate) precedent_confidence: f64,
}

impl Default for ScriptedModel {
    fn default() -> Self {
        Self {
            fail_case_analysis: false,
            fail_defense: false,
            fail_precedents_for: Vec::new(),
            case_confidence: 0.8,
            precedent_confidence: 0.7,
        }
    }
}

#[async_trait]
impl LegalModel for ScriptedModel {
    async fn analyze_case(
        &self,
        _case_facts: &str,
        jurisdiction: &str,
        case_type: &str,
        similar_cases: &[Case],
    ) -> Result<CaseAnalysis, LlmError> {
        if self.fail_case_analysis {
            return Err(LlmError::ExtractionFailed("scripted failure".to_string()));
        }
        Ok(CaseAnalysis {
            analysis: format!(
                "Scripted analysis for {jurisdiction}/{case_type} with {} precedents",
                similar_cases.len()
            ),
            model: "scripted".to_string(),
            confidence: self.case_confidence,
        })
    }

    async fn analyze_precedent(
        &self,
        case_name: &str,
        _case_text: &str,
    ) -> Result<PrecedentAnalysis, LlmError> {
        if self.fail_precedents_for.iter().any(|name| name == case_name) {
            return Err(LlmError::ExtractionFailed("scripted failure".to_string()));
        }
        Ok(PrecedentAnalysis {
            case_name: case_name.to_string(),
            analysis: format!("Scripted precedent analysis of {case_name}"),
            principles: vec!["Scripted principle".to_string()],
            model: "scripted".to_string(),
            confidence: self.precedent_confidence,
        })
    }

    async fn generate_defense(
        &self,
        _case_facts: &str,
        similar_cases: &[Case],
        jurisdiction: &str,
    ) -> Result<DefenseStrategy, LlmError> {
        if self.fail_defense {
            return Err(LlmError::ExtractionFailed("scripted failure".to_string()));
        }
        Ok(DefenseStrategy {
            strategy: format!("Scripted defense for {jurisdiction}"),
            model: "scripted".to_string(),
            similar_cases_used: similar_cases.len(),
            confidence: 0.75,
        })
    }
}

/// A case with the given identity fields and holding, everything else empty
pub(crate) fn sample_case(name: &str, jurisdiction: &str, case_type: &str, holding: &str) -> Case {
    Case {
        case_name: name.to_string(),
        court: "Superior Court".to_string(),
        date: "2022-06-01".to_string(),
        jurisdiction: jurisdiction.to_string(),
        case_type: case_type.to_string(),
        key_facts: Vec::new(),
        legal_issues: Vec::new(),
        holding: holding.to_string(),
        reasoning: String::new(),
        citation: None,
        judges: Vec::new(),
        parties: Vec::new(),
        embedding: None,
    }
}
