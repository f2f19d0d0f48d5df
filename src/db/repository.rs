//! Repository translating between legal cases and the vector store's
//! generic (id, embedding, document, metadata) record shape

use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use tokio::time::timeout;
use uuid::Uuid;

use super::store::{RecordFilter, ScoredRecord, StoredRecord, VectorStore};
use super::StoreError;
use crate::model::{Case, CaseId};
use crate::service::embedding::{EmbeddingError, EmbeddingProvider};
use crate::service::extraction;

/// Neighbors returned when the caller does not specify a limit
const DEFAULT_QUERY_LIMIT: usize = 10;

/// Error type for repository writes
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Repository for case storage and similarity retrieval
pub struct CaseRepository {
    store: Arc<dyn VectorStore>,
    embedder: Arc<dyn EmbeddingProvider>,
    /// Bound applied to every embedding and store call
    op_timeout: Duration,
}

impl CaseRepository {
    pub fn new(
        store: Arc<dyn VectorStore>,
        embedder: Arc<dyn EmbeddingProvider>,
        op_timeout: Duration,
    ) -> Self {
        Self {
            store,
            embedder,
            op_timeout,
        }
    }

    /// Embed and persist a case.
    ///
    /// Ids are random UUIDs rather than a count-derived sequence, so
    /// concurrent inserts cannot collide.
    pub async fn add(&self, case: &Case) -> Result<CaseId, RepositoryError> {
        let document = case.summary_text();

        let embedding = match self.embed(&document).await {
            Ok(embedding) => embedding,
            Err(e) => {
                tracing::error!(case_name = %case.case_name, error = %e, "Failed to embed case");
                return Err(e.into());
            }
        };

        let id = format!("case_{}", Uuid::new_v4());
        let record = StoredRecord {
            id: id.clone(),
            embedding,
            document,
            metadata: case_metadata(case),
        };

        match timeout(self.op_timeout, self.store.insert(record)).await {
            Ok(Ok(())) => {
                tracing::info!(id = %id, case_name = %case.case_name, "Added case to database");
                Ok(id)
            }
            Ok(Err(e)) => {
                tracing::error!(case_name = %case.case_name, error = %e, "Failed to store case");
                Err(e.into())
            }
            Err(_) => {
                tracing::error!(case_name = %case.case_name, timeout = ?self.op_timeout, "Store insert timed out");
                Err(StoreError::Timeout(self.op_timeout).into())
            }
        }
    }

    /// Retrieve up to `limit` cases similar to the given fact pattern,
    /// optionally restricted to a jurisdiction and case type (ANDed when
    /// both are present).
    ///
    /// Retrieval is advisory: any failure degrades to an empty result with a
    /// warning, and callers cannot distinguish "nothing similar" from
    /// "lookup failed".
    pub async fn query_similar(
        &self,
        facts_text: &str,
        jurisdiction: Option<&str>,
        case_type: Option<&str>,
        limit: Option<usize>,
    ) -> Vec<Case> {
        let limit = limit.unwrap_or(DEFAULT_QUERY_LIMIT);

        let embedding = match self.embed(facts_text).await {
            Ok(embedding) => embedding,
            Err(e) => {
                tracing::warn!(error = %e, "Similar-case lookup skipped: embedding failed");
                return Vec::new();
            }
        };

        let mut filter = RecordFilter::new();
        if let Some(jurisdiction) = jurisdiction {
            filter = filter.equals("jurisdiction", jurisdiction);
        }
        if let Some(case_type) = case_type {
            filter = filter.equals("case_type", case_type);
        }

        let records = match timeout(self.op_timeout, self.store.query(&embedding, limit, &filter))
            .await
        {
            Ok(Ok(records)) => records,
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Similar-case query failed, returning no results");
                return Vec::new();
            }
            Err(_) => {
                tracing::warn!(timeout = ?self.op_timeout, "Similar-case query timed out, returning no results");
                return Vec::new();
            }
        };

        let cases: Vec<Case> = records.into_iter().map(reconstruct_case).collect();
        tracing::info!(found = cases.len(), "Similar-case lookup complete");
        cases
    }

    /// Total number of stored cases
    pub async fn count(&self) -> Result<u64, StoreError> {
        match timeout(self.op_timeout, self.store.count()).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Timeout(self.op_timeout)),
        }
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let embedding = match timeout(self.op_timeout, self.embedder.embed(text)).await {
            Ok(result) => result?,
            Err(_) => return Err(EmbeddingError::Timeout(self.op_timeout)),
        };

        let expected = self.embedder.dimension();
        if embedding.len() != expected {
            return Err(EmbeddingError::DimensionMismatch {
                expected,
                actual: embedding.len(),
            });
        }

        Ok(embedding)
    }
}

/// Metadata stored with each case. Values are scalar strings; judges and
/// parties are JSON-encoded list strings.
fn case_metadata(case: &Case) -> Value {
    json!({
        "case_name": case.case_name,
        "court": case.court,
        "date": case.date,
        "jurisdiction": case.jurisdiction,
        "case_type": case.case_type,
        "citation": case.citation.clone().unwrap_or_default(),
        "judges": serde_json::to_string(&case.judges).unwrap_or_else(|_| "[]".to_string()),
        "parties": serde_json::to_string(&case.parties).unwrap_or_else(|_| "[]".to_string()),
    })
}

/// Rebuild a case from a stored record. Scalar fields come straight from
/// metadata; narrative fields are recovered from the document text with the
/// keyword heuristics, since metadata never stores them structurally.
fn reconstruct_case(record: ScoredRecord) -> Case {
    let meta = &record.metadata;
    let scalar = |key: &str| {
        meta.get(key)
            .and_then(Value::as_str)
            .unwrap_or("Unknown")
            .to_string()
    };

    let citation = meta
        .get("citation")
        .and_then(Value::as_str)
        .filter(|c| !c.is_empty())
        .map(str::to_string);

    Case {
        case_name: scalar("case_name"),
        court: scalar("court"),
        date: scalar("date"),
        jurisdiction: scalar("jurisdiction"),
        case_type: scalar("case_type"),
        key_facts: extraction::extract_facts(&record.document),
        legal_issues: extraction::extract_issues(&record.document),
        holding: extraction::extract_holding(&record.document),
        reasoning: extraction::extract_reasoning(&record.document).join(". "),
        citation,
        judges: decode_list(meta, "judges"),
        parties: decode_list(meta, "parties"),
        embedding: None,
    }
}

/// Decode a JSON-encoded list stored as a metadata string. Any decode
/// failure falls back to an empty list.
fn decode_list(meta: &Value, key: &str) -> Vec<String> {
    let Some(raw) = meta.get(key).and_then(Value::as_str) else {
        return Vec::new();
    };

    match serde_json::from_str(raw) {
        Ok(list) => list,
        Err(e) => {
            tracing::debug!(field = key, error = %e, "Malformed metadata list, defaulting to empty");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_case, FailingEmbedder, InMemoryStore, StaticEmbedder};

    fn repository(store: Arc<InMemoryStore>) -> CaseRepository {
        CaseRepository::new(
            store,
            Arc::new(StaticEmbedder::new(64)),
            Duration::from_secs(5),
        )
    }

    #[tokio::test]
    async fn test_add_then_query_returns_the_case_first() {
        let store = Arc::new(InMemoryStore::new());
        let repo = repository(Arc::clone(&store));

        let mut contract_case = sample_case(
            "Smith v. Jones",
            "california",
            "civil",
            "Judgment granted in favor of plaintiff",
        );
        contract_case.key_facts = vec![
            "Written agreement and witness testimony of non-payment".to_string(),
        ];

        let unrelated = sample_case(
            "People v. Doe",
            "california",
            "civil",
            "Defendant convicted of burglary after fingerprint evidence",
        );

        repo.add(&contract_case).await.unwrap();
        repo.add(&unrelated).await.unwrap();

        let results = repo
            .query_similar(
                &contract_case.key_facts.join(" "),
                Some("california"),
                Some("civil"),
                Some(5),
            )
            .await;

        assert!(!results.is_empty());
        assert_eq!(results[0].case_name, "Smith v. Jones");
    }

    #[tokio::test]
    async fn test_metadata_round_trips_judges_and_parties() {
        let store = Arc::new(InMemoryStore::new());
        let repo = repository(Arc::clone(&store));

        let mut case = sample_case("Roe v. Wade Industries", "federal", "civil", "Claim denied");
        case.citation = Some("410 U.S. 113".to_string());
        case.judges = vec!["Alsup".to_string(), "Koh".to_string()];
        case.parties = vec!["Roe".to_string(), "Wade Industries".to_string()];

        repo.add(&case).await.unwrap();

        let results = repo.query_similar("denied claim", None, None, Some(5)).await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].judges, vec!["Alsup", "Koh"]);
        assert_eq!(results[0].parties, vec!["Roe", "Wade Industries"]);
        assert_eq!(results[0].citation.as_deref(), Some("410 U.S. 113"));
    }

    #[tokio::test]
    async fn test_empty_citation_reconstructs_as_none() {
        let store = Arc::new(InMemoryStore::new());
        let repo = repository(Arc::clone(&store));

        let case = sample_case("Doe v. Roe", "federal", "civil", "Motion denied");
        repo.add(&case).await.unwrap();

        let results = repo.query_similar("motion", None, None, Some(5)).await;
        assert_eq!(results[0].citation, None);
    }

    #[tokio::test]
    async fn test_filters_are_anded() {
        let store = Arc::new(InMemoryStore::new());
        let repo = repository(Arc::clone(&store));

        repo.add(&sample_case("A v. B", "california", "civil", "Granted"))
            .await
            .unwrap();
        repo.add(&sample_case("C v. D", "california", "criminal", "Granted"))
            .await
            .unwrap();
        repo.add(&sample_case("E v. F", "new_york", "civil", "Granted"))
            .await
            .unwrap();

        let results = repo
            .query_similar("granted", Some("california"), Some("civil"), None)
            .await;

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].case_name, "A v. B");
    }

    #[tokio::test]
    async fn test_query_failure_degrades_to_empty() {
        let store = Arc::new(InMemoryStore::new());
        store.fail_queries(true);
        let repo = repository(Arc::clone(&store));

        let results = repo.query_similar("anything", None, None, Some(5)).await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_embedding_failure_degrades_to_empty_on_reads() {
        let store = Arc::new(InMemoryStore::new());
        let repo = CaseRepository::new(
            store,
            Arc::new(FailingEmbedder),
            Duration::from_secs(5),
        );

        let results = repo.query_similar("anything", None, None, Some(5)).await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_embedding_failure_surfaces_on_writes() {
        let store = Arc::new(InMemoryStore::new());
        let repo = CaseRepository::new(
            store,
            Arc::new(FailingEmbedder),
            Duration::from_secs(5),
        );

        let case = sample_case("X v. Y", "federal", "civil", "Granted");
        let err = repo.add(&case).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Embedding(_)));
    }

    #[tokio::test]
    async fn test_malformed_metadata_lists_decode_to_empty() {
        let decoded = decode_list(&json!({ "judges": "not json" }), "judges");
        assert!(decoded.is_empty());

        let missing = decode_list(&json!({}), "judges");
        assert!(missing.is_empty());
    }

    #[tokio::test]
    async fn test_missing_metadata_defaults_to_unknown() {
        let record = ScoredRecord {
            id: "case_x".to_string(),
            document: "Case: mystery".to_string(),
            metadata: json!({}),
            distance: 0.1,
        };

        let case = reconstruct_case(record);
        assert_eq!(case.case_name, "Unknown");
        assert_eq!(case.jurisdiction, "Unknown");
        assert_eq!(case.holding, "Holding not found");
    }

    #[tokio::test]
    async fn test_count_tracks_inserts() {
        let store = Arc::new(InMemoryStore::new());
        let repo = repository(Arc::clone(&store));

        assert_eq!(repo.count().await.unwrap(), 0);
        repo.add(&sample_case("A v. B", "federal", "civil", "Granted"))
            .await
            .unwrap();
        assert_eq!(repo.count().await.unwrap(), 1);
    }
}
