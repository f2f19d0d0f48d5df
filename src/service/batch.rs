//! Sequential batch processing of analysis tasks
//!
//! Each task is run to completion with its failure captured per item; one
//! bad task never aborts the batch.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::timeout;

use crate::service::analysis::LegalAnalysisService;
use crate::service::defense::DefenseStrategyService;
use crate::service::llm::{LegalModel, LlmError};

/// A single unit of batch work
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnalysisTask {
    CaseAnalysis {
        #[serde(default)]
        id: Option<String>,
        case_facts: String,
        jurisdiction: String,
        case_type: String,
    },
    PrecedentAnalysis {
        #[serde(default)]
        id: Option<String>,
        case_name: String,
        case_text: String,
    },
    DefenseGeneration {
        #[serde(default)]
        id: Option<String>,
        case_facts: String,
        jurisdiction: String,
    },
}

impl AnalysisTask {
    fn id(&self) -> Option<&str> {
        match self {
            AnalysisTask::CaseAnalysis { id, .. }
            | AnalysisTask::PrecedentAnalysis { id, .. }
            | AnalysisTask::DefenseGeneration { id, .. } => id.as_deref(),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            AnalysisTask::CaseAnalysis { .. } => "case_analysis",
            AnalysisTask::PrecedentAnalysis { .. } => "precedent_analysis",
            AnalysisTask::DefenseGeneration { .. } => "defense_generation",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Success,
    Error,
}

/// Per-task outcome. Failed tasks carry a generic failure category; the
/// detailed cause goes to the log only.
#[derive(Debug, Serialize)]
pub struct TaskOutcome {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub status: TaskStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Runs task lists against the analysis and defense services
pub struct BatchProcessor {
    analysis: Arc<LegalAnalysisService>,
    defense: Arc<DefenseStrategyService>,
    model: Arc<dyn LegalModel>,
    llm_timeout: Duration,
}

impl BatchProcessor {
    pub fn new(
        analysis: Arc<LegalAnalysisService>,
        defense: Arc<DefenseStrategyService>,
        model: Arc<dyn LegalModel>,
        llm_timeout: Duration,
    ) -> Self {
        Self {
            analysis,
            defense,
            model,
            llm_timeout,
        }
    }

    /// Process tasks sequentially, capturing each failure in its outcome
    pub async fn process(&self, tasks: Vec<AnalysisTask>) -> Vec<TaskOutcome> {
        let total = tasks.len();
        let mut outcomes = Vec::with_capacity(total);

        for task in tasks {
            let id = task.id().map(str::to_string);
            let kind = task.kind();

            let outcome = match self.run(task).await {
                Ok(result) => TaskOutcome {
                    id,
                    status: TaskStatus::Success,
                    result: Some(result),
                    error: None,
                },
                Err(e) => {
                    tracing::error!(task = kind, task_id = ?id, error = %e, "Batch task failed");
                    TaskOutcome {
                        id,
                        status: TaskStatus::Error,
                        result: None,
                        error: Some(format!("{kind} failed")),
                    }
                }
            };

            outcomes.push(outcome);
        }

        let failed = outcomes
            .iter()
            .filter(|o| o.status == TaskStatus::Error)
            .count();
        tracing::info!(total = total, failed = failed, "Batch processing complete");

        outcomes
    }

    async fn run(&self, task: AnalysisTask) -> Result<serde_json::Value, String> {
        match task {
            AnalysisTask::CaseAnalysis {
                case_facts,
                jurisdiction,
                case_type,
                ..
            } => {
                let result = self
                    .analysis
                    .analyze_case(&case_facts, &jurisdiction, &case_type)
                    .await
                    .map_err(|e| e.to_string())?;
                serde_json::to_value(result).map_err(|e| e.to_string())
            }
            AnalysisTask::PrecedentAnalysis {
                case_name,
                case_text,
                ..
            } => {
                let result = match timeout(
                    self.llm_timeout,
                    self.model.analyze_precedent(&case_name, &case_text),
                )
                .await
                {
                    Ok(result) => result.map_err(|e| e.to_string())?,
                    Err(_) => return Err(LlmError::Timeout(self.llm_timeout).to_string()),
                };
                serde_json::to_value(result).map_err(|e| e.to_string())
            }
            AnalysisTask::DefenseGeneration {
                case_facts,
                jurisdiction,
                ..
            } => {
                let result = self
                    .defense
                    .generate_defense(&case_facts, &jurisdiction)
                    .await
                    .map_err(|e| e.to_string())?;
                serde_json::to_value(result).map_err(|e| e.to_string())
            }
        }
    }
}
