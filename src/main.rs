use std::io::Write;

use serde::Deserialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use precedent_intel::app::AppState;
use precedent_intel::model::{Case, Config};
use precedent_intel::service::AnalysisTask;

const USAGE: &str = "usage: precedent-intel <seed FILE | analyze | batch | stats>

  seed FILE   load a JSON array of cases into the store
  analyze     read one analysis request (JSON) from stdin, print the result
  batch       read a JSON array of tasks from stdin, print per-task outcomes
  stats       print store statistics";

fn default_unknown() -> String {
    "Unknown".to_string()
}

#[derive(Debug, Deserialize)]
struct AnalyzeRequest {
    case_facts: String,
    #[serde(default = "default_unknown")]
    jurisdiction: String,
    #[serde(default = "default_unknown")]
    case_type: String,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present (ignore if missing)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().collect();
    let Some(command) = args.get(1) else {
        eprintln!("{USAGE}");
        std::process::exit(2);
    };

    let config = Config::from_env();
    let state = match AppState::new(config).await {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize services");
            std::process::exit(1);
        }
    };

    match command.as_str() {
        "seed" => {
            let Some(path) = args.get(2) else {
                eprintln!("{USAGE}");
                std::process::exit(2);
            };
            seed(&state, path).await
        }
        "analyze" => analyze(&state).await,
        "batch" => batch(&state).await,
        "stats" => stats(&state).await,
        other => {
            eprintln!("unknown command: {other}\n{USAGE}");
            std::process::exit(2);
        }
    }
}

/// Load a JSON array of cases into the store, continuing past individual
/// failures
async fn seed(state: &AppState, path: &str) -> std::io::Result<()> {
    let contents = std::fs::read_to_string(path)?;
    let cases: Vec<Case> = serde_json::from_str(&contents).map_err(std::io::Error::other)?;

    let total = cases.len();
    let mut added = 0usize;
    for case in &cases {
        match state.repository.add(case).await {
            Ok(id) => {
                tracing::info!(id = %id, case_name = %case.case_name, "Seeded case");
                added += 1;
            }
            Err(e) => {
                tracing::error!(case_name = %case.case_name, error = %e, "Failed to seed case");
            }
        }
    }

    tracing::info!(added = added, total = total, "Seeding complete");
    Ok(())
}

/// Run one analysis request from stdin and print the result as JSON
async fn analyze(state: &AppState) -> std::io::Result<()> {
    let input = std::io::read_to_string(std::io::stdin())?;
    let request: AnalyzeRequest = serde_json::from_str(&input).map_err(std::io::Error::other)?;

    // Detailed cause goes to the log; the user-facing message stays generic
    let result = match state
        .analysis_service
        .analyze_case(&request.case_facts, &request.jurisdiction, &request.case_type)
        .await
    {
        Ok(result) => result,
        Err(e) => {
            tracing::error!(error = %e, "Case analysis failed");
            eprintln!("case analysis failed");
            std::process::exit(1);
        }
    };

    let json = serde_json::to_string_pretty(&result).map_err(std::io::Error::other)?;
    writeln!(std::io::stdout(), "{json}")
}

/// Run a JSON array of tasks from stdin and print per-task outcomes
async fn batch(state: &AppState) -> std::io::Result<()> {
    let input = std::io::read_to_string(std::io::stdin())?;
    let tasks: Vec<AnalysisTask> = serde_json::from_str(&input).map_err(std::io::Error::other)?;

    let outcomes = state.batch_processor.process(tasks).await;

    let json = serde_json::to_string_pretty(&outcomes).map_err(std::io::Error::other)?;
    writeln!(std::io::stdout(), "{json}")
}

/// Print store statistics as JSON
async fn stats(state: &AppState) -> std::io::Result<()> {
    let total_cases = match state.repository.count().await {
        Ok(total) => total,
        Err(e) => {
            tracing::error!(error = %e, "Failed to read store statistics");
            eprintln!("store statistics unavailable");
            std::process::exit(1);
        }
    };

    let json = serde_json::json!({ "total_cases": total_cases });
    writeln!(std::io::stdout(), "{json}")
}
