use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

const ENV_RULES_PATH: &str = "PRECEDENT_INTEL_RULES_PATH";
const DEFAULT_RULES_PATH: &str = "config/legal_rules.yaml";

const ENV_LLM_TIMEOUT_SECS: &str = "PRECEDENT_INTEL_LLM_TIMEOUT_SECS";
const DEFAULT_LLM_TIMEOUT_SECS: u64 = 60;

const ENV_STORE_TIMEOUT_SECS: &str = "PRECEDENT_INTEL_STORE_TIMEOUT_SECS";
const DEFAULT_STORE_TIMEOUT_SECS: u64 = 10;

/// Display metadata for one jurisdiction
#[derive(Debug, Clone, Deserialize)]
pub struct JurisdictionRule {
    /// Human-readable name (e.g., "California Courts")
    pub name: String,
}

/// Legal rules tables: jurisdictions and case-type categories.
///
/// Used for validation and display only, never for retrieval logic. Lookups
/// for keys absent from the tables return nothing; callers log a warning and
/// proceed (unrecognized keys are ignored, not rejected).
#[derive(Debug, Clone, Deserialize)]
pub struct LegalRules {
    #[serde(default)]
    pub jurisdictions: BTreeMap<String, JurisdictionRule>,
    /// Case type -> subtype categories (e.g., civil -> contract, tort)
    #[serde(default)]
    pub case_types: BTreeMap<String, Vec<String>>,
}

impl Default for LegalRules {
    fn default() -> Self {
        let jurisdictions = [
            ("federal", "Federal Courts"),
            ("california", "California Courts"),
            ("new_york", "New York Courts"),
        ]
        .into_iter()
        .map(|(key, name)| (key.to_string(), JurisdictionRule { name: name.to_string() }))
        .collect();

        let case_types = [
            ("criminal", vec!["felony", "misdemeanor", "infraction"]),
            ("civil", vec!["contract", "tort", "property", "family", "employment"]),
        ]
        .into_iter()
        .map(|(key, categories)| {
            (
                key.to_string(),
                categories.into_iter().map(str::to_string).collect(),
            )
        })
        .collect();

        Self {
            jurisdictions,
            case_types,
        }
    }
}

impl LegalRules {
    /// Display name for a jurisdiction key, if the key is known
    pub fn jurisdiction_name(&self, key: &str) -> Option<&str> {
        self.jurisdictions.get(key).map(|rule| rule.name.as_str())
    }

    /// A case type is known when it is a top-level type or one of its
    /// subtype categories
    pub fn is_known_case_type(&self, key: &str) -> bool {
        self.case_types.contains_key(key)
            || self
                .case_types
                .values()
                .any(|categories| categories.iter().any(|c| c == key))
    }
}

/// YAML rules file structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RulesFile {
    #[serde(default)]
    pub jurisdictions: BTreeMap<String, JurisdictionRule>,
    #[serde(default)]
    pub case_types: BTreeMap<String, Vec<String>>,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub rules: LegalRules,
    /// Bound on every LLM call
    pub llm_timeout: Duration,
    /// Bound on every embedding and vector-store call
    pub store_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rules: LegalRules::default(),
            llm_timeout: Duration::from_secs(DEFAULT_LLM_TIMEOUT_SECS),
            store_timeout: Duration::from_secs(DEFAULT_STORE_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Load configuration from environment and the rules file
    pub fn from_env() -> Self {
        let llm_timeout = timeout_from_env(ENV_LLM_TIMEOUT_SECS, DEFAULT_LLM_TIMEOUT_SECS);
        let store_timeout = timeout_from_env(ENV_STORE_TIMEOUT_SECS, DEFAULT_STORE_TIMEOUT_SECS);

        let rules_path =
            std::env::var(ENV_RULES_PATH).unwrap_or_else(|_| DEFAULT_RULES_PATH.to_string());

        let rules = Self::load_rules_file(&rules_path).unwrap_or_default();

        Self {
            rules,
            llm_timeout,
            store_timeout,
        }
    }

    /// Load legal rules from a YAML file, falling back to the compiled-in
    /// defaults on any problem
    fn load_rules_file(path: &str) -> Option<LegalRules> {
        let path = Path::new(path);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "Rules file not found, using defaults");
            return None;
        }

        match fs::read_to_string(path) {
            Ok(contents) => {
                let contents = contents.trim();
                if contents.is_empty() {
                    tracing::debug!(path = %path.display(), "Rules file is empty, using defaults");
                    return None;
                }

                match serde_yaml::from_str::<RulesFile>(contents) {
                    Ok(file) => {
                        tracing::info!(path = %path.display(), "Loaded legal rules from file");
                        Some(LegalRules {
                            jurisdictions: file.jurisdictions,
                            case_types: file.case_types,
                        })
                    }
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "Failed to parse rules file, using defaults");
                        None
                    }
                }
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read rules file, using defaults");
                None
            }
        }
    }
}

fn timeout_from_env(var: &str, default_secs: u64) -> Duration {
    let secs = std::env::var(var)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default_secs);
    Duration::from_secs(secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules_known_keys() {
        let rules = LegalRules::default();
        assert_eq!(rules.jurisdiction_name("california"), Some("California Courts"));
        assert!(rules.is_known_case_type("civil"));
        assert!(rules.is_known_case_type("contract"));
    }

    #[test]
    fn test_unrecognized_keys_are_ignored_not_rejected() {
        let rules = LegalRules::default();
        assert_eq!(rules.jurisdiction_name("atlantis"), None);
        assert!(!rules.is_known_case_type("maritime_salvage"));
    }

    #[test]
    fn test_rules_file_parses_yaml() {
        let yaml = r#"
jurisdictions:
  texas:
    name: Texas Courts
case_types:
  civil:
    - contract
"#;
        let file: RulesFile = serde_yaml::from_str(yaml).unwrap();
        let rules = LegalRules {
            jurisdictions: file.jurisdictions,
            case_types: file.case_types,
        };
        assert_eq!(rules.jurisdiction_name("texas"), Some("Texas Courts"));
        assert!(rules.is_known_case_type("contract"));
        assert!(!rules.is_known_case_type("criminal"));
    }

    #[test]
    fn test_rules_file_rejects_unknown_top_level_keys() {
        let yaml = "venues:\n  texas: {}\n";
        assert!(serde_yaml::from_str::<RulesFile>(yaml).is_err());
    }
}
