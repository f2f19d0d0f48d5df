pub mod analysis;
pub mod case;
pub mod config;
pub mod extracted;

pub use analysis::{
    AnalysisResult, CaseAnalysis, DefenseStrategy, Precedent, PrecedentAnalysis, RiskAssessment,
    RiskLevel,
};
pub use case::{Case, CaseId};
pub use config::{Config, JurisdictionRule, LegalRules};
