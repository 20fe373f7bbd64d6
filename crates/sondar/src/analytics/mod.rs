//! Answer-to-score normalization and multi-level risk aggregation.
//!
//! The engine is a pure derived-view layer: collaborators supply validated
//! survey entities, every report is computed fresh per request, and nothing
//! is cached or persisted.

pub mod additive;
pub mod aggregate;
pub mod domain;
pub mod ingest;
pub mod recommend;
pub mod report;
pub mod repository;
pub mod risk;
pub mod rollup;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use additive::{AdditiveGroupScorer, Classification, GroupScore, QsGroup, QsScore, ScoreBand};
pub use aggregate::{
    aggregate_dimensions, aggregate_domains, DimensionScore, DomainCatalog, DomainGroup,
    DomainScore,
};
pub use domain::{
    Answer, AnswerOption, Department, DepartmentId, Form, FormId, Profile, ProfileId, Question,
    QuestionId, QuestionKind, QuestionnaireFamily, ScoredAnswer, SubmissionId, SubmissionStatus,
    SubmittedForm,
};
pub use ingest::{ImportedSurvey, SurveyCsvImporter, SurveyImportError};
pub use recommend::{
    DateRange, Priority, ProblemBlock, RecommendationCategory, RecommendationEngine,
    SolutionArchetype, SolutionCatalog, SolutionView,
};
pub use report::{DimensionEntry, DomainRadarEntry, FormAnalyticsResult};
pub use repository::{RepositoryError, SurveyRepository};
pub use risk::{RiskLevel, RiskThresholds};
pub use rollup::{DepartmentReport, DepartmentRollup, SubScale, SubScaleCatalog};
pub use router::analytics_router;
pub use scoring::{
    AnswerNormalizer, DriverRegistry, PortugueseNormalizer, ScaleDriver, ScoreOutcome,
    ScoringStrategy,
};
pub use service::{AnalyticsCatalogs, AnalyticsError, AnalyticsService};
