use super::risk::RiskLevel;
use serde::Serialize;

/// One dimension row in the form analytics report. `score`/`risk` are
/// absent when the dimension had no scorable answers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionEntry {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    pub target: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk: Option<RiskLevel>,
    pub answers_count: usize,
}

/// Form-wide analytics summary returned at the API boundary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormAnalyticsResult {
    /// Mean of every non-null per-answer score; absent when nothing was
    /// scorable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_score: Option<f64>,
    pub participation: f64,
    pub high_risk_count: usize,
    pub target_met_count: usize,
    /// Data-quality counter: answers that degraded to a null score.
    pub unscored_answers: usize,
    pub dimensions: Vec<DimensionEntry>,
}

/// Radar chart entry: computed domain score next to its fixed market
/// reference, ascending by score (most at-risk first).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainRadarEntry {
    pub domain: String,
    pub score: f64,
    pub market_avg: f64,
    pub risk: RiskLevel,
}
