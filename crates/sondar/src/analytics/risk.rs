use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Baixo",
            Self::Medium => "Médio",
            Self::High => "Alto",
        }
    }
}

/// Canonical banding applied on every rollup path.
///
/// high when score < `high_below`, medium through `medium_through`
/// inclusive, low above it. The boundary at `medium_through` is medium.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskThresholds {
    pub high_below: f64,
    pub medium_through: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            high_below: 60.0,
            medium_through: 75.0,
        }
    }
}

impl RiskThresholds {
    pub fn classify(&self, score: f64) -> RiskLevel {
        if score < self.high_below {
            RiskLevel::High
        } else if score <= self.medium_through {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}
