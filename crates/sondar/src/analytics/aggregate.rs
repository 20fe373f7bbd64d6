use super::domain::ScoredAnswer;
use super::risk::{RiskLevel, RiskThresholds};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-dimension aggregate. `mean` is `None` when the dimension had no
/// scorable answers; it is never silently coerced to zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionScore {
    pub dimension: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
    pub samples: usize,
}

/// Groups scored answers by dimension tag and averages the non-null
/// scores. Dimensions whose every answer was unscorable surface as
/// insufficient data (`samples == 0`).
pub fn aggregate_dimensions(scored: &[ScoredAnswer]) -> BTreeMap<String, DimensionScore> {
    let mut sums: BTreeMap<String, (f64, usize)> = BTreeMap::new();

    for answer in scored {
        let entry = sums.entry(answer.dimension.clone()).or_insert((0.0, 0));
        if let Some(score) = answer.score {
            entry.0 += score;
            entry.1 += 1;
        }
    }

    sums.into_iter()
        .map(|(dimension, (total, samples))| {
            let mean = if samples > 0 {
                Some(total / samples as f64)
            } else {
                None
            };
            (
                dimension.clone(),
                DimensionScore {
                    dimension,
                    mean,
                    samples,
                },
            )
        })
        .collect()
}

/// One summary domain and its member dimensions. `market_avg` is a fixed
/// reference value shown next to the computed score, never derived from
/// the data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainGroup {
    pub name: String,
    pub dimensions: Vec<String>,
    pub market_avg: f64,
}

/// Static domain → dimension membership, injectable per deployment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainCatalog {
    groups: Vec<DomainGroup>,
}

impl DomainCatalog {
    pub fn new(groups: Vec<DomainGroup>) -> Self {
        Self { groups }
    }

    /// COPSOQ-modeled default grouping.
    pub fn copsoq() -> Self {
        fn group(name: &str, dimensions: &[&str], market_avg: f64) -> DomainGroup {
            DomainGroup {
                name: name.to_string(),
                dimensions: dimensions.iter().map(|d| d.to_string()).collect(),
                market_avg,
            }
        }

        Self::new(vec![
            group(
                "Demandas no trabalho",
                &[
                    "Demandas quantitativas",
                    "Ritmo de trabalho",
                    "Demandas emocionais",
                ],
                65.0,
            ),
            group(
                "Organização e conteúdo",
                &[
                    "Influência no trabalho",
                    "Possibilidades de desenvolvimento",
                ],
                70.0,
            ),
            group(
                "Relações sociais e liderança",
                &[
                    "Apoio social de superiores",
                    "Apoio social de colegas",
                    "Reconhecimento",
                ],
                72.0,
            ),
            group(
                "Interface trabalho-indivíduo",
                &["Equilíbrio trabalho-vida", "Insegurança no trabalho"],
                68.0,
            ),
        ])
    }

    pub fn groups(&self) -> &[DomainGroup] {
        &self.groups
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainScore {
    pub domain: String,
    pub dimensions: Vec<String>,
    pub score: f64,
    pub market_avg: f64,
    pub risk: RiskLevel,
}

/// Averages member dimension means into domain scores, ascending by score
/// so the most at-risk domain comes first. Domains with no scorable member
/// dimension are omitted entirely.
pub fn aggregate_domains(
    dimensions: &BTreeMap<String, DimensionScore>,
    catalog: &DomainCatalog,
    thresholds: &RiskThresholds,
) -> Vec<DomainScore> {
    let mut scores: Vec<DomainScore> = catalog
        .groups()
        .iter()
        .filter_map(|group| {
            let members: Vec<f64> = group
                .dimensions
                .iter()
                .filter_map(|name| dimensions.get(name).and_then(|entry| entry.mean))
                .collect();

            if members.is_empty() {
                return None;
            }

            let score = members.iter().sum::<f64>() / members.len() as f64;
            Some(DomainScore {
                domain: group.name.clone(),
                dimensions: group.dimensions.clone(),
                score,
                market_avg: group.market_avg,
                risk: thresholds.classify(score),
            })
        })
        .collect();

    scores.sort_by(|a, b| a.score.total_cmp(&b.score));
    scores
}
