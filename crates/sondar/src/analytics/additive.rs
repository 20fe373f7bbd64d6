use super::domain::{Question, QuestionId, SubmittedForm};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ops::Range;

/// One classification band: inclusive on both ends, first match wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBand {
    pub min: u32,
    pub max: u32,
    pub level: String,
    pub description: String,
}

impl ScoreBand {
    fn new(min: u32, max: u32, level: &str, description: &str) -> Self {
        Self {
            min,
            max,
            level: level.to_string(),
            description: description.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub level: String,
    pub description: String,
}

/// A positional question range feeding one QS group sum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QsGroup {
    pub name: String,
    pub questions: Range<usize>,
    pub bands: Vec<ScoreBand>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupScore {
    pub name: String,
    pub score: u32,
    pub classification: Classification,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QsScore {
    pub groups: Vec<GroupScore>,
    pub total_score: u32,
    pub classification: Classification,
}

/// Additive scorer for the QS questionnaire family.
///
/// Unlike the scale driver this works on raw ordinal integers and groups
/// by fixed positional question index ranges, not by dimension tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdditiveGroupScorer {
    groups: Vec<QsGroup>,
    total_bands: Vec<ScoreBand>,
}

impl AdditiveGroupScorer {
    pub fn new(groups: Vec<QsGroup>, total_bands: Vec<ScoreBand>) -> Self {
        Self {
            groups,
            total_bands,
        }
    }

    /// Stock QS tables: 25 questions answered 1..5, grouped 6+6+6+7,
    /// total range 0..=125.
    pub fn qs_default() -> Self {
        fn group_bands(max: u32) -> Vec<ScoreBand> {
            // Same proportions as the total bands, scaled to the group max.
            let cut = |pct: f64| (max as f64 * pct).round() as u32;
            vec![
                ScoreBand::new(0, cut(0.39), "baixo", "Sem sinais relevantes neste grupo"),
                ScoreBand::new(
                    cut(0.39) + 1,
                    cut(0.59),
                    "médio baixo",
                    "Sinais leves, acompanhar na próxima rodada",
                ),
                ScoreBand::new(
                    cut(0.59) + 1,
                    cut(0.79),
                    "médio alto",
                    "Sinais moderados, recomenda-se atenção",
                ),
                ScoreBand::new(
                    cut(0.79) + 1,
                    max,
                    "alto",
                    "Sinais intensos, intervenção recomendada",
                ),
            ]
        }

        let groups = vec![
            QsGroup {
                name: "Exigências emocionais".to_string(),
                questions: 0..6,
                bands: group_bands(30),
            },
            QsGroup {
                name: "Sono e recuperação".to_string(),
                questions: 6..12,
                bands: group_bands(30),
            },
            QsGroup {
                name: "Sintomas físicos".to_string(),
                questions: 12..18,
                bands: group_bands(30),
            },
            QsGroup {
                name: "Capacidade para o trabalho".to_string(),
                questions: 18..25,
                bands: group_bands(35),
            },
        ];

        let total_bands = vec![
            ScoreBand::new(0, 49, "baixo", "Quadro geral dentro do esperado"),
            ScoreBand::new(
                50,
                74,
                "médio baixo",
                "Quadro geral com sinais leves de desgaste",
            ),
            ScoreBand::new(
                75,
                99,
                "médio alto",
                "Quadro geral com desgaste moderado",
            ),
            ScoreBand::new(100, 125, "alto", "Quadro geral com desgaste acentuado"),
        ];

        Self::new(groups, total_bands)
    }

    pub fn groups(&self) -> &[QsGroup] {
        &self.groups
    }

    /// Scores one submission: each answer parsed as an integer (invalid
    /// parses count as 0), summed per positional group.
    pub fn score_submission(&self, questions: &[Question], submission: &SubmittedForm) -> QsScore {
        let values: HashMap<&QuestionId, u32> = submission
            .answers
            .iter()
            .map(|answer| {
                let parsed = answer.value.trim().parse::<u32>().unwrap_or(0);
                (&answer.question_id, parsed)
            })
            .collect();

        let sums: Vec<u32> = self
            .groups
            .iter()
            .map(|group| {
                let end = group.questions.end.min(questions.len());
                let start = group.questions.start.min(end);
                questions[start..end]
                    .iter()
                    .map(|question| values.get(&question.id).copied().unwrap_or(0))
                    .sum()
            })
            .collect();

        self.build_score(sums)
    }

    /// Form-level score: per-group sums averaged over the cohort and
    /// rounded, so the total always equals the sum of the group scores.
    pub fn score_cohort(&self, questions: &[Question], cohort: &[&SubmittedForm]) -> QsScore {
        if cohort.is_empty() {
            return self.build_score(vec![0; self.groups.len()]);
        }

        let mut totals = vec![0u64; self.groups.len()];
        for submission in cohort {
            let score = self.score_submission(questions, submission);
            for (slot, group) in totals.iter_mut().zip(score.groups) {
                *slot += u64::from(group.score);
            }
        }

        let sums: Vec<u32> = totals
            .into_iter()
            .map(|total| (total as f64 / cohort.len() as f64).round() as u32)
            .collect();

        self.build_score(sums)
    }

    fn build_score(&self, sums: Vec<u32>) -> QsScore {
        let groups: Vec<GroupScore> = self
            .groups
            .iter()
            .zip(&sums)
            .map(|(group, sum)| GroupScore {
                name: group.name.clone(),
                score: *sum,
                classification: classify(&group.bands, *sum),
            })
            .collect();

        let total_score = sums.iter().sum();
        QsScore {
            groups,
            total_score,
            classification: classify(&self.total_bands, total_score),
        }
    }
}

/// First matching band wins; when nothing matches, fall back to the
/// lowest band with a generic description rather than failing.
fn classify(bands: &[ScoreBand], sum: u32) -> Classification {
    if let Some(band) = bands.iter().find(|band| sum >= band.min && sum <= band.max) {
        return Classification {
            level: band.level.clone(),
            description: band.description.clone(),
        };
    }

    let lowest = bands.iter().min_by_key(|band| band.min);
    Classification {
        level: lowest.map(|band| band.level.clone()).unwrap_or_default(),
        description: "Pontuação fora das faixas configuradas".to_string(),
    }
}
