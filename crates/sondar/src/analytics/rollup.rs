use super::aggregate::{aggregate_dimensions, DimensionScore};
use super::domain::{
    Department, DepartmentId, Profile, ProfileId, Question, QuestionId, SubmissionStatus,
    SubmittedForm,
};
use super::risk::{RiskLevel, RiskThresholds};
use super::scoring::{round1, ScaleDriver};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// The five canonical departmental sub-scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubScale {
    Workload,
    Autonomy,
    Support,
    Recognition,
    Balance,
}

impl SubScale {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Workload,
            Self::Autonomy,
            Self::Support,
            Self::Recognition,
            Self::Balance,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Workload => "Carga de trabalho",
            Self::Autonomy => "Autonomia",
            Self::Support => "Apoio",
            Self::Recognition => "Reconhecimento",
            Self::Balance => "Equilíbrio",
        }
    }
}

/// Fixed dimension-name lookup backing the five sub-scores, injectable so
/// deployments with custom dimension labels can remap without code changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubScaleCatalog {
    entries: Vec<(SubScale, Vec<String>)>,
}

impl SubScaleCatalog {
    pub fn new(entries: Vec<(SubScale, Vec<String>)>) -> Self {
        Self { entries }
    }

    pub fn copsoq() -> Self {
        fn names(values: &[&str]) -> Vec<String> {
            values.iter().map(|v| v.to_string()).collect()
        }

        Self::new(vec![
            (
                SubScale::Workload,
                names(&[
                    "Demandas quantitativas",
                    "Ritmo de trabalho",
                    "Demandas emocionais",
                ]),
            ),
            (
                SubScale::Autonomy,
                names(&[
                    "Influência no trabalho",
                    "Possibilidades de desenvolvimento",
                ]),
            ),
            (
                SubScale::Support,
                names(&["Apoio social de superiores", "Apoio social de colegas"]),
            ),
            (SubScale::Recognition, names(&["Reconhecimento"])),
            (SubScale::Balance, names(&["Equilíbrio trabalho-vida"])),
        ])
    }

    pub fn dimensions_for(&self, scale: SubScale) -> &[String] {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == scale)
            .map(|(_, dimensions)| dimensions.as_slice())
            .unwrap_or(&[])
    }
}

/// Per-department cohort report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentReport {
    pub department: String,
    pub collaborators: usize,
    pub participation: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workload: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autonomy: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub support: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recognition: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk: Option<RiskLevel>,
}

/// Re-runs scorer and dimension aggregation scoped to one department
/// cohort at a time.
pub struct DepartmentRollup<'a> {
    driver: &'a ScaleDriver,
    subscales: &'a SubScaleCatalog,
    thresholds: &'a RiskThresholds,
}

impl<'a> DepartmentRollup<'a> {
    pub fn new(
        driver: &'a ScaleDriver,
        subscales: &'a SubScaleCatalog,
        thresholds: &'a RiskThresholds,
    ) -> Self {
        Self {
            driver,
            subscales,
            thresholds,
        }
    }

    /// Builds one report per department, or a single report when a target
    /// department is supplied. Only completed submissions whose profile
    /// resolves to the department count toward the cohort.
    pub fn compute(
        &self,
        questions: &[Question],
        submissions: &[SubmittedForm],
        profiles: &[Profile],
        departments: &[Department],
        target: Option<&DepartmentId>,
    ) -> Vec<DepartmentReport> {
        let question_index: HashMap<&QuestionId, &Question> =
            questions.iter().map(|q| (&q.id, q)).collect();

        departments
            .iter()
            .filter(|department| target.map_or(true, |id| *id == department.id))
            .map(|department| {
                let cohort: Vec<&Profile> = profiles
                    .iter()
                    .filter(|profile| profile.department_id == department.id)
                    .collect();
                let members: HashSet<&ProfileId> =
                    cohort.iter().map(|profile| &profile.id).collect();

                let cohort_submissions: Vec<&SubmittedForm> = submissions
                    .iter()
                    .filter(|submission| {
                        submission.status == SubmissionStatus::Completed
                            && members.contains(&submission.profile_id)
                    })
                    .collect();

                let participation = if cohort.is_empty() {
                    0.0
                } else {
                    round1(cohort_submissions.len() as f64 / cohort.len() as f64 * 100.0)
                };

                let outcome = self.driver.score_answers(
                    cohort_submissions
                        .iter()
                        .flat_map(|submission| submission.answers.iter()),
                    &question_index,
                );
                let dimensions = aggregate_dimensions(&outcome.scored);

                let [workload, autonomy, support, recognition, balance] = SubScale::ordered()
                    .map(|scale| self.sub_score(scale, &dimensions));

                let available: Vec<f64> = [workload, autonomy, support, recognition, balance]
                    .into_iter()
                    .flatten()
                    .collect();
                let average_score = if available.is_empty() {
                    None
                } else {
                    Some(round1(available.iter().sum::<f64>() / available.len() as f64))
                };
                let risk = average_score.map(|score| self.thresholds.classify(score));

                DepartmentReport {
                    department: department.name.clone(),
                    collaborators: cohort.len(),
                    participation,
                    workload,
                    autonomy,
                    support,
                    recognition,
                    balance,
                    average_score,
                    risk,
                }
            })
            .collect()
    }

    fn sub_score(
        &self,
        scale: SubScale,
        dimensions: &BTreeMap<String, DimensionScore>,
    ) -> Option<f64> {
        let means: Vec<f64> = self
            .subscales
            .dimensions_for(scale)
            .iter()
            .filter_map(|name| dimensions.get(name).and_then(|entry| entry.mean))
            .collect();

        if means.is_empty() {
            None
        } else {
            Some(round1(means.iter().sum::<f64>() / means.len() as f64))
        }
    }
}
