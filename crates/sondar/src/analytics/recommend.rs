use super::domain::{
    Department, Profile, ProfileId, Question, QuestionId, SubmissionStatus, SubmittedForm,
};
use super::scoring::{round1, ScaleDriver};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "Alta",
            Self::Medium => "Média",
            Self::Low => "Baixa",
        }
    }

    fn for_average(average: f64) -> Self {
        if average < 40.0 {
            Self::High
        } else if average < 50.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// A reusable intervention template a risky dimension maps onto.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionArchetype {
    pub category: String,
    pub title: String,
    pub kind: String,
    pub description: String,
}

/// Static dimension → archetype mapping, injectable per deployment. Unmapped
/// dimensions land on the default archetype instead of being dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionCatalog {
    archetypes: Vec<SolutionArchetype>,
    mapping: Vec<(String, usize)>,
    default: SolutionArchetype,
}

impl SolutionCatalog {
    pub fn new(
        archetypes: Vec<SolutionArchetype>,
        mapping: Vec<(String, usize)>,
        default: SolutionArchetype,
    ) -> Self {
        Self {
            archetypes,
            mapping,
            default,
        }
    }

    pub fn copsoq() -> Self {
        fn archetype(category: &str, title: &str, kind: &str, description: &str) -> SolutionArchetype {
            SolutionArchetype {
                category: category.to_string(),
                title: title.to_string(),
                kind: kind.to_string(),
                description: description.to_string(),
            }
        }

        let archetypes = vec![
            archetype(
                "Organização do trabalho",
                "Revisão de carga e ritmo",
                "processo",
                "Redistribuir demandas e revisar prazos com as lideranças do setor",
            ),
            archetype(
                "Apoio e liderança",
                "Programa de liderança apoiadora",
                "capacitação",
                "Treinar gestores em feedback, reconhecimento e suporte às equipes",
            ),
            archetype(
                "Bem-estar",
                "Ações de equilíbrio e recuperação",
                "programa",
                "Implantar acordos de desconexão e apoio psicossocial contínuo",
            ),
        ];

        let mapping = vec![
            ("Demandas quantitativas".to_string(), 0),
            ("Ritmo de trabalho".to_string(), 0),
            ("Influência no trabalho".to_string(), 0),
            ("Apoio social de superiores".to_string(), 1),
            ("Apoio social de colegas".to_string(), 1),
            ("Reconhecimento".to_string(), 1),
            ("Demandas emocionais".to_string(), 2),
            ("Equilíbrio trabalho-vida".to_string(), 2),
            ("Insegurança no trabalho".to_string(), 2),
        ];

        let default = archetype(
            "Gestão psicossocial",
            "Diagnóstico dirigido",
            "diagnóstico",
            "Aprofundar o diagnóstico do fator antes de definir a intervenção",
        );

        Self::new(archetypes, mapping, default)
    }

    pub fn archetype_for(&self, dimension: &str) -> &SolutionArchetype {
        self.mapping
            .iter()
            .find(|(name, _)| name == dimension)
            .and_then(|(_, idx)| self.archetypes.get(*idx))
            .unwrap_or(&self.default)
    }
}

/// Inclusive reporting window over submission completion dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from && date <= self.to
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolutionView {
    pub title: String,
    pub kind: String,
    pub description: String,
    pub departments: Vec<String>,
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProblemBlock {
    pub problem: String,
    pub solutions: Vec<SolutionView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationCategory {
    pub category: String,
    pub problems: Vec<ProblemBlock>,
}

/// Detects at-risk dimensions per department, merges cross-department
/// findings with a count-weighted mean, and maps them onto solution
/// archetypes.
pub struct RecommendationEngine<'a> {
    driver: &'a ScaleDriver,
    catalog: &'a SolutionCatalog,
    risky_below: f64,
}

struct Finding {
    departments: Vec<String>,
    total: f64,
    count: usize,
}

impl<'a> RecommendationEngine<'a> {
    pub fn new(driver: &'a ScaleDriver, catalog: &'a SolutionCatalog, risky_below: f64) -> Self {
        Self {
            driver,
            catalog,
            risky_below,
        }
    }

    pub fn generate(
        &self,
        questions: &[Question],
        submissions: &[SubmittedForm],
        profiles: &[Profile],
        departments: &[Department],
        range: Option<&DateRange>,
    ) -> Vec<RecommendationCategory> {
        let question_index: HashMap<&QuestionId, &Question> =
            questions.iter().map(|q| (&q.id, q)).collect();
        let department_names: HashMap<&ProfileId, &str> = profiles
            .iter()
            .filter_map(|profile| {
                departments
                    .iter()
                    .find(|department| department.id == profile.department_id)
                    .map(|department| (&profile.id, department.name.as_str()))
            })
            .collect();

        // department → dimension → (total, count) over per-answer scores.
        let mut accumulator: BTreeMap<(String, String), (f64, usize)> = BTreeMap::new();
        for submission in submissions {
            if submission.status != SubmissionStatus::Completed {
                continue;
            }
            if let Some(range) = range {
                let in_range = submission
                    .completed_at
                    .map(|at| range.contains(at.date()))
                    .unwrap_or(false);
                if !in_range {
                    continue;
                }
            }
            // Submissions without a resolvable department are skipped from
            // this rollup only.
            let Some(department) = department_names.get(&submission.profile_id) else {
                continue;
            };

            let outcome = self
                .driver
                .score_answers(submission.answers.iter(), &question_index);
            for answer in outcome.scored {
                if let Some(score) = answer.score {
                    let entry = accumulator
                        .entry((department.to_string(), answer.dimension))
                        .or_insert((0.0, 0));
                    entry.0 += score;
                    entry.1 += 1;
                }
            }
        }

        // Merge risky findings across departments sharing a dimension,
        // keeping the underlying totals so the merged average stays
        // count-weighted.
        let mut findings: BTreeMap<String, Finding> = BTreeMap::new();
        for ((department, dimension), (total, count)) in accumulator {
            if count == 0 {
                continue;
            }
            let average = total / count as f64;
            if average >= self.risky_below {
                continue;
            }

            let finding = findings.entry(dimension).or_insert(Finding {
                departments: Vec::new(),
                total: 0.0,
                count: 0,
            });
            finding.departments.push(department);
            finding.total += total;
            finding.count += count;
        }

        let mut categories: BTreeMap<String, Vec<(f64, ProblemBlock)>> = BTreeMap::new();
        for (dimension, finding) in findings {
            let average = round1(finding.total / finding.count as f64);
            let archetype = self.catalog.archetype_for(&dimension);
            let block = ProblemBlock {
                problem: format!(
                    "{} com média {:.1} abaixo do limiar de atenção em {} departamento(s)",
                    dimension,
                    average,
                    finding.departments.len()
                ),
                solutions: vec![SolutionView {
                    title: archetype.title.clone(),
                    kind: archetype.kind.clone(),
                    description: archetype.description.clone(),
                    departments: finding.departments,
                    priority: Priority::for_average(average),
                }],
            };
            categories
                .entry(archetype.category.clone())
                .or_default()
                .push((average, block));
        }

        categories
            .into_iter()
            .map(|(category, mut blocks)| {
                blocks.sort_by(|a, b| a.0.total_cmp(&b.0));
                RecommendationCategory {
                    category,
                    problems: blocks.into_iter().map(|(_, block)| block).collect(),
                }
            })
            .collect()
    }
}
