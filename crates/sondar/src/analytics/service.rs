use std::collections::HashMap;
use std::sync::Arc;

use super::additive::QsScore;
use super::aggregate::{aggregate_dimensions, aggregate_domains, DomainCatalog};
use super::domain::{
    DepartmentId, Form, FormId, Question, QuestionId, QuestionnaireFamily, SubmissionStatus,
    SubmittedForm,
};
use super::recommend::{DateRange, RecommendationCategory, RecommendationEngine, SolutionCatalog};
use super::report::{DimensionEntry, DomainRadarEntry, FormAnalyticsResult};
use super::repository::{RepositoryError, SurveyRepository};
use super::risk::RiskThresholds;
use super::rollup::{DepartmentReport, DepartmentRollup, SubScaleCatalog};
use super::scoring::{round1, DriverRegistry, ScaleDriver, ScoringStrategy};

/// Injectable static configuration: domain membership, sub-scale lookup,
/// solution archetypes, and the canonical risk thresholds.
pub struct AnalyticsCatalogs {
    pub domains: DomainCatalog,
    pub subscales: SubScaleCatalog,
    pub solutions: SolutionCatalog,
    pub thresholds: RiskThresholds,
    /// Display target every dimension is compared against.
    pub dimension_target: f64,
}

impl Default for AnalyticsCatalogs {
    fn default() -> Self {
        Self {
            domains: DomainCatalog::copsoq(),
            subscales: SubScaleCatalog::copsoq(),
            solutions: SolutionCatalog::copsoq(),
            thresholds: RiskThresholds::default(),
            dimension_target: 75.0,
        }
    }
}

/// Stateless derived-view engine over the persistence collaborator.
///
/// Every operation fetches fresh collections, computes call-local derived
/// structures, and discards them with the response.
pub struct AnalyticsService<R> {
    repository: Arc<R>,
    registry: DriverRegistry,
    catalogs: AnalyticsCatalogs,
}

impl<R> AnalyticsService<R>
where
    R: SurveyRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_catalogs(repository, DriverRegistry::standard(), AnalyticsCatalogs::default())
    }

    pub fn with_catalogs(
        repository: Arc<R>,
        registry: DriverRegistry,
        catalogs: AnalyticsCatalogs,
    ) -> Self {
        Self {
            repository,
            registry,
            catalogs,
        }
    }

    /// Form-wide summary: overall severity, participation, and one entry
    /// per dimension.
    pub fn form_analytics(&self, form_id: &FormId) -> Result<FormAnalyticsResult, AnalyticsError> {
        let (form, questions, submissions) = self.load(form_id)?;
        let driver = self.scale_driver(&form)?;

        let completed: Vec<&SubmittedForm> = submissions
            .iter()
            .filter(|submission| submission.status == SubmissionStatus::Completed)
            .collect();

        let question_index = index_questions(&questions);
        let outcome = driver.score_answers(
            completed
                .iter()
                .flat_map(|submission| submission.answers.iter()),
            &question_index,
        );

        let scores: Vec<f64> = outcome
            .scored
            .iter()
            .filter_map(|answer| answer.score)
            .collect();
        let overall_score = if scores.is_empty() {
            None
        } else {
            Some(round1(scores.iter().sum::<f64>() / scores.len() as f64))
        };

        let profiles = self.repository.profiles()?;
        let participation = if profiles.is_empty() {
            0.0
        } else {
            round1(completed.len() as f64 / profiles.len() as f64 * 100.0)
        };

        let target = self.catalogs.dimension_target;
        let dimensions: Vec<DimensionEntry> = aggregate_dimensions(&outcome.scored)
            .into_values()
            .map(|entry| DimensionEntry {
                name: entry.dimension,
                score: entry.mean.map(round1),
                target,
                risk: entry.mean.map(|mean| self.catalogs.thresholds.classify(mean)),
                answers_count: entry.samples,
            })
            .collect();

        let high_risk_count = dimensions
            .iter()
            .filter(|entry| entry.risk == Some(super::risk::RiskLevel::High))
            .count();
        let target_met_count = dimensions
            .iter()
            .filter(|entry| entry.score.map_or(false, |score| score >= target))
            .count();

        Ok(FormAnalyticsResult {
            overall_score,
            participation,
            high_risk_count,
            target_met_count,
            unscored_answers: outcome.unscored,
            dimensions,
        })
    }

    /// Per-department cohort reports; a target department narrows the
    /// output to a single cohort.
    pub fn department_reports(
        &self,
        form_id: &FormId,
        department: Option<&DepartmentId>,
    ) -> Result<Vec<DepartmentReport>, AnalyticsError> {
        let (form, questions, submissions) = self.load(form_id)?;
        let driver = self.scale_driver(&form)?;
        let profiles = self.repository.profiles()?;
        let departments = self.repository.departments()?;

        let rollup = DepartmentRollup::new(
            driver,
            &self.catalogs.subscales,
            &self.catalogs.thresholds,
        );
        Ok(rollup.compute(&questions, &submissions, &profiles, &departments, department))
    }

    /// Domain radar: most at-risk domains first, truncated to `top_k`.
    pub fn domain_radar(
        &self,
        form_id: &FormId,
        top_k: Option<usize>,
    ) -> Result<Vec<DomainRadarEntry>, AnalyticsError> {
        let (form, questions, submissions) = self.load(form_id)?;
        let driver = self.scale_driver(&form)?;

        let question_index = index_questions(&questions);
        let outcome = driver.score_answers(
            submissions
                .iter()
                .filter(|submission| submission.status == SubmissionStatus::Completed)
                .flat_map(|submission| submission.answers.iter()),
            &question_index,
        );

        let dimensions = aggregate_dimensions(&outcome.scored);
        let mut entries: Vec<DomainRadarEntry> = aggregate_domains(
            &dimensions,
            &self.catalogs.domains,
            &self.catalogs.thresholds,
        )
        .into_iter()
        .map(|domain| DomainRadarEntry {
            domain: domain.domain,
            score: round1(domain.score),
            market_avg: domain.market_avg,
            risk: domain.risk,
        })
        .collect();

        if let Some(top_k) = top_k {
            entries.truncate(top_k);
        }
        Ok(entries)
    }

    /// Prioritized recommendations synthesized from risky findings.
    pub fn recommendations(
        &self,
        form_id: &FormId,
        range: Option<&DateRange>,
    ) -> Result<Vec<RecommendationCategory>, AnalyticsError> {
        let (form, questions, submissions) = self.load(form_id)?;
        let driver = self.scale_driver(&form)?;
        let profiles = self.repository.profiles()?;
        let departments = self.repository.departments()?;

        let engine = RecommendationEngine::new(
            driver,
            &self.catalogs.solutions,
            self.catalogs.thresholds.high_below,
        );
        Ok(engine.generate(&questions, &submissions, &profiles, &departments, range))
    }

    /// QS report: additive group sums over the completed cohort.
    pub fn qs_report(&self, form_id: &FormId) -> Result<QsScore, AnalyticsError> {
        let (form, questions, submissions) = self.load(form_id)?;
        let scorer = match self.registry.resolve(form.family) {
            ScoringStrategy::Additive(scorer) => scorer,
            ScoringStrategy::Scale(_) => {
                return Err(AnalyticsError::UnsupportedFamily {
                    form: form.id,
                    family: form.family,
                })
            }
        };

        let cohort: Vec<&SubmittedForm> = submissions
            .iter()
            .filter(|submission| submission.status == SubmissionStatus::Completed)
            .collect();
        Ok(scorer.score_cohort(&questions, &cohort))
    }

    fn load(
        &self,
        form_id: &FormId,
    ) -> Result<(Form, Vec<Question>, Vec<SubmittedForm>), AnalyticsError> {
        let form = self
            .repository
            .form(form_id)?
            .ok_or_else(|| AnalyticsError::FormNotFound(form_id.clone()))?;
        let questions = self.repository.questions(form_id)?;
        let submissions = self.repository.submissions(form_id)?;
        Ok((form, questions, submissions))
    }

    fn scale_driver(&self, form: &Form) -> Result<&ScaleDriver, AnalyticsError> {
        match self.registry.resolve(form.family) {
            ScoringStrategy::Scale(driver) => Ok(driver),
            ScoringStrategy::Additive(_) => Err(AnalyticsError::UnsupportedFamily {
                form: form.id.clone(),
                family: form.family,
            }),
        }
    }
}

fn index_questions(questions: &[Question]) -> HashMap<&QuestionId, &Question> {
    questions.iter().map(|question| (&question.id, question)).collect()
}

/// Error raised by the analytics service.
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    #[error("form {0} not found")]
    FormNotFound(FormId),
    #[error("form {form} is a {} questionnaire and is not served by this report", .family.label())]
    UnsupportedFamily {
        form: FormId,
        family: QuestionnaireFamily,
    },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
