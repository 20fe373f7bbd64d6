mod normalizer;

pub use normalizer::{AnswerNormalizer, PortugueseNormalizer};

use super::additive::AdditiveGroupScorer;
use super::domain::{Answer, Question, QuestionId, QuestionnaireFamily, ScoredAnswer};
use std::collections::HashMap;

/// Rounds to one decimal place, the precision every report surfaces.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Normalized option-index scorer for the COPSOQ questionnaire family.
///
/// Pure and deterministic: unmatched input degrades to `None`, never an
/// error.
pub struct ScaleDriver {
    normalizer: Box<dyn AnswerNormalizer>,
}

impl ScaleDriver {
    pub fn new(normalizer: Box<dyn AnswerNormalizer>) -> Self {
        Self { normalizer }
    }

    pub fn portuguese() -> Self {
        Self::new(Box::new(PortugueseNormalizer::default()))
    }

    /// Converts one raw answer into a severity score in [0, 100].
    ///
    /// Returns `None` for non-scorable question kinds, scales with fewer
    /// than two options, and raw values matching no option.
    pub fn score(&self, question: &Question, raw: &str) -> Option<f64> {
        if !question.kind.scorable() {
            return None;
        }

        let options = &question.options;
        if options.len() < 2 {
            return None;
        }

        let normalized = self.normalizer.normalize(raw);
        let canonical = self.normalizer.canonical(&normalized).to_string();

        let matched = match canonical.parse::<usize>() {
            Ok(n) if n >= 1 && n <= options.len() => Some(n - 1),
            _ => options
                .iter()
                .position(|option| self.normalizer.normalize(&option.label) == canonical),
        }?;

        // An explicit per-option value encodes its own direction, so the
        // reverse flag only applies to positional scoring.
        if let Some(value) = options[matched].value {
            return Some(round1(value.clamp(0.0, 100.0)));
        }

        let idx = if question.reverse {
            options.len() - 1 - matched
        } else {
            matched
        };

        Some(round1(idx as f64 / (options.len() - 1) as f64 * 100.0))
    }

    /// Scores a stream of answers against their questions.
    ///
    /// Answers referencing unknown questions are skipped from the rollup;
    /// scorable answers that fail to normalize are kept with a null score
    /// and tallied in the data-quality counter.
    pub fn score_answers<'a, I>(
        &self,
        answers: I,
        questions: &HashMap<&QuestionId, &Question>,
    ) -> ScoreOutcome
    where
        I: IntoIterator<Item = &'a Answer>,
    {
        let mut scored = Vec::new();
        let mut unscored = 0usize;

        for answer in answers {
            let Some(question) = questions.get(&answer.question_id) else {
                continue;
            };

            let score = self.score(question, &answer.value);
            if score.is_none() {
                unscored += 1;
            }

            scored.push(ScoredAnswer {
                question_id: answer.question_id.clone(),
                dimension: question.dimension.clone(),
                score,
            });
        }

        ScoreOutcome { scored, unscored }
    }
}

/// Scored answer stream plus the data-quality counter of answers that
/// could not be normalized.
#[derive(Debug, Default)]
pub struct ScoreOutcome {
    pub scored: Vec<ScoredAnswer>,
    pub unscored: usize,
}

/// One scoring strategy per questionnaire family, assembled once at
/// process start and looked up by the explicit family tag.
pub struct DriverRegistry {
    scale: ScaleDriver,
    additive: AdditiveGroupScorer,
}

pub enum ScoringStrategy<'a> {
    Scale(&'a ScaleDriver),
    Additive(&'a AdditiveGroupScorer),
}

impl DriverRegistry {
    pub fn new(scale: ScaleDriver, additive: AdditiveGroupScorer) -> Self {
        Self { scale, additive }
    }

    /// Stock registry: Portuguese COPSOQ scale driver plus the default QS
    /// banding tables.
    pub fn standard() -> Self {
        Self::new(ScaleDriver::portuguese(), AdditiveGroupScorer::qs_default())
    }

    pub fn resolve(&self, family: QuestionnaireFamily) -> ScoringStrategy<'_> {
        match family {
            QuestionnaireFamily::Copsoq => ScoringStrategy::Scale(&self.scale),
            QuestionnaireFamily::Qs => ScoringStrategy::Additive(&self.additive),
        }
    }

    pub fn scale(&self) -> &ScaleDriver {
        &self.scale
    }

    pub fn additive(&self) -> &AdditiveGroupScorer {
        &self.additive
    }
}
