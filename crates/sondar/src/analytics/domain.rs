use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FormId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuestionId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubmissionId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProfileId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DepartmentId(pub String);

impl fmt::Display for FormId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Questionnaire families carry structurally different scoring strategies.
/// Resolved once when the form is loaded, never by string sniffing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionnaireFamily {
    /// Normalized option-index scoring with dimension/domain aggregation.
    Copsoq,
    /// Additive raw ordinal sums over fixed positional question ranges.
    Qs,
}

impl QuestionnaireFamily {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Copsoq => "COPSOQ",
            Self::Qs => "QS",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    ScaleFrequency,
    ScaleIntensity,
    MultipleChoice,
    Qualitative,
    Text,
    Number,
}

impl QuestionKind {
    /// Only option-backed kinds participate in normalized scoring.
    pub const fn scorable(self) -> bool {
        matches!(
            self,
            Self::ScaleFrequency | Self::ScaleIntensity | Self::MultipleChoice
        )
    }
}

/// One selectable option. An explicit `value` overrides positional scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

impl AnswerOption {
    pub fn plain(label: &str) -> Self {
        Self {
            label: label.to_string(),
            value: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub code: String,
    pub text: String,
    pub dimension: String,
    pub kind: QuestionKind,
    pub options: Vec<AnswerOption>,
    #[serde(default)]
    pub reverse: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: QuestionId,
    pub submission_id: SubmissionId,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Pending,
    InProgress,
    Completed,
}

impl SubmissionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmittedForm {
    pub id: SubmissionId,
    pub form_id: FormId,
    pub profile_id: ProfileId,
    pub status: SubmissionStatus,
    pub started_at: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign_id: Option<String>,
    pub answers: Vec<Answer>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    pub name: String,
    pub role: String,
    pub department_id: DepartmentId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
    pub organization_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Form {
    pub id: FormId,
    pub title: String,
    pub family: QuestionnaireFamily,
}

/// Per-answer scoring result. Never persisted; rebuilt on every request.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredAnswer {
    pub question_id: QuestionId,
    pub dimension: String,
    pub score: Option<f64>,
}
