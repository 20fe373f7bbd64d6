use std::sync::Arc;

use axum::response::Response;
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::analytics::domain::{
    Answer, AnswerOption, Department, DepartmentId, Form, FormId, Profile, ProfileId, Question,
    QuestionId, QuestionKind, QuestionnaireFamily, SubmissionId, SubmissionStatus, SubmittedForm,
};
use crate::analytics::repository::{RepositoryError, SurveyRepository};
use crate::analytics::service::AnalyticsService;

pub(super) fn frequency_options() -> Vec<AnswerOption> {
    ["nunca", "raramente", "às vezes", "frequentemente", "sempre"]
        .iter()
        .map(|label| AnswerOption::plain(label))
        .collect()
}

pub(super) fn scale_question(code: &str, dimension: &str, reverse: bool) -> Question {
    Question {
        id: QuestionId(format!("q-{code}")),
        code: code.to_string(),
        text: format!("Pergunta {code}"),
        dimension: dimension.to_string(),
        kind: QuestionKind::ScaleFrequency,
        options: frequency_options(),
        reverse,
    }
}

/// Eight-question COPSOQ fixture spanning five dimensions and one reversed
/// item.
pub(super) fn copsoq_questions() -> Vec<Question> {
    vec![
        scale_question("D1", "Demandas quantitativas", false),
        scale_question("D2", "Demandas quantitativas", false),
        scale_question("R1", "Ritmo de trabalho", false),
        scale_question("A1", "Apoio social de superiores", false),
        scale_question("A2", "Apoio social de colegas", false),
        scale_question("REC1", "Reconhecimento", false),
        scale_question("EQ1", "Equilíbrio trabalho-vida", true),
        scale_question("INF1", "Influência no trabalho", false),
    ]
}

/// Twenty-five raw-ordinal questions in form order for the QS family.
pub(super) fn qs_questions() -> Vec<Question> {
    (1..=25)
        .map(|n| Question {
            id: QuestionId(format!("qs-{n}")),
            code: format!("QS{n}"),
            text: format!("Sintoma {n}"),
            dimension: String::new(),
            kind: QuestionKind::Number,
            options: Vec::new(),
            reverse: false,
        })
        .collect()
}

pub(super) fn completed_on(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(12, 0, 0).expect("valid time")
}

pub(super) fn submitted(
    id: &str,
    profile: &str,
    questions: &[Question],
    values: &[&str],
    completed_at: Option<NaiveDateTime>,
) -> SubmittedForm {
    let answers = questions
        .iter()
        .zip(values)
        .map(|(question, value)| Answer {
            question_id: question.id.clone(),
            submission_id: SubmissionId(id.to_string()),
            value: value.to_string(),
        })
        .collect();

    SubmittedForm {
        id: SubmissionId(id.to_string()),
        form_id: FormId("f-1".to_string()),
        profile_id: ProfileId(profile.to_string()),
        status: if completed_at.is_some() {
            SubmissionStatus::Completed
        } else {
            SubmissionStatus::InProgress
        },
        started_at: completed_on(NaiveDate::from_ymd_opt(2026, 3, 1).expect("valid")),
        completed_at,
        campaign_id: None,
        answers,
    }
}

pub(super) fn profile(id: &str, department: &str) -> Profile {
    Profile {
        id: ProfileId(id.to_string()),
        name: format!("Colaborador {id}"),
        role: "colaborador".to_string(),
        department_id: DepartmentId(department.to_string()),
    }
}

pub(super) fn department(id: &str, name: &str) -> Department {
    Department {
        id: DepartmentId(id.to_string()),
        name: name.to_string(),
        organization_id: "org-1".to_string(),
    }
}

#[derive(Default)]
pub(super) struct MemoryRepository {
    pub(super) form: Option<Form>,
    pub(super) questions: Vec<Question>,
    pub(super) submissions: Vec<SubmittedForm>,
    pub(super) profiles: Vec<Profile>,
    pub(super) departments: Vec<Department>,
}

impl MemoryRepository {
    pub(super) fn copsoq(submissions: Vec<SubmittedForm>) -> Self {
        Self {
            form: Some(Form {
                id: FormId("f-1".to_string()),
                title: "Clima psicossocial 2026".to_string(),
                family: QuestionnaireFamily::Copsoq,
            }),
            questions: copsoq_questions(),
            submissions,
            profiles: vec![profile("p-1", "dep-1"), profile("p-2", "dep-2")],
            departments: vec![department("dep-1", "Operações"), department("dep-2", "Comercial")],
        }
    }

    pub(super) fn qs(submissions: Vec<SubmittedForm>) -> Self {
        Self {
            form: Some(Form {
                id: FormId("f-1".to_string()),
                title: "Questionário de sintomas".to_string(),
                family: QuestionnaireFamily::Qs,
            }),
            questions: qs_questions(),
            submissions,
            profiles: vec![profile("p-1", "dep-1")],
            departments: vec![department("dep-1", "Operações")],
        }
    }
}

impl SurveyRepository for MemoryRepository {
    fn form(&self, id: &FormId) -> Result<Option<Form>, RepositoryError> {
        Ok(self.form.clone().filter(|form| form.id == *id))
    }

    fn questions(&self, _form: &FormId) -> Result<Vec<Question>, RepositoryError> {
        Ok(self.questions.clone())
    }

    fn submissions(&self, _form: &FormId) -> Result<Vec<SubmittedForm>, RepositoryError> {
        Ok(self.submissions.clone())
    }

    fn profiles(&self) -> Result<Vec<Profile>, RepositoryError> {
        Ok(self.profiles.clone())
    }

    fn departments(&self) -> Result<Vec<Department>, RepositoryError> {
        Ok(self.departments.clone())
    }
}

pub(super) struct UnavailableRepository;

impl SurveyRepository for UnavailableRepository {
    fn form(&self, _id: &FormId) -> Result<Option<Form>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn questions(&self, _form: &FormId) -> Result<Vec<Question>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn submissions(&self, _form: &FormId) -> Result<Vec<SubmittedForm>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn profiles(&self) -> Result<Vec<Profile>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn departments(&self) -> Result<Vec<Department>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn service(repository: MemoryRepository) -> AnalyticsService<MemoryRepository> {
    AnalyticsService::new(Arc::new(repository))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
