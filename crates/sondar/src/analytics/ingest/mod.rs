//! CSV ingest for raw answer exports.
//!
//! Materializes `SubmittedForm` collections (plus profile and department
//! stubs) from the flat per-answer export produced by the survey platform,
//! so the analytics engine can run without the persistence collaborator.

mod parser;

use super::domain::{
    Answer, Department, DepartmentId, FormId, Profile, ProfileId, Question, SubmissionId,
    SubmissionStatus, SubmittedForm,
};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum SurveyImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for SurveyImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurveyImportError::Io(err) => write!(f, "failed to read answer export: {}", err),
            SurveyImportError::Csv(err) => write!(f, "invalid answer export data: {}", err),
        }
    }
}

impl std::error::Error for SurveyImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SurveyImportError::Io(err) => Some(err),
            SurveyImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for SurveyImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for SurveyImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Everything an export materializes: submissions owning their answers,
/// plus profile and department stubs derived from the rows.
#[derive(Debug)]
pub struct ImportedSurvey {
    pub submissions: Vec<SubmittedForm>,
    pub profiles: Vec<Profile>,
    pub departments: Vec<Department>,
}

pub struct SurveyCsvImporter;

impl SurveyCsvImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        form_id: &FormId,
        questions: &[Question],
    ) -> Result<ImportedSurvey, SurveyImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, form_id, questions)
    }

    /// Rows referencing unknown question codes are skipped; duplicate
    /// (submission, question) rows keep the first value seen.
    pub fn from_reader<R: Read>(
        reader: R,
        form_id: &FormId,
        questions: &[Question],
    ) -> Result<ImportedSurvey, SurveyImportError> {
        let codes: HashMap<&str, &Question> = questions
            .iter()
            .map(|question| (question.code.as_str(), question))
            .collect();

        let mut submissions: BTreeMap<String, SubmittedForm> = BTreeMap::new();
        let mut profiles: BTreeMap<String, Profile> = BTreeMap::new();
        let mut departments: BTreeMap<String, Department> = BTreeMap::new();
        let mut seen: HashSet<(String, String)> = HashSet::new();

        for record in parser::parse_records(reader)? {
            let Some(question) = codes.get(record.question_code.as_str()) else {
                continue;
            };

            let submission = submissions
                .entry(record.submission_id.clone())
                .or_insert_with(|| SubmittedForm {
                    id: SubmissionId(record.submission_id.clone()),
                    form_id: form_id.clone(),
                    profile_id: ProfileId(record.profile_id.clone()),
                    status: SubmissionStatus::InProgress,
                    started_at: record
                        .started_at
                        .or(record.completed_at)
                        .unwrap_or_default(),
                    completed_at: None,
                    campaign_id: None,
                    answers: Vec::new(),
                });

            if let Some(completed_at) = record.completed_at {
                submission.status = SubmissionStatus::Completed;
                if submission.completed_at.map_or(true, |at| completed_at < at) {
                    submission.completed_at = Some(completed_at);
                }
            }

            if seen.insert((record.submission_id.clone(), record.question_code.clone())) {
                submission.answers.push(Answer {
                    question_id: question.id.clone(),
                    submission_id: SubmissionId(record.submission_id.clone()),
                    value: record.value.clone(),
                });
            }

            departments
                .entry(record.department.clone())
                .or_insert_with(|| Department {
                    id: DepartmentId(record.department.clone()),
                    name: record.department.clone(),
                    organization_id: "imported".to_string(),
                });

            profiles
                .entry(record.profile_id.clone())
                .or_insert_with(|| Profile {
                    id: ProfileId(record.profile_id.clone()),
                    name: record.profile_id.clone(),
                    role: "colaborador".to_string(),
                    department_id: DepartmentId(record.department.clone()),
                });
        }

        Ok(ImportedSurvey {
            submissions: submissions.into_values().collect(),
            profiles: profiles.into_values().collect(),
            departments: departments.into_values().collect(),
        })
    }
}
