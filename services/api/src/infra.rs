use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use sondar::analytics::{
    Department, Form, FormId, ImportedSurvey, Profile, Question, RepositoryError, SubmittedForm,
    SurveyRepository,
};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// In-memory survey store backing the HTTP service. Forms and questions
/// are registered up front; submissions arrive through the import
/// endpoint or a demo seed.
#[derive(Default)]
pub(crate) struct InMemorySurveyRepository {
    forms: Mutex<HashMap<FormId, Form>>,
    questions: Mutex<HashMap<FormId, Vec<Question>>>,
    submissions: Mutex<HashMap<FormId, Vec<SubmittedForm>>>,
    profiles: Mutex<Vec<Profile>>,
    departments: Mutex<Vec<Department>>,
}

impl InMemorySurveyRepository {
    pub(crate) fn register_form(&self, form: Form, questions: Vec<Question>) {
        let mut forms = self.forms.lock().expect("form mutex poisoned");
        let mut catalog = self.questions.lock().expect("question mutex poisoned");
        catalog.insert(form.id.clone(), questions);
        forms.insert(form.id.clone(), form);
    }

    pub(crate) fn question_set(&self, form: &FormId) -> Option<Vec<Question>> {
        let catalog = self.questions.lock().expect("question mutex poisoned");
        catalog.get(form).cloned()
    }

    /// Merges an imported export into the store. Profiles and departments
    /// are deduplicated by id; submissions accumulate.
    pub(crate) fn absorb(&self, form: &FormId, imported: ImportedSurvey) {
        {
            let mut submissions = self.submissions.lock().expect("submission mutex poisoned");
            submissions
                .entry(form.clone())
                .or_default()
                .extend(imported.submissions);
        }

        let mut profiles = self.profiles.lock().expect("profile mutex poisoned");
        for profile in imported.profiles {
            if !profiles.iter().any(|existing| existing.id == profile.id) {
                profiles.push(profile);
            }
        }

        let mut departments = self.departments.lock().expect("department mutex poisoned");
        for department in imported.departments {
            if !departments
                .iter()
                .any(|existing| existing.id == department.id)
            {
                departments.push(department);
            }
        }
    }
}

impl SurveyRepository for InMemorySurveyRepository {
    fn form(&self, id: &FormId) -> Result<Option<Form>, RepositoryError> {
        let forms = self.forms.lock().expect("form mutex poisoned");
        Ok(forms.get(id).cloned())
    }

    fn questions(&self, form: &FormId) -> Result<Vec<Question>, RepositoryError> {
        let catalog = self.questions.lock().expect("question mutex poisoned");
        Ok(catalog.get(form).cloned().unwrap_or_default())
    }

    fn submissions(&self, form: &FormId) -> Result<Vec<SubmittedForm>, RepositoryError> {
        let submissions = self.submissions.lock().expect("submission mutex poisoned");
        Ok(submissions.get(form).cloned().unwrap_or_default())
    }

    fn profiles(&self) -> Result<Vec<Profile>, RepositoryError> {
        Ok(self.profiles.lock().expect("profile mutex poisoned").clone())
    }

    fn departments(&self) -> Result<Vec<Department>, RepositoryError> {
        Ok(self
            .departments
            .lock()
            .expect("department mutex poisoned")
            .clone())
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
