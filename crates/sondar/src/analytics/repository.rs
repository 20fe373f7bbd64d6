use super::domain::{Department, Form, FormId, Profile, Question, SubmittedForm};

/// Persistence seam. The engine never owns state; collaborators hand it
/// already-validated entity collections, fetched fresh per request.
pub trait SurveyRepository: Send + Sync {
    fn form(&self, id: &FormId) -> Result<Option<Form>, RepositoryError>;

    /// Questions in form order; the QS family relies on this ordering for
    /// its positional group ranges.
    fn questions(&self, form: &FormId) -> Result<Vec<Question>, RepositoryError>;

    fn submissions(&self, form: &FormId) -> Result<Vec<SubmittedForm>, RepositoryError>;

    fn profiles(&self) -> Result<Vec<Profile>, RepositoryError>;

    fn departments(&self) -> Result<Vec<Department>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
