use std::sync::Arc;

use chrono::NaiveDate;
use sondar::analytics::{
    AnalyticsService, Answer, Department, DepartmentId, DriverRegistry, Form, FormId, Profile,
    ProfileId, Question, QuestionId, QuestionKind, QuestionnaireFamily, RepositoryError,
    SubmissionId, SubmissionStatus, SubmittedForm, SurveyRepository,
};

fn questions() -> Vec<Question> {
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

fn submission(id: &str, values: &[&str]) -> SubmittedForm {
    let questions = questions();
    let answers = questions
        .iter()
        .zip(values)
        .map(|(question, value)| Answer {
            question_id: question.id.clone(),
            submission_id: SubmissionId(id.to_string()),
            value: value.to_string(),
        })
        .collect();

    let day = NaiveDate::from_ymd_opt(2026, 3, 2)
        .expect("valid date")
        .and_hms_opt(9, 0, 0)
        .expect("valid time");

    SubmittedForm {
        id: SubmissionId(id.to_string()),
        form_id: FormId("qs-form".to_string()),
        profile_id: ProfileId("p-1".to_string()),
        status: SubmissionStatus::Completed,
        started_at: day,
        completed_at: Some(day),
        campaign_id: None,
        answers,
    }
}

struct QsRepository {
    submissions: Vec<SubmittedForm>,
}

impl SurveyRepository for QsRepository {
    fn form(&self, id: &FormId) -> Result<Option<Form>, RepositoryError> {
        Ok(Some(Form {
            id: FormId("qs-form".to_string()),
            title: "Questionário de sintomas".to_string(),
            family: QuestionnaireFamily::Qs,
        })
        .filter(|form| form.id == *id))
    }

    fn questions(&self, _form: &FormId) -> Result<Vec<Question>, RepositoryError> {
        Ok(questions())
    }

    fn submissions(&self, _form: &FormId) -> Result<Vec<SubmittedForm>, RepositoryError> {
        Ok(self.submissions.clone())
    }

    fn profiles(&self) -> Result<Vec<Profile>, RepositoryError> {
        Ok(vec![Profile {
            id: ProfileId("p-1".to_string()),
            name: "Colaborador".to_string(),
            role: "colaborador".to_string(),
            department_id: DepartmentId("dep-1".to_string()),
        }])
    }

    fn departments(&self) -> Result<Vec<Department>, RepositoryError> {
        Ok(vec![Department {
            id: DepartmentId("dep-1".to_string()),
            name: "Operações".to_string(),
            organization_id: "org-1".to_string(),
        }])
    }
}

#[test]
fn single_respondent_totals_match_group_sums() {
    let scorer = DriverRegistry::standard();
    let submission = submission("s-1", &["3"; 25]);

    let score = scorer
        .additive()
        .score_submission(&questions(), &submission);

    let sums: Vec<u32> = score.groups.iter().map(|group| group.score).collect();
    assert_eq!(sums, vec![18, 18, 18, 21]);
    assert_eq!(score.total_score, 75);
    assert_eq!(score.classification.level, "médio alto");
}

#[test]
fn cohort_report_keeps_the_total_equal_to_its_groups() {
    let repository = QsRepository {
        submissions: vec![submission("s-1", &["1"; 25]), submission("s-2", &["5"; 25])],
    };
    let service = AnalyticsService::new(Arc::new(repository));

    let report = service
        .qs_report(&FormId("qs-form".to_string()))
        .expect("qs report");

    assert_eq!(
        report.total_score,
        report.groups.iter().map(|group| group.score).sum::<u32>()
    );
    // 1s and 5s average to 3s: 18 per six-question group, 21 for the last.
    assert_eq!(report.total_score, 75);
    assert_eq!(report.groups[3].score, 21);
}

#[test]
fn empty_cohort_scores_zero_in_the_lowest_band() {
    let repository = QsRepository {
        submissions: Vec::new(),
    };
    let service = AnalyticsService::new(Arc::new(repository));

    let report = service
        .qs_report(&FormId("qs-form".to_string()))
        .expect("qs report");

    assert_eq!(report.total_score, 0);
    assert_eq!(report.classification.level, "baixo");
    assert!(report.groups.iter().all(|group| group.score == 0));
}
