use std::io::Cursor;
use std::sync::Arc;

use sondar::analytics::{
    AnalyticsService, AnswerOption, Department, DepartmentId, Form, FormId, Profile, ProfileId,
    Question, QuestionId, QuestionKind, QuestionnaireFamily, RepositoryError, RiskLevel,
    SubmittedForm, SurveyCsvImporter, SurveyRepository,
};

fn scale_question(code: &str, dimension: &str, reverse: bool) -> Question {
    Question {
        id: QuestionId(format!("q-{code}")),
        code: code.to_string(),
        text: format!("Pergunta {code}"),
        dimension: dimension.to_string(),
        kind: QuestionKind::ScaleFrequency,
        options: ["nunca", "raramente", "às vezes", "frequentemente", "sempre"]
            .iter()
            .map(|label| AnswerOption::plain(label))
            .collect(),
        reverse,
    }
}

fn questions() -> Vec<Question> {
    vec![
        scale_question("D1", "Demandas quantitativas", false),
        scale_question("R1", "Ritmo de trabalho", false),
        scale_question("A1", "Apoio social de superiores", false),
        scale_question("EQ1", "Equilíbrio trabalho-vida", true),
    ]
}

struct ImportedRepository {
    form: Form,
    questions: Vec<Question>,
    submissions: Vec<SubmittedForm>,
    profiles: Vec<Profile>,
    departments: Vec<Department>,
}

impl ImportedRepository {
    fn from_export(csv: &str) -> Self {
        let form = Form {
            id: FormId("f-1".to_string()),
            title: "Clima psicossocial 2026".to_string(),
            family: QuestionnaireFamily::Copsoq,
        };
        let questions = questions();
        let imported =
            SurveyCsvImporter::from_reader(Cursor::new(csv.to_string()), &form.id, &questions)
                .expect("import succeeds");

        Self {
            form,
            questions,
            submissions: imported.submissions,
            profiles: imported.profiles,
            departments: imported.departments,
        }
    }
}

impl SurveyRepository for ImportedRepository {
    fn form(&self, id: &FormId) -> Result<Option<Form>, RepositoryError> {
        Ok(Some(self.form.clone()).filter(|form| form.id == *id))
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

const EXPORT: &str = "\
Submission ID,Profile ID,Department,Question Code,Value,Started At,Completed At
s-1,ana,Operações,D1,nunca,2026-03-01,2026-03-02T10:00:00Z
s-1,ana,Operações,R1,raramente,2026-03-01,2026-03-02T10:00:00Z
s-1,ana,Operações,A1,sempre,2026-03-01,2026-03-02T10:00:00Z
s-1,ana,Operações,EQ1,nunca,2026-03-01,2026-03-02T10:00:00Z
s-2,rui,Comercial,D1,frequentemente,2026-03-03,2026-03-04T09:30:00Z
s-2,rui,Comercial,R1,sempre,2026-03-03,2026-03-04T09:30:00Z
s-2,rui,Comercial,A1,às vezes,2026-03-03,2026-03-04T09:30:00Z
s-2,rui,Comercial,EQ1,sempre,2026-03-03,2026-03-04T09:30:00Z
s-3,bea,Comercial,D1,sempre,2026-03-05,
";

#[test]
fn imported_export_flows_through_form_analytics() {
    let repository = ImportedRepository::from_export(EXPORT);
    let service = AnalyticsService::new(Arc::new(repository));

    let result = service
        .form_analytics(&FormId("f-1".to_string()))
        .expect("form analytics");

    // ana: 0, 25, 100, 100 (reversed). rui: 75, 100, 50, 0 (reversed).
    // bea never completed, so her answer stays out of every mean.
    assert_eq!(result.overall_score, Some(56.3));
    // Two of three imported profiles completed.
    assert_eq!(result.participation, 66.7);
    assert_eq!(result.unscored_answers, 0);

    let demandas = result
        .dimensions
        .iter()
        .find(|entry| entry.name == "Demandas quantitativas")
        .expect("dimension present");
    assert_eq!(demandas.score, Some(37.5));
    assert_eq!(demandas.risk, Some(RiskLevel::High));
    assert_eq!(demandas.answers_count, 2);
}

#[test]
fn imported_export_flows_through_department_reports() {
    let repository = ImportedRepository::from_export(EXPORT);
    let service = AnalyticsService::new(Arc::new(repository));

    let reports = service
        .department_reports(&FormId("f-1".to_string()), None)
        .expect("department reports");

    assert_eq!(reports.len(), 2);

    let comercial = reports
        .iter()
        .find(|report| report.department == "Comercial")
        .expect("department present");
    assert_eq!(comercial.collaborators, 2);
    assert_eq!(comercial.participation, 50.0);
    // Workload averages rui's quantitative demands (75) and pace (100).
    assert_eq!(comercial.workload, Some(87.5));
    assert_eq!(comercial.balance, Some(0.0));

    let target = DepartmentId("Operações".to_string());
    let narrowed = service
        .department_reports(&FormId("f-1".to_string()), Some(&target))
        .expect("narrowed reports");
    assert_eq!(narrowed.len(), 1);
    assert_eq!(narrowed[0].department, "Operações");
    assert_eq!(narrowed[0].participation, 100.0);
}

#[test]
fn imported_export_flows_through_recommendations() {
    let repository = ImportedRepository::from_export(EXPORT);
    let service = AnalyticsService::new(Arc::new(repository));

    let categories = service
        .recommendations(&FormId("f-1".to_string()), None)
        .expect("recommendations");

    // Operações flags quantitative demands (0) and pace (25); Comercial
    // flags supervisor support (50) and balance (0).
    let organizacao = categories
        .iter()
        .find(|category| category.category == "Organização do trabalho")
        .expect("category present");
    assert_eq!(organizacao.problems.len(), 2);
    // Most severe problem first within the category.
    assert!(organizacao.problems[0]
        .problem
        .contains("Demandas quantitativas"));
    assert!(organizacao.problems[1].problem.contains("Ritmo de trabalho"));
    assert_eq!(
        organizacao.problems[0].solutions[0].departments,
        vec!["Operações".to_string()]
    );

    let bem_estar = categories
        .iter()
        .find(|category| category.category == "Bem-estar")
        .expect("category present");
    assert!(bem_estar.problems[0]
        .problem
        .contains("Equilíbrio trabalho-vida"));
    assert_eq!(
        bem_estar.problems[0].solutions[0].departments,
        vec!["Comercial".to_string()]
    );
}

#[test]
fn importer_profiles_resolve_to_their_departments() {
    let repository = ImportedRepository::from_export(EXPORT);

    assert_eq!(repository.departments.len(), 2);
    let ana = repository
        .profiles
        .iter()
        .find(|profile| profile.id == ProfileId("ana".to_string()))
        .expect("profile present");
    assert_eq!(ana.department_id, DepartmentId("Operações".to_string()));
}
