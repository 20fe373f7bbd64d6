use crate::infra::InMemorySurveyRepository;
use chrono::NaiveDate;
use clap::Args;
use sondar::analytics::{AnalyticsService, DateRange, DepartmentId, FormId, SurveyCsvImporter};
use sondar::error::AppError;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Narrow the department section to one department id (e.g. dep-ops).
    #[arg(long)]
    pub(crate) department: Option<String>,
    /// Limit the domain radar to the N most at-risk domains.
    #[arg(long)]
    pub(crate) top_domains: Option<usize>,
    /// Skip the symptom questionnaire portion of the demo output.
    #[arg(long)]
    pub(crate) skip_qs: bool,
}

#[derive(Args, Debug)]
pub(crate) struct SurveyReportArgs {
    /// Answer export (CSV) to score against the stock questionnaire.
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Narrow the department section to one department id.
    #[arg(long)]
    pub(crate) department: Option<String>,
    /// Start of the recommendation window (YYYY-MM-DD)
    #[arg(long, value_parser = crate::infra::parse_date, requires = "to")]
    pub(crate) from: Option<NaiveDate>,
    /// End of the recommendation window (YYYY-MM-DD)
    #[arg(long, value_parser = crate::infra::parse_date, requires = "from")]
    pub(crate) to: Option<NaiveDate>,
}

pub(crate) fn run_survey_report(args: SurveyReportArgs) -> Result<(), AppError> {
    let SurveyReportArgs {
        csv,
        department,
        from,
        to,
    } = args;
    let range = from.zip(to).map(|(from, to)| DateRange { from, to });

    let form = seed::copsoq_form();
    let questions = seed::copsoq_questions();
    let imported = SurveyCsvImporter::from_path(csv, &form.id, &questions)?;

    let repository = Arc::new(InMemorySurveyRepository::default());
    repository.register_form(form.clone(), questions);
    repository.absorb(&form.id, imported);

    let service = AnalyticsService::new(repository);
    render_scale_reports(&service, &form.id, department.as_deref(), None, range.as_ref())?;
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        department,
        top_domains,
        skip_qs,
    } = args;

    println!("Sondar analytics demo (synthetic cohort)");

    let repository = seed::seeded_repository();
    let service = AnalyticsService::new(repository);

    let copsoq = seed::copsoq_form();
    render_scale_reports(&service, &copsoq.id, department.as_deref(), top_domains, None)?;

    if skip_qs {
        return Ok(());
    }

    let qs = seed::qs_form();
    let report = service.qs_report(&qs.id)?;
    println!("\nSymptom questionnaire ({})", qs.title);
    for group in &report.groups {
        println!(
            "- {}: {} pontos ({}: {})",
            group.name, group.score, group.classification.level, group.classification.description
        );
    }
    println!(
        "Total: {} pontos ({}: {})",
        report.total_score, report.classification.level, report.classification.description
    );

    Ok(())
}

fn render_scale_reports(
    service: &AnalyticsService<InMemorySurveyRepository>,
    form_id: &FormId,
    department: Option<&str>,
    top_domains: Option<usize>,
    range: Option<&DateRange>,
) -> Result<(), AppError> {
    let result = service.form_analytics(form_id)?;

    println!("\nForm overview ({form_id})");
    println!(
        "- Overall score: {} | participation {:.1}%",
        fmt_score(result.overall_score),
        result.participation
    );
    println!(
        "- {} high-risk dimension(s), {} at target, {} answer(s) not scorable",
        result.high_risk_count, result.target_met_count, result.unscored_answers
    );
    for entry in &result.dimensions {
        println!(
            "  - {}: {} (target {:.0}, {} answers){}",
            entry.name,
            fmt_score(entry.score),
            entry.target,
            entry.answers_count,
            entry
                .risk
                .map(|risk| format!(" -> risco {}", risk.label()))
                .unwrap_or_default()
        );
    }

    let target = department.map(|id| DepartmentId(id.to_string()));
    let reports = service.department_reports(form_id, target.as_ref())?;
    println!("\nDepartments");
    for report in &reports {
        println!(
            "- {} ({} colaboradores, {:.1}% participação)",
            report.department, report.collaborators, report.participation
        );
        println!(
            "  carga {} | autonomia {} | apoio {} | reconhecimento {} | equilíbrio {}",
            fmt_score(report.workload),
            fmt_score(report.autonomy),
            fmt_score(report.support),
            fmt_score(report.recognition),
            fmt_score(report.balance)
        );
        match (report.average_score, report.risk) {
            (Some(average), Some(risk)) => {
                println!("  média {:.1} -> risco {}", average, risk.label())
            }
            _ => println!("  sem dados suficientes"),
        }
    }

    let radar = service.domain_radar(form_id, top_domains)?;
    println!("\nDomain radar (most at-risk first)");
    for entry in &radar {
        println!(
            "- {}: {:.1} (mercado {:.1}) -> risco {}",
            entry.domain,
            entry.score,
            entry.market_avg,
            entry.risk.label()
        );
    }

    let categories = service.recommendations(form_id, range)?;
    if categories.is_empty() {
        println!("\nRecommendations: nothing below the attention threshold");
    } else {
        println!("\nRecommendations");
        for category in &categories {
            println!("- {}", category.category);
            for problem in &category.problems {
                println!("  Problema: {}", problem.problem);
                for solution in &problem.solutions {
                    println!(
                        "  Solução [{}]: {} ({}) — prioridade {} — {}",
                        solution.kind,
                        solution.title,
                        solution.departments.join(", "),
                        solution.priority.label(),
                        solution.description
                    );
                }
            }
        }
    }

    Ok(())
}

fn fmt_score(score: Option<f64>) -> String {
    match score {
        Some(value) => format!("{value:.1}"),
        None => "sem dados".to_string(),
    }
}

pub(crate) mod seed {
    use super::*;
    use chrono::NaiveDate;
    use sondar::analytics::{
        Answer, AnswerOption, Department, Form, ImportedSurvey, Profile, ProfileId, Question,
        QuestionId, QuestionKind, QuestionnaireFamily, SubmissionId, SubmissionStatus,
        SubmittedForm,
    };

    pub(crate) fn copsoq_form() -> Form {
        Form {
            id: FormId("copsoq-2026".to_string()),
            title: "Clima psicossocial 2026".to_string(),
            family: QuestionnaireFamily::Copsoq,
        }
    }

    pub(crate) fn qs_form() -> Form {
        Form {
            id: FormId("qs-2026".to_string()),
            title: "Questionário de sintomas 2026".to_string(),
            family: QuestionnaireFamily::Qs,
        }
    }

    fn frequency_options() -> Vec<AnswerOption> {
        ["nunca", "raramente", "às vezes", "frequentemente", "sempre"]
            .iter()
            .map(|label| AnswerOption::plain(label))
            .collect()
    }

    pub(crate) fn copsoq_questions() -> Vec<Question> {
        fn question(code: &str, text: &str, dimension: &str, reverse: bool) -> Question {
            Question {
                id: QuestionId(format!("q-{code}")),
                code: code.to_string(),
                text: text.to_string(),
                dimension: dimension.to_string(),
                kind: QuestionKind::ScaleFrequency,
                options: frequency_options(),
                reverse,
            }
        }

        vec![
            question(
                "COP1",
                "Consegue concluir todas as suas tarefas no horário de trabalho?",
                "Demandas quantitativas",
                false,
            ),
            question(
                "COP2",
                "Tem tempo suficiente para fazer o trabalho com qualidade?",
                "Demandas quantitativas",
                false,
            ),
            question(
                "COP3",
                "Consegue trabalhar em um ritmo confortável?",
                "Ritmo de trabalho",
                false,
            ),
            question(
                "COP4",
                "Sente-se emocionalmente tranquilo durante o trabalho?",
                "Demandas emocionais",
                false,
            ),
            question(
                "COP5",
                "Tem influência sobre como o seu trabalho é feito?",
                "Influência no trabalho",
                false,
            ),
            question(
                "COP6",
                "Tem oportunidade de aprender coisas novas no trabalho?",
                "Possibilidades de desenvolvimento",
                false,
            ),
            question(
                "COP7",
                "Recebe ajuda do seu superior quando precisa?",
                "Apoio social de superiores",
                false,
            ),
            question(
                "COP8",
                "Recebe ajuda dos colegas quando precisa?",
                "Apoio social de colegas",
                false,
            ),
            question(
                "COP9",
                "Seu trabalho é reconhecido pela gestão?",
                "Reconhecimento",
                false,
            ),
            question(
                "COP10",
                "Leva trabalho ou preocupações do trabalho para casa?",
                "Equilíbrio trabalho-vida",
                true,
            ),
            question(
                "COP11",
                "Preocupa-se em perder o emprego?",
                "Insegurança no trabalho",
                true,
            ),
        ]
    }

    pub(crate) fn qs_questions() -> Vec<Question> {
        (1..=25)
            .map(|n| Question {
                id: QuestionId(format!("q-QS{n}")),
                code: format!("QS{n}"),
                text: format!("Sintoma {n}"),
                dimension: String::new(),
                kind: QuestionKind::Number,
                options: Vec::new(),
                reverse: false,
            })
            .collect()
    }

    pub(crate) fn departments() -> Vec<Department> {
        fn department(id: &str, name: &str) -> Department {
            Department {
                id: DepartmentId(id.to_string()),
                name: name.to_string(),
                organization_id: "org-sondar".to_string(),
            }
        }

        vec![
            department("dep-ops", "Operações"),
            department("dep-com", "Comercial"),
            department("dep-tec", "Tecnologia"),
        ]
    }

    pub(crate) fn profiles() -> Vec<Profile> {
        fn profile(id: &str, name: &str, department: &str) -> Profile {
            Profile {
                id: ProfileId(id.to_string()),
                name: name.to_string(),
                role: "colaborador".to_string(),
                department_id: DepartmentId(department.to_string()),
            }
        }

        vec![
            profile("ana", "Ana", "dep-ops"),
            profile("bruno", "Bruno", "dep-ops"),
            profile("carla", "Carla", "dep-com"),
            profile("diego", "Diego", "dep-com"),
            profile("elisa", "Elisa", "dep-tec"),
            profile("fabio", "Fábio", "dep-tec"),
        ]
    }

    fn completed_at(day: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, day)
            .expect("valid date")
            .and_hms_opt(10, 0, 0)
            .expect("valid time")
    }

    fn submission(
        form: &FormId,
        id: &str,
        profile: &str,
        questions: &[Question],
        values: &[&str],
        day: Option<u32>,
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
            form_id: form.clone(),
            profile_id: ProfileId(profile.to_string()),
            status: if day.is_some() {
                SubmissionStatus::Completed
            } else {
                SubmissionStatus::InProgress
            },
            started_at: completed_at(1),
            completed_at: day.map(completed_at),
            campaign_id: Some("campanha-2026-1".to_string()),
            answers,
        }
    }

    fn copsoq_submissions(questions: &[Question]) -> Vec<SubmittedForm> {
        let form = copsoq_form().id;
        vec![
            // Operações under pressure: low demands scores, decent support.
            submission(
                &form,
                "s-1",
                "ana",
                questions,
                &[
                    "nunca",
                    "raramente",
                    "nunca",
                    "raramente",
                    "às vezes",
                    "frequentemente",
                    "frequentemente",
                    "sempre",
                    "às vezes",
                    "sempre",
                    "raramente",
                ],
                Some(2),
            ),
            submission(
                &form,
                "s-2",
                "bruno",
                questions,
                &[
                    "raramente",
                    "nunca",
                    "raramente",
                    "nunca",
                    "raramente",
                    "às vezes",
                    "sempre",
                    "frequentemente",
                    "raramente",
                    "frequentemente",
                    "às vezes",
                ],
                Some(3),
            ),
            // Comercial in better shape overall.
            submission(
                &form,
                "s-3",
                "carla",
                questions,
                &[
                    "frequentemente",
                    "frequentemente",
                    "sempre",
                    "frequentemente",
                    "sempre",
                    "sempre",
                    "às vezes",
                    "frequentemente",
                    "frequentemente",
                    "raramente",
                    "nunca",
                ],
                Some(4),
            ),
            submission(
                &form,
                "s-4",
                "diego",
                questions,
                &[
                    "sempre",
                    "frequentemente",
                    "frequentemente",
                    "sempre",
                    "frequentemente",
                    "frequentemente",
                    "raramente",
                    "às vezes",
                    "sempre",
                    "nunca",
                    "raramente",
                ],
                Some(5),
            ),
            submission(
                &form,
                "s-5",
                "elisa",
                questions,
                &[
                    "às vezes",
                    "às vezes",
                    "frequentemente",
                    "às vezes",
                    "raramente",
                    "raramente",
                    "nunca",
                    "raramente",
                    "nunca",
                    "às vezes",
                    "frequentemente",
                ],
                Some(6),
            ),
            // Fábio never finished; his answers stay out of every report.
            submission(
                &form,
                "s-6",
                "fabio",
                questions,
                &["sempre", "sempre", "sempre"],
                None,
            ),
        ]
    }

    fn qs_submissions(questions: &[Question]) -> Vec<SubmittedForm> {
        let form = qs_form().id;
        vec![
            submission(&form, "qs-s-1", "ana", questions, &["4"; 25], Some(2)),
            submission(&form, "qs-s-2", "bruno", questions, &["2"; 25], Some(3)),
            submission(&form, "qs-s-3", "carla", questions, &["3"; 25], Some(4)),
        ]
    }

    pub(crate) fn seeded_repository() -> Arc<InMemorySurveyRepository> {
        let repository = Arc::new(InMemorySurveyRepository::default());

        let copsoq = copsoq_form();
        let copsoq_q = copsoq_questions();
        let submissions = copsoq_submissions(&copsoq_q);
        repository.register_form(copsoq.clone(), copsoq_q);
        repository.absorb(
            &copsoq.id,
            ImportedSurvey {
                submissions,
                profiles: profiles(),
                departments: departments(),
            },
        );

        let qs = qs_form();
        let qs_q = qs_questions();
        let submissions = qs_submissions(&qs_q);
        repository.register_form(qs.clone(), qs_q);
        repository.absorb(
            &qs.id,
            ImportedSurvey {
                submissions,
                profiles: Vec::new(),
                departments: Vec::new(),
            },
        );

        repository
    }
}
