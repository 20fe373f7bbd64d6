use crate::cli::ServeArgs;
use crate::demo::seed;
use crate::infra::{AppState, InMemorySurveyRepository};
use crate::routes::{import_router, with_analytics_routes};
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use sondar::analytics::AnalyticsService;
use sondar::config::AppConfig;
use sondar::error::AppError;
use sondar::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = if args.seed_demo {
        seed::seeded_repository()
    } else {
        let repository = Arc::new(InMemorySurveyRepository::default());
        // Stock questionnaires are always registered so exports can be
        // imported without a provisioning step.
        repository.register_form(seed::copsoq_form(), seed::copsoq_questions());
        repository.register_form(seed::qs_form(), seed::qs_questions());
        repository
    };
    let analytics_service = Arc::new(AnalyticsService::new(repository.clone()));

    let app = with_analytics_routes(analytics_service)
        .merge(import_router(repository))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "sondar analytics service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
