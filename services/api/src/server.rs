use crate::cli::ServeArgs;
use crate::infra::{load_catalog, AppState, LoggingObserver, StorageBackend};
use crate::routes::with_learner_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use pathfinder::config::AppConfig;
use pathfinder::error::AppError;
use pathfinder::guidance::progression::LearnerService;
use pathfinder::telemetry;
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

    let catalog = Arc::new(load_catalog(&config.guidance)?);
    let repository = Arc::new(StorageBackend::from_config(&config.guidance)?);
    let observer = Arc::new(LoggingObserver);
    let learner_service = Arc::new(
        LearnerService::new(catalog, repository, observer)
            .with_pass_mark(config.guidance.quiz_pass_mark),
    );

    let app = with_learner_routes(learner_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        pass_mark = config.guidance.quiz_pass_mark,
        "career guidance service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
