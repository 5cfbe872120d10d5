use crate::cli::ServeArgs;
use crate::infra::{engine_settings, AppState, InMemoryAlertPublisher, InMemoryDriftHistoryRepository};
use crate::routes::with_scoring_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use terrain_ai::config::AppConfig;
use terrain_ai::error::AppError;
use terrain_ai::telemetry;
use terrain_ai::workflows::scoring::RegionScoringService;
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

    let repository = Arc::new(InMemoryDriftHistoryRepository::default());
    let alerts = Arc::new(InMemoryAlertPublisher::default());
    let scoring_service = Arc::new(RegionScoringService::new(
        repository,
        alerts,
        engine_settings(&config.acquisition),
    ));

    let app = with_scoring_routes(scoring_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "land acquisition scout ready");

    axum::serve(listener, app).await?;
    Ok(())
}
