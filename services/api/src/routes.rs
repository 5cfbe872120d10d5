use crate::infra::{deserialize_optional_date, engine_settings, AppState};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;
use terrain_ai::config::AppConfig;
use terrain_ai::error::AppError;
use terrain_ai::workflows::scoring::{
    scoring_router, AlertPublisher, DriftHistoryRepository, PlotSizing, PortfolioReport,
    PortfolioReportView, RegionScoringService,
};
use terrain_ai::workflows::signals::SignalBatchImporter;

#[derive(Debug, Deserialize)]
pub(crate) struct ScoringReportRequest {
    /// Collaborator signal export, one CSV row per region.
    pub(crate) signals_csv: String,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) evaluated_on: Option<NaiveDate>,
    #[serde(default)]
    pub(crate) target_budget: Option<f64>,
    #[serde(default)]
    pub(crate) land_price_per_m2: Option<f64>,
    #[serde(default)]
    pub(crate) development_cost_per_m2: Option<f64>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ScoringReportResponse {
    #[serde(flatten)]
    pub(crate) report: PortfolioReportView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) plot_sizing: Option<PlotSizing>,
}

pub(crate) fn with_scoring_routes<R, A>(service: Arc<RegionScoringService<R, A>>) -> axum::Router
where
    R: DriftHistoryRepository + 'static,
    A: AlertPublisher + 'static,
{
    scoring_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/scoring/report",
            axum::routing::post(scoring_report_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Stateless what-if report over an uploaded signal export. The stateful
/// weekly path with drift bookkeeping is `/api/v1/scoring/batch`; this one
/// scores against a fresh history so exploratory uploads never pollute it.
pub(crate) async fn scoring_report_endpoint(
    Json(payload): Json<ScoringReportRequest>,
) -> Result<Json<ScoringReportResponse>, AppError> {
    let ScoringReportRequest {
        signals_csv,
        evaluated_on,
        target_budget,
        land_price_per_m2,
        development_cost_per_m2,
    } = payload;

    let batches = SignalBatchImporter::from_reader(Cursor::new(signals_csv.into_bytes()))?;
    let evaluated_on = evaluated_on.unwrap_or_else(|| Local::now().date_naive());

    let acquisition = AppConfig::load()?.acquisition;
    let repository = Arc::new(crate::infra::InMemoryDriftHistoryRepository::default());
    let alerts = Arc::new(crate::infra::InMemoryAlertPublisher::default());
    let service = RegionScoringService::new(repository, alerts, engine_settings(&acquisition));

    let outcome = service.score_batch(&batches, evaluated_on);
    let report = PortfolioReport::from_outcome(&outcome).view();

    let plot_sizing = land_price_per_m2.map(|land_price| {
        service.size_plot(
            target_budget.unwrap_or(acquisition.target_budget),
            land_price,
            development_cost_per_m2.unwrap_or(acquisition.development_cost_per_m2),
        )
    });

    Ok(Json(ScoringReportResponse {
        report,
        plot_sizing,
    }))
}
