use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;

use super::domain::RegionSignalBatch;
use super::drift::classify_window;
use super::report::PortfolioReport;
use super::repository::{AlertPublisher, DriftHistoryRepository};
use super::service::RegionScoringService;

/// Router builder exposing batch scoring and per-region drift lookups.
pub fn scoring_router<R, A>(service: Arc<RegionScoringService<R, A>>) -> Router
where
    R: DriftHistoryRepository + 'static,
    A: AlertPublisher + 'static,
{
    Router::new()
        .route("/api/v1/scoring/batch", post(score_batch_handler::<R, A>))
        .route(
            "/api/v1/scoring/regions/:region/drift",
            get(drift_handler::<R, A>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub struct ScoreBatchRequest {
    #[serde(default)]
    pub evaluated_on: Option<NaiveDate>,
    pub regions: Vec<RegionSignalBatch>,
}

pub(crate) async fn score_batch_handler<R, A>(
    State(service): State<Arc<RegionScoringService<R, A>>>,
    axum::Json(request): axum::Json<ScoreBatchRequest>,
) -> Response
where
    R: DriftHistoryRepository + 'static,
    A: AlertPublisher + 'static,
{
    if request.regions.is_empty() {
        let payload = json!({
            "error": "no regions submitted",
        });
        return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response();
    }

    let evaluated_on = request
        .evaluated_on
        .unwrap_or_else(|| Local::now().date_naive());

    let outcome = service.score_batch(&request.regions, evaluated_on);
    let report = PortfolioReport::from_outcome(&outcome);

    (StatusCode::OK, axum::Json(report.view())).into_response()
}

pub(crate) async fn drift_handler<R, A>(
    State(service): State<Arc<RegionScoringService<R, A>>>,
    Path(region): Path<String>,
) -> Response
where
    R: DriftHistoryRepository + 'static,
    A: AlertPublisher + 'static,
{
    match service.drift_history(&region) {
        Ok(history) => {
            let drifts: Vec<f64> = history.iter().map(|snapshot| snapshot.drift_pct).collect();
            let level = classify_window(&drifts);
            let payload = json!({
                "region": region,
                "alert_level": level,
                "alert_level_label": level.label(),
                "weeks_tracked": history.len(),
                "history": history,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) => {
            let payload = json!({
                "error": err.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
