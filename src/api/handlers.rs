use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::api::{
    error::ApiError,
    extract::ValidatedJson,
    state::AppState,
};
use crate::domain::{PredictionRequest, PredictionResponse};

pub const WELCOME_MESSAGE: &str = "Welcome to the Fault Prediction API!";

/// GET /
pub async fn root() -> Json<Value> {
    Json(json!({ "message": WELCOME_MESSAGE }))
}

/// POST /predict
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<ValidatedJson<PredictionRequest>, ApiError>,
) -> Result<Json<PredictionResponse>, ApiError> {
    let ValidatedJson(request) = payload.inspect_err(|e| {
        if matches!(e, ApiError::Validation(_)) {
            state.metrics.inc_validation_failures();
        }
    })?;

    let response = state.predictor.predict(request).await?;
    Ok(Json(response))
}

/// GET /healthz -- liveness probe
pub async fn liveness() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

/// GET /metrics -- Prometheus text
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        state.metrics.render(),
    )
}
