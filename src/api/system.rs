use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use super::{AppState, ErrorBody, HealthResponse};

/// `GET /api/health`
///
/// Readiness probe; answers 503 when the database cannot be reached.
pub async fn health(State(state): State<Arc<AppState>>) -> Response {
    if let Err(e) = state.store().ping().await {
        tracing::warn!(error = %e, "Health check failed");
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorBody::detail("Database unavailable")),
        )
            .into_response();
    }

    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
    .into_response()
}
