use axum::{Json, Router, response::IntoResponse, routing::get};
use serde::Serialize;

use crate::adapters::http::app_state::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// GET /api/health
async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
