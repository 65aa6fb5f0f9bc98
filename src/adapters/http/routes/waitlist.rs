//! Waitlist sign-up and count routes.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    adapters::http::app_state::AppState,
    app_error::{AppError, AppResult},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/waitlist", post(join_waitlist))
        .route("/waitlist/count", get(waitlist_count))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Sign-up body. Absent, null and non-string fields all read as missing.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct JoinWaitlistPayload {
    #[serde(default, deserialize_with = "string_or_none")]
    first_name: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    last_name: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    email: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    company: Option<String>,
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        _ => None,
    })
}

#[derive(Serialize)]
struct JoinWaitlistResponse {
    success: bool,
    message: &'static str,
    id: String,
}

#[derive(Serialize)]
struct WaitlistCountResponse {
    count: u64,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/waitlist
/// Registers a sign-up; one entry per email.
async fn join_waitlist(
    State(app_state): State<AppState>,
    payload: Result<Json<JoinWaitlistPayload>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(payload) = payload
        .map_err(|e| AppError::InvalidInput(format!("Invalid request body: {}", e.body_text())))?;

    let entry = app_state
        .waitlist_use_cases
        .register(
            payload.first_name.as_deref().unwrap_or_default(),
            payload.last_name.as_deref().unwrap_or_default(),
            payload.email.as_deref().unwrap_or_default(),
            payload.company.as_deref().unwrap_or_default(),
        )
        .await?;

    Ok(Json(JoinWaitlistResponse {
        success: true,
        message: "Successfully joined the waitlist!",
        id: entry.id.to_string(),
    }))
}

/// GET /api/waitlist/count
async fn waitlist_count(State(app_state): State<AppState>) -> AppResult<impl IntoResponse> {
    let count = app_state.waitlist_use_cases.count().await?;
    Ok(Json(WaitlistCountResponse { count }))
}
