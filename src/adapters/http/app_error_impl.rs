use crate::app_error::{AppError, ErrorCode};
use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();

        match self {
            AppError::InvalidInput(msg) => {
                tracing::debug!(message = %msg, "Rejected invalid input");
                error_resp(StatusCode::BAD_REQUEST, code, msg)
            }
            AppError::Conflict(msg) => {
                tracing::debug!(message = %msg, "Rejected conflicting request");
                error_resp(StatusCode::CONFLICT, code, msg)
            }
            AppError::StorageUnavailable(msg) => {
                // Logged at error level where the backend error was converted.
                tracing::debug!(message = %msg, "Storage unavailable");
                error_resp(StatusCode::SERVICE_UNAVAILABLE, code, msg)
            }
        }
    }
}

fn error_resp(status: StatusCode, code: ErrorCode, message: String) -> Response {
    let body = serde_json::json!({ "code": code.as_str(), "message": message });
    (status, Json(body)).into_response()
}
