use axum::{
    http::{HeaderMap, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Serialize;

mod assign;
mod board;
mod events;

use crate::state::AppState;

/// Axum REST API routes.
///
///   GET  /board                          -> full board (+ ETag)
///   GET  /board/summary                  -> per-column task counts
///   POST /board/move                     -> relocate a task (optional If-Match)
///   GET  /board/assignments              -> latest assignment per task
///   POST /board/tasks/:taskId/assign     -> assign a user to a task
///   GET  /users                          -> assignable users
///   GET  /events                         -> SSE stream of board events
///   GET  /status                         -> health check
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/board", get(board::get_board))
        .route("/board/summary", get(board::get_summary))
        .route("/board/move", post(board::move_task))
        .route("/board/assignments", get(assign::list_assignments))
        .route("/board/tasks/{task_id}/assign", post(assign::assign_task))
        .route("/users", get(assign::list_users))
        .route("/events", get(events::sse_events))
        .route("/status", get(events::status))
}

// ── Shared types and helpers used across sub-modules ────────────────────

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, target: &'static str, error: impl Into<String>) -> ApiError {
    let error = error.into();
    log_api_issue(status, target, &error);
    (status, Json(ErrorResponse { error }))
}

fn insert_header_safe(headers: &mut HeaderMap, name: &'static str, value: &str) {
    match value.parse() {
        Ok(parsed) => {
            headers.insert(name, parsed);
        }
        Err(e) => {
            log::warn!("Failed to set header {}={} ({})", name, value, e);
        }
    }
}

fn log_api_issue(status: StatusCode, target: &'static str, message: impl AsRef<str>) {
    let message = message.as_ref();
    if status.is_server_error() {
        log::error!(target: target, "{}", message);
    } else {
        log::warn!(target: target, "{}", message);
    }
}
