use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use taskboard_core::engine::{MoveOutcome, MoveRequest};
use taskboard_core::events::BoardEvent;
use taskboard_core::storage::{BoardStore, StoreError};

use super::{api_error, insert_header_safe, ApiError};
use crate::state::AppState;

fn etag_for(version: u64) -> String {
    format!("\"{}\"", version)
}

/// GET /board -- full board with ETag; honours If-None-Match.
pub async fn get_board(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let snapshot = state.store.snapshot();
    let etag = etag_for(snapshot.version);

    let mut resp_headers = HeaderMap::new();
    insert_header_safe(&mut resp_headers, "etag", &etag);

    if let Some(if_none_match) = headers.get("if-none-match") {
        if if_none_match.to_str().ok() == Some(etag.as_str()) {
            // 304 carries no body
            return (StatusCode::NOT_MODIFIED, resp_headers).into_response();
        }
    }

    (
        StatusCode::OK,
        resp_headers,
        Json(serde_json::json!({
            "version": snapshot.version,
            "contentHash": snapshot.content_hash,
            "columns": snapshot.board,
        })),
    )
        .into_response()
}

/// GET /board/summary
pub async fn get_summary(State(state): State<AppState>) -> Json<serde_json::Value> {
    let snapshot = state.store.snapshot();
    Json(serde_json::json!({
        "version": snapshot.version,
        "taskCount": snapshot.board.task_count(),
        "columns": snapshot.board.summaries(),
    }))
}

/// POST /board/move -- relocate one task.
///
/// Invalid coordinates are not errors: the response carries the unchanged
/// board with `applied: false`. Only a stale `If-Match` version is rejected.
pub async fn move_task(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<MoveRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let expected_version = match headers.get("if-match") {
        Some(value) => {
            let parsed = value
                .to_str()
                .ok()
                .and_then(|v| v.trim().trim_matches('"').parse::<u64>().ok());
            match parsed {
                Some(version) => Some(version),
                None => {
                    return Err(api_error(
                        StatusCode::BAD_REQUEST,
                        "taskboard.api.move",
                        "If-Match must be a board version",
                    ))
                }
            }
        }
        None => None,
    };

    let result = match expected_version {
        Some(version) => state.store.apply_move_if(&request, version),
        None => state.store.apply_move(&request),
    };

    let applied = result.map_err(|e| {
        let status = match &e {
            StoreError::VersionMismatch { .. } => StatusCode::CONFLICT,
        };
        api_error(
            status,
            "taskboard.api.move",
            format!("Failed to move task: {}", e),
        )
    })?;

    if applied.changed {
        if let MoveOutcome::Moved { task_id, from, to } = &applied.outcome {
            state.publish(BoardEvent::TaskMoved {
                version: applied.snapshot.version,
                task_id: task_id.clone(),
                from: from.clone(),
                to: to.clone(),
            });
        }
    }

    Ok(Json(serde_json::json!({
        "applied": applied.changed,
        "version": applied.snapshot.version,
        "outcome": applied.outcome,
        "columns": applied.snapshot.board,
    })))
}
