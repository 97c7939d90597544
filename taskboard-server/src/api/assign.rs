use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use taskboard_core::assign::{assign_user, Assignment, AssignmentContext, AssignmentError};
use taskboard_core::events::BoardEvent;
use taskboard_core::storage::BoardStore;

use super::{api_error, ApiError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignBody {
    user_id: u32,
}

/// GET /users
pub async fn list_users(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "users": state.users.users() }))
}

/// POST /board/tasks/{task_id}/assign
pub async fn assign_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
    Json(body): Json<AssignBody>,
) -> Result<(StatusCode, Json<Assignment>), ApiError> {
    let board = state.store.snapshot().board;
    let ctx = AssignmentContext::for_task(task_id);

    let assignment = assign_user(&board, &state.users, &ctx, body.user_id).map_err(|e| {
        let status = match &e {
            AssignmentError::TaskNotFound(_) | AssignmentError::UserNotFound(_) => {
                StatusCode::NOT_FOUND
            }
        };
        api_error(status, "taskboard.api.assign", e.to_string())
    })?;

    state
        .assignments
        .write()
        .unwrap_or_else(|e| e.into_inner())
        .record(assignment.clone());
    state.publish(BoardEvent::TaskAssigned {
        assignment: assignment.clone(),
    });

    Ok((StatusCode::CREATED, Json(assignment)))
}

/// GET /board/assignments
pub async fn list_assignments(State(state): State<AppState>) -> Json<serde_json::Value> {
    let assignments: Vec<Assignment> = state
        .assignments
        .read()
        .unwrap_or_else(|e| e.into_inner())
        .iter()
        .cloned()
        .collect();
    Json(serde_json::json!({ "assignments": assignments }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::app_state;

    #[tokio::test]
    async fn test_list_users() {
        let Json(body) = list_users(State(app_state())).await;
        let users = body["users"].as_array().unwrap();
        assert_eq!(users.len(), 3);
        assert_eq!(users[0]["name"], "John Doe");
    }

    #[tokio::test]
    async fn test_assign_and_list() {
        let state = app_state();
        let mut rx = state.event_tx.subscribe();

        let (status, Json(assignment)) = assign_task(
            State(state.clone()),
            Path("3".to_string()),
            Json(AssignBody { user_id: 2 }),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(assignment.user_name, "Jane Smith");
        assert!(matches!(
            rx.try_recv().unwrap(),
            BoardEvent::TaskAssigned { .. }
        ));

        let Json(body) = list_assignments(State(state)).await;
        assert_eq!(body["assignments"][0]["taskId"], "3");
        assert_eq!(body["assignments"][0]["userId"], 2);
    }

    #[tokio::test]
    async fn test_assign_unknown_task() {
        let err = assign_task(
            State(app_state()),
            Path("404".to_string()),
            Json(AssignBody { user_id: 1 }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.0, StatusCode::NOT_FOUND);
        assert_eq!(err.1.error, "Task not found: 404");
    }

    #[tokio::test]
    async fn test_assign_unknown_user() {
        let err = assign_task(
            State(app_state()),
            Path("1".to_string()),
            Json(AssignBody { user_id: 99 }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.0, StatusCode::NOT_FOUND);
    }
}
