use axum::{
    extract::State,
    response::{
        sse::{Event, KeepAlive},
        Json, Sse,
    },
};
use std::convert::Infallible;
use std::time::Duration;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

use crate::state::AppState;

/// SSE endpoint: streams BoardEvent as JSON to connected clients.
pub async fn sse_events(
    State(state): State<AppState>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, Infallible>>> {
    let rx = state.event_tx.subscribe();
    let stream = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(event) => {
            let json = serde_json::to_string(&event).unwrap_or_default();
            Some(Ok(Event::default().data(json)))
        }
        Err(e) => {
            log::warn!(target: "taskboard.api.events", "SSE subscriber lagged: {}", e);
            None
        }
    });

    // Comment frame only after 30s of silence
    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(30))
            .text("keep-alive"),
    )
}

pub async fn status(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "running",
        "port": state.port,
        "bindAddress": state.bind_address,
        "version": state.store.version(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::app_state;
    use axum::response::IntoResponse;
    use taskboard_core::engine::CellRef;
    use taskboard_core::events::BoardEvent;

    #[tokio::test]
    async fn test_status() {
        let Json(body) = status(State(app_state())).await;
        assert_eq!(body["status"], "running");
        assert_eq!(body["port"], 8080);
        assert_eq!(body["version"], 1);
    }

    #[tokio::test]
    async fn test_sse_streams_published_event() {
        let state = app_state();
        let response = sse_events(State(state.clone())).await.into_response();
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/event-stream"
        );

        // Subscription happens inside the handler, so this send is observed.
        state.publish(BoardEvent::TaskMoved {
            version: 2,
            task_id: "1".to_string(),
            from: CellRef {
                column_id: "todo".to_string(),
                index: 0,
            },
            to: CellRef {
                column_id: "done".to_string(),
                index: 1,
            },
        });

        let mut body = response.into_body().into_data_stream();
        let chunk = tokio::time::timeout(Duration::from_secs(5), body.next())
            .await
            .expect("no SSE frame within 5s")
            .expect("stream ended")
            .unwrap();
        let frame = String::from_utf8(chunk.to_vec()).unwrap();

        assert!(frame.starts_with("data: "), "unexpected frame: {frame}");
        assert!(!frame.contains("keep-alive"));
        let json: serde_json::Value =
            serde_json::from_str(frame.trim_start_matches("data: ").trim_end()).unwrap();
        assert_eq!(json["type"], "TaskMoved");
        assert_eq!(json["taskId"], "1");
        assert_eq!(json["to"]["columnId"], "done");
    }
}
