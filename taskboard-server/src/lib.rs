//! Taskboard server: config loading, board store init, HTTP API.

pub mod api;
pub mod config;
mod logging;
pub mod server;
pub mod state;

use crate::server::ServeError;
use crate::state::AppState;

pub async fn run() -> Result<(), ServeError> {
    if let Err(e) = logging::init() {
        logging::write_fallback_line(&format!("failed to initialize logger: {}", e));
    }

    let config_path = config::default_config_path();
    let config = config::load_config(&config_path);
    let (board, users) = config::load_board_config(&config)?.into_parts()?;

    log::info!(
        "Board ready: {} columns, {} tasks, {} users",
        board.columns().len(),
        board.task_count(),
        users.users().len()
    );

    let state = AppState::new(board, users, &config);
    server::serve(state).await
}
