/// Shared application state passed to axum handlers.
use std::sync::{Arc, RwLock};

use taskboard_core::assign::{Assignments, UserDirectory};
use taskboard_core::events::BoardEvent;
use taskboard_core::storage::memory::MemoryStore;
use taskboard_core::Board;
use tokio::sync::broadcast;

use crate::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MemoryStore>,
    pub users: Arc<UserDirectory>,
    pub assignments: Arc<RwLock<Assignments>>,
    pub event_tx: broadcast::Sender<BoardEvent>,
    pub port: u16,
    pub bind_address: String,
}

impl AppState {
    pub fn new(board: Board, users: UserDirectory, config: &ServerConfig) -> Self {
        let (event_tx, _) = broadcast::channel(256);
        Self {
            store: Arc::new(MemoryStore::new(board)),
            users: Arc::new(users),
            assignments: Arc::new(RwLock::new(Assignments::new())),
            event_tx,
            port: config.port,
            bind_address: config.bind_address.clone(),
        }
    }

    /// Publish to SSE subscribers. No subscribers is not an error.
    pub fn publish(&self, event: BoardEvent) {
        let _ = self.event_tx.send(event);
    }
}
