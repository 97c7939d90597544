/// In-memory board store.
///
/// - One write mutex serializes moves (read latest, relocate, publish)
/// - Readers clone the latest snapshot under a read lock
/// - Version counter and SHA-256 content hash for ETag / precondition support
use std::sync::{Mutex, RwLock};

use sha2::{Digest, Sha256};

use super::{BoardSnapshot, BoardStore, MoveApplied, StoreError};
use crate::engine::{self, MoveRequest};
use crate::types::Board;

pub struct MemoryStore {
    state: RwLock<BoardSnapshot>,
    write_lock: Mutex<()>,
}

impl MemoryStore {
    pub fn new(board: Board) -> Self {
        let content_hash = Self::content_hash(&board);
        Self {
            state: RwLock::new(BoardSnapshot {
                board,
                version: 1,
                content_hash,
            }),
            write_lock: Mutex::new(()),
        }
    }

    /// SHA-256 of the board's JSON form (for change detection).
    pub fn content_hash(board: &Board) -> String {
        let json = serde_json::to_string(board).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(json.as_bytes());
        hex::encode(hasher.finalize())
    }

    pub fn version(&self) -> u64 {
        self.read_state().version
    }

    fn read_state(&self) -> std::sync::RwLockReadGuard<'_, BoardSnapshot> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn publish(&self, board: Board, content_hash: String) -> BoardSnapshot {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        state.board = board;
        state.content_hash = content_hash;
        state.version += 1;
        state.clone()
    }

    fn apply_locked(&self, request: &MoveRequest, current: BoardSnapshot) -> MoveApplied {
        let (board, outcome) = engine::relocate(current.board, request);
        if !outcome.is_moved() {
            return MoveApplied {
                outcome,
                changed: false,
                snapshot: BoardSnapshot {
                    board,
                    version: current.version,
                    content_hash: current.content_hash,
                },
            };
        }

        let content_hash = Self::content_hash(&board);
        if content_hash == current.content_hash {
            return MoveApplied {
                outcome,
                changed: false,
                snapshot: BoardSnapshot {
                    board,
                    content_hash,
                    version: current.version,
                },
            };
        }

        let snapshot = self.publish(board, content_hash);
        log::info!(
            target: "taskboard.store",
            "Board now at version {} ({} tasks)",
            snapshot.version,
            snapshot.board.task_count()
        );
        MoveApplied {
            outcome,
            changed: true,
            snapshot,
        }
    }
}

impl BoardStore for MemoryStore {
    fn snapshot(&self) -> BoardSnapshot {
        self.read_state().clone()
    }

    fn apply_move(&self, request: &MoveRequest) -> Result<MoveApplied, StoreError> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let current = self.snapshot();
        Ok(self.apply_locked(request, current))
    }

    fn apply_move_if(
        &self,
        request: &MoveRequest,
        expected_version: u64,
    ) -> Result<MoveApplied, StoreError> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let current = self.snapshot();
        if current.version != expected_version {
            log::warn!(
                target: "taskboard.store",
                "Rejected move at stale version {} (current {})",
                expected_version,
                current.version
            );
            return Err(StoreError::VersionMismatch {
                expected: expected_version,
                current: current.version,
            });
        }
        Ok(self.apply_locked(request, current))
    }

    fn replace(&self, board: Board) -> u64 {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let content_hash = Self::content_hash(&board);
        self.publish(board, content_hash).version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BoardConfig;
    use crate::engine::MoveOutcome;
    use std::sync::Arc;

    fn store() -> MemoryStore {
        let (board, _) = BoardConfig::default().into_parts().unwrap();
        MemoryStore::new(board)
    }

    #[test]
    fn test_apply_move_bumps_version() {
        let store = store();
        let v1 = store.version();

        let applied = store
            .apply_move(&MoveRequest::new("todo", 0, "done", 1))
            .unwrap();

        assert!(applied.changed);
        assert_eq!(applied.snapshot.version, v1 + 1);
        assert_eq!(store.snapshot().board.position_of("1"), Some(("done", 1)));
    }

    #[test]
    fn test_ignored_move_keeps_version() {
        let store = store();
        let before = store.snapshot();

        let applied = store
            .apply_move(&MoveRequest::new("bogus", 0, "done", 0))
            .unwrap();

        assert!(!applied.changed);
        assert!(matches!(applied.outcome, MoveOutcome::Ignored { .. }));
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_same_cell_move_keeps_version() {
        let store = store();
        let v1 = store.version();
        let applied = store
            .apply_move(&MoveRequest::new("todo", 0, "todo", 0))
            .unwrap();
        assert!(applied.outcome.is_moved());
        assert!(!applied.changed);
        assert_eq!(store.version(), v1);
    }

    #[test]
    fn test_apply_move_if_rejects_stale_version() {
        let store = store();
        let v1 = store.version();
        store
            .apply_move_if(&MoveRequest::new("todo", 0, "done", 0), v1)
            .unwrap();

        let result = store.apply_move_if(&MoveRequest::new("todo", 0, "done", 0), v1);
        assert!(matches!(
            result,
            Err(StoreError::VersionMismatch { expected, current }) if expected == v1 && current == v1 + 1
        ));
        assert_eq!(store.snapshot().board.column("todo").unwrap().tasks.len(), 1);
    }

    #[test]
    fn test_content_hash_tracks_board() {
        let store = store();
        let h1 = store.snapshot().content_hash;
        assert_eq!(h1.len(), 64);
        store
            .apply_move(&MoveRequest::new("todo", 1, "inProgress", 0))
            .unwrap();
        assert_ne!(store.snapshot().content_hash, h1);
    }

    #[test]
    fn test_replace() {
        let store = store();
        let v = store.replace(Board::default());
        assert_eq!(v, 2);
        assert_eq!(store.snapshot().board.task_count(), 0);
    }

    #[test]
    fn test_concurrent_moves_conserve_tasks() {
        let store = Arc::new(store());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    let columns = ["todo", "inProgress", "done"];
                    for j in 0..50 {
                        let request = MoveRequest::new(
                            columns[(i + j) % 3],
                            j % 2,
                            columns[(i + 2 * j) % 3],
                            j % 3,
                        );
                        store.apply_move(&request).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let board = store.snapshot().board;
        let mut ids = board.task_ids();
        ids.sort();
        assert_eq!(ids, vec!["1", "2", "3", "4"]);
    }
}
