pub mod memory;

use crate::engine::{MoveOutcome, MoveRequest};
use crate::types::Board;

/// Holder of the latest board value.
///
/// Moves are read-modify-write over the whole board, so implementations
/// serialize them per board. Readers always see a complete board.
pub trait BoardStore: Send + Sync {
    /// Latest board together with its version and content hash.
    fn snapshot(&self) -> BoardSnapshot;

    /// Apply a move to the latest board.
    fn apply_move(&self, request: &MoveRequest) -> Result<MoveApplied, StoreError>;

    /// Apply a move only if the board is still at `expected_version`.
    fn apply_move_if(
        &self,
        request: &MoveRequest,
        expected_version: u64,
    ) -> Result<MoveApplied, StoreError>;

    /// Swap in a whole new board. Returns the new version.
    fn replace(&self, board: Board) -> u64;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSnapshot {
    pub board: Board,
    /// Monotonic, bumped only when the board content changes
    pub version: u64,
    /// SHA-256 of the serialized board
    pub content_hash: String,
}

#[derive(Debug, Clone)]
pub struct MoveApplied {
    pub outcome: MoveOutcome,
    /// False for ignored moves and same-cell moves.
    pub changed: bool,
    pub snapshot: BoardSnapshot,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Board version mismatch: expected {expected}, current {current}")]
    VersionMismatch { expected: u64, current: u64 },
}
