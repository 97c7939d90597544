/// Task relocation engine.
///
/// A move takes the board by value, removes one task from its source cell and
/// inserts it at the destination cell. Coordinates come from drag gestures and
/// are treated as untrusted: unknown columns and out-of-range source indices
/// return the board untouched, and destination indices are clamped.
use serde::{Deserialize, Serialize};

use crate::types::Board;

/// A relocation request as reported by the drag layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    pub source_column_id: String,
    pub source_index: usize,
    pub dest_column_id: String,
    pub dest_index: usize,
}

impl MoveRequest {
    pub fn new(
        source_column_id: impl Into<String>,
        source_index: usize,
        dest_column_id: impl Into<String>,
        dest_index: usize,
    ) -> Self {
        Self {
            source_column_id: source_column_id.into(),
            source_index,
            dest_column_id: dest_column_id.into(),
            dest_index,
        }
    }
}

/// A (column, index) cell on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellRef {
    pub column_id: String,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum IgnoreReason {
    UnknownSourceColumn { column_id: String },
    UnknownDestColumn { column_id: String },
    SourceIndexOutOfRange { index: usize, len: usize },
}

/// What a relocation did to the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum MoveOutcome {
    /// `to.index` is the destination index after clamping.
    Moved {
        task_id: String,
        from: CellRef,
        to: CellRef,
    },
    Ignored { reason: IgnoreReason },
}

impl MoveOutcome {
    pub fn is_moved(&self) -> bool {
        matches!(self, MoveOutcome::Moved { .. })
    }
}

/// Move the task at `source_index` of `source_column_id` to `dest_index` of
/// `dest_column_id` and return the resulting board.
///
/// Invalid coordinates return `board` unchanged.
pub fn move_task(
    board: Board,
    source_column_id: &str,
    source_index: usize,
    dest_column_id: &str,
    dest_index: usize,
) -> Board {
    let request = MoveRequest::new(source_column_id, source_index, dest_column_id, dest_index);
    relocate(board, &request).0
}

/// Apply `request` to `board`, reporting whether a task moved.
pub fn relocate(mut board: Board, request: &MoveRequest) -> (Board, MoveOutcome) {
    let Some(source) = board.column_index(&request.source_column_id) else {
        return ignore(
            board,
            IgnoreReason::UnknownSourceColumn {
                column_id: request.source_column_id.clone(),
            },
        );
    };
    let Some(dest) = board.column_index(&request.dest_column_id) else {
        return ignore(
            board,
            IgnoreReason::UnknownDestColumn {
                column_id: request.dest_column_id.clone(),
            },
        );
    };

    let source_len = board.columns()[source].tasks.len();
    if request.source_index >= source_len {
        return ignore(
            board,
            IgnoreReason::SourceIndexOutOfRange {
                index: request.source_index,
                len: source_len,
            },
        );
    }

    #[cfg(debug_assertions)]
    let before: Vec<String> = board.task_ids().into_iter().map(String::from).collect();

    let columns = board.columns_mut();
    let task = columns[source].tasks.remove(request.source_index);
    let task_id = task.id.clone();

    // Same-column moves clamp against the already-shortened list.
    let dest_tasks = &mut columns[dest].tasks;
    let dest_index = request.dest_index.min(dest_tasks.len());
    dest_tasks.insert(dest_index, task);

    #[cfg(debug_assertions)]
    {
        if let Err(violation) = crate::invariants::check_conservation(before.as_slice(), &board) {
            panic!("move of task {} broke the board: {}", task_id, violation);
        }
        if let Err(violation) = crate::invariants::check_invariants(&board) {
            panic!("move of task {} broke the board: {}", task_id, violation);
        }
    }

    if dest_index != request.dest_index {
        log::trace!(
            target: "taskboard.engine",
            "Clamped destination index {} to {} in column {}",
            request.dest_index,
            dest_index,
            request.dest_column_id
        );
    }
    log::debug!(
        target: "taskboard.engine",
        "Moved task {} from {}[{}] to {}[{}]",
        task_id,
        request.source_column_id,
        request.source_index,
        request.dest_column_id,
        dest_index
    );

    let outcome = MoveOutcome::Moved {
        task_id,
        from: CellRef {
            column_id: request.source_column_id.clone(),
            index: request.source_index,
        },
        to: CellRef {
            column_id: request.dest_column_id.clone(),
            index: dest_index,
        },
    };
    (board, outcome)
}

fn ignore(board: Board, reason: IgnoreReason) -> (Board, MoveOutcome) {
    log::debug!(target: "taskboard.engine", "Ignoring move: {:?}", reason);
    (board, MoveOutcome::Ignored { reason })
}
