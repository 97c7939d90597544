/// Structural checks over a board.
///
/// A board holds every task id at most once and every column id at most once.
/// Moves must additionally conserve the multiset of task ids. The engine only
/// runs these checks in debug builds; a failure there is a bug in the engine,
/// not bad input.
use std::collections::{HashMap, HashSet};

use crate::types::{Board, Column};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("Duplicate column id: {0}")]
    DuplicateColumnId(String),

    #[error("Task {task_id} appears in both {first_column} and {second_column}")]
    DuplicateTaskId {
        task_id: String,
        first_column: String,
        second_column: String,
    },

    #[error("Task {0} was lost by a move")]
    TaskLost(String),

    #[error("Task {0} appeared during a move")]
    TaskAppeared(String),
}

/// Check a board for duplicate column ids and duplicate task ids.
pub fn check_invariants(board: &Board) -> Result<(), InvariantViolation> {
    check_columns(board.columns())
}

pub(crate) fn check_columns(columns: &[Column]) -> Result<(), InvariantViolation> {
    let mut column_ids = HashSet::new();
    let mut owners: HashMap<&str, &str> = HashMap::new();

    for col in columns {
        if !column_ids.insert(col.id.as_str()) {
            return Err(InvariantViolation::DuplicateColumnId(col.id.clone()));
        }
        for task in &col.tasks {
            if let Some(first) = owners.insert(task.id.as_str(), col.id.as_str()) {
                return Err(InvariantViolation::DuplicateTaskId {
                    task_id: task.id.clone(),
                    first_column: first.to_string(),
                    second_column: col.id.clone(),
                });
            }
        }
    }
    Ok(())
}

/// Check that `after` holds exactly the task ids listed in `before`.
pub fn check_conservation<S: AsRef<str>>(
    before: &[S],
    after: &Board,
) -> Result<(), InvariantViolation> {
    let mut counts: HashMap<&str, isize> = HashMap::new();
    for id in before {
        *counts.entry(id.as_ref()).or_default() += 1;
    }
    for id in after.task_ids() {
        *counts.entry(id).or_default() -= 1;
    }

    let mut ids: Vec<_> = counts.into_iter().filter(|(_, n)| *n != 0).collect();
    ids.sort();
    match ids.first() {
        None => Ok(()),
        Some((id, n)) if *n > 0 => Err(InvariantViolation::TaskLost(id.to_string())),
        Some((id, _)) => Err(InvariantViolation::TaskAppeared(id.to_string())),
    }
}
