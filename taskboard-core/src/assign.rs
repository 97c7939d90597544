/// Task assignment against a static user lookup list.
///
/// The task being assigned is passed in explicitly through
/// [`AssignmentContext`]; nothing here keeps a "currently selected task".
/// Assigning never touches the board itself.
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::Board;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u32,
    pub name: String,
}

impl User {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Ordered list of assignable users.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserDirectory {
    users: Vec<User>,
}

impl UserDirectory {
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn find(&self, user_id: u32) -> Option<&User> {
        self.users.iter().find(|u| u.id == user_id)
    }
}

/// The task an assignment acts on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentContext {
    pub task_id: String,
}

impl AssignmentContext {
    pub fn for_task(task_id: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub task_id: String,
    pub user_id: u32,
    pub user_name: String,
    pub assigned_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssignmentError {
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("User not found: {0}")]
    UserNotFound(u32),
}

/// Resolve an assignment of `user_id` to the task in `ctx`.
pub fn assign_user(
    board: &Board,
    directory: &UserDirectory,
    ctx: &AssignmentContext,
    user_id: u32,
) -> Result<Assignment, AssignmentError> {
    if board.task(&ctx.task_id).is_none() {
        return Err(AssignmentError::TaskNotFound(ctx.task_id.clone()));
    }
    let user = directory
        .find(user_id)
        .ok_or(AssignmentError::UserNotFound(user_id))?;

    log::info!(
        target: "taskboard.assign",
        "Assigning {} to task {}",
        user.name,
        ctx.task_id
    );

    Ok(Assignment {
        task_id: ctx.task_id.clone(),
        user_id: user.id,
        user_name: user.name.clone(),
        assigned_at: Utc::now(),
    })
}

/// Latest assignment per task, keyed by task id.
#[derive(Debug, Clone, Default)]
pub struct Assignments {
    by_task: BTreeMap<String, Assignment>,
}

impl Assignments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an assignment, returning the one it replaced.
    pub fn record(&mut self, assignment: Assignment) -> Option<Assignment> {
        self.by_task.insert(assignment.task_id.clone(), assignment)
    }

    pub fn get(&self, task_id: &str) -> Option<&Assignment> {
        self.by_task.get(task_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Assignment> {
        self.by_task.values()
    }

    pub fn len(&self) -> usize {
        self.by_task.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_task.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Column, Task};

    fn board() -> Board {
        Board::new(vec![Column::new(
            "todo",
            "To Do",
            vec![Task::new("1", "Task 1", "Description 1")],
        )])
        .unwrap()
    }

    fn directory() -> UserDirectory {
        UserDirectory::new(vec![User::new(1, "John Doe"), User::new(2, "Jane Smith")])
    }

    #[test]
    fn test_assign_known_user() {
        let assignment =
            assign_user(&board(), &directory(), &AssignmentContext::for_task("1"), 2).unwrap();
        assert_eq!(assignment.task_id, "1");
        assert_eq!(assignment.user_id, 2);
        assert_eq!(assignment.user_name, "Jane Smith");
    }

    #[test]
    fn test_assign_unknown_task() {
        let result = assign_user(&board(), &directory(), &AssignmentContext::for_task("9"), 1);
        assert_eq!(result, Err(AssignmentError::TaskNotFound("9".to_string())));
    }

    #[test]
    fn test_assign_unknown_user() {
        let result = assign_user(&board(), &directory(), &AssignmentContext::for_task("1"), 42);
        assert_eq!(result, Err(AssignmentError::UserNotFound(42)));
    }

    #[test]
    fn test_ledger_keeps_latest_per_task() {
        let b = board();
        let dir = directory();
        let ctx = AssignmentContext::for_task("1");
        let mut ledger = Assignments::new();

        assert!(ledger.record(assign_user(&b, &dir, &ctx, 1).unwrap()).is_none());
        let replaced = ledger.record(assign_user(&b, &dir, &ctx, 2).unwrap());

        assert_eq!(replaced.map(|a| a.user_id), Some(1));
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.get("1").map(|a| a.user_name.as_str()), Some("Jane Smith"));
    }

    #[test]
    fn test_directory_serializes_as_list() {
        let json = serde_json::to_value(directory()).unwrap();
        assert_eq!(json[0]["name"], "John Doe");
        assert_eq!(json[1]["id"], 2);
    }
}
