/// Initial board configuration: columns with their tasks, plus the users
/// offered by the assignment dialog.
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::assign::{User, UserDirectory};
use crate::invariants::InvariantViolation;
use crate::types::{Board, Column, Task};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub columns: Vec<Column>,
    #[serde(default)]
    pub users: Vec<User>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid board: {0}")]
    Invalid(#[from] InvariantViolation),

    #[error("Duplicate user id {0}")]
    DuplicateUserId(u32),
}

impl Default for BoardConfig {
    fn default() -> Self {
        let task = |n: u32| Task::new(n.to_string(), format!("Task {}", n), format!("Description {}", n));
        Self {
            columns: vec![
                Column::new("todo", "To Do", vec![task(1), task(2)]),
                Column::new("inProgress", "In Progress", vec![task(3)]),
                Column::new("done", "Done", vec![task(4)]),
            ],
            users: vec![
                User::new(1, "John Doe"),
                User::new(2, "Jane Smith"),
                User::new(3, "Mike Johnson"),
            ],
        }
    }
}

impl BoardConfig {
    /// Read a JSON board config from `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Validate the columns and users, then split into the board and the
    /// user list. User ids must be unique so lookups by id are unambiguous.
    pub fn into_parts(self) -> Result<(Board, UserDirectory), ConfigError> {
        let board = Board::new(self.columns)?;
        let mut seen = HashSet::new();
        if let Some(user) = self.users.iter().find(|u| !seen.insert(u.id)) {
            return Err(ConfigError::DuplicateUserId(user.id));
        }
        Ok((board, UserDirectory::new(self.users)))
    }
}
