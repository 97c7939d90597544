use serde::{Deserialize, Serialize};

use crate::invariants::{self, InvariantViolation};

/// A unit of work on the board. The engine never edits task content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
}

impl Task {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Column {
    pub fn new(id: impl Into<String>, title: impl Into<String>, tasks: Vec<Task>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            tasks,
        }
    }
}

/// Ordered sequence of columns.
///
/// Serializes as a bare JSON array of columns. Deserialization runs the same
/// validation as [`Board::new`], so a decoded board never holds duplicate
/// column or task ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Column>", into = "Vec<Column>")]
pub struct Board {
    columns: Vec<Column>,
}

impl Board {
    /// Build a board, rejecting duplicate column ids and tasks that appear
    /// more than once.
    pub fn new(columns: Vec<Column>) -> Result<Self, InvariantViolation> {
        invariants::check_columns(&columns)?;
        Ok(Self { columns })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, column_id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == column_id)
    }

    pub(crate) fn column_index(&self, column_id: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.id == column_id)
    }

    /// Column list for in-crate relocation. The column sequence itself must
    /// not be reshaped through this handle.
    pub(crate) fn columns_mut(&mut self) -> &mut [Column] {
        &mut self.columns
    }

    /// Find the task with the given id.
    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.columns
            .iter()
            .flat_map(|c| c.tasks.iter())
            .find(|t| t.id == task_id)
    }

    /// Column id and index currently holding `task_id`.
    pub fn position_of(&self, task_id: &str) -> Option<(&str, usize)> {
        self.columns.iter().find_map(|col| {
            col.tasks
                .iter()
                .position(|t| t.id == task_id)
                .map(|index| (col.id.as_str(), index))
        })
    }

    pub fn task_count(&self) -> usize {
        self.columns.iter().map(|c| c.tasks.len()).sum()
    }

    /// All task ids in board order (column by column, top to bottom).
    pub fn task_ids(&self) -> Vec<&str> {
        self.columns
            .iter()
            .flat_map(|c| c.tasks.iter().map(|t| t.id.as_str()))
            .collect()
    }

    pub fn summaries(&self) -> Vec<ColumnSummary> {
        self.columns
            .iter()
            .enumerate()
            .map(|(index, col)| ColumnSummary {
                index,
                id: col.id.clone(),
                title: col.title.clone(),
                task_count: col.tasks.len(),
            })
            .collect()
    }

    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }
}

impl TryFrom<Vec<Column>> for Board {
    type Error = InvariantViolation;

    fn try_from(columns: Vec<Column>) -> Result<Self, Self::Error> {
        Board::new(columns)
    }
}

impl From<Board> for Vec<Column> {
    fn from(board: Board) -> Self {
        board.columns
    }
}

/// Summary row for a column, used by list-style responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSummary {
    pub index: usize,
    pub id: String,
    pub title: String,
    pub task_count: usize,
}
