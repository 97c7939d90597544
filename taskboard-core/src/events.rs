/// Events published after the board or its assignments change.
use serde::{Deserialize, Serialize};

use crate::assign::Assignment;
use crate::engine::CellRef;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum BoardEvent {
    TaskMoved {
        version: u64,
        task_id: String,
        from: CellRef,
        to: CellRef,
    },
    TaskAssigned {
        assignment: Assignment,
    },
}
