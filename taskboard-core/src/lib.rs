//! Board state engine for a column-based task board.
//!
//! The board is an immutable value: [`engine::move_task`] takes the current
//! board and returns the next one. Everything else in this crate (assignment,
//! config, the in-memory store) is built around that single transition.

pub mod assign;
pub mod config;
pub mod engine;
pub mod events;
pub mod invariants;
pub mod storage;
pub mod types;

pub use engine::{move_task, relocate, MoveOutcome, MoveRequest};
pub use types::{Board, Column, Task};
