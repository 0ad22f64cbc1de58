pub mod board;
pub mod drag;
pub mod field_update;
pub mod filter;
pub mod project;
pub mod search;
pub mod task;
pub mod user;

pub use board::{Board, BoardId};
pub use drag::{DragData, DragEntry, DragKind, DragSubject};
pub use field_update::FieldUpdate;
pub use filter::{FilterUpdate, TaskFilters};
pub use project::{array_move, Project, ProjectId, ProjectUpdate};
pub use task::{Task, TaskId, TaskStatus, TaskUpdate};
pub use user::{User, UserId};

/// Generate a fresh opaque identifier.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
