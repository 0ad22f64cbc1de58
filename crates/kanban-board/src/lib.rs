//! Board-side state for the kanban board: the project store, the drag
//! session engine, screen-reader announcements and the filtered view.

pub mod dnd;
pub mod store;
pub mod view;

pub use dnd::{Announcer, DragController, DragPhase, DragSession, LiveRegion};
pub use store::{BoardState, MoveOutcome, ProjectStore, SessionSaver, TaskDraft};
pub use view::{filter_projects, BoardView, ProjectView};
