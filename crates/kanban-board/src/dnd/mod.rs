//! Drag-and-drop: the session engine that mutates the store, the announcer
//! that narrates the gesture, and the controller that drives both.

mod announcements;
mod controller;
mod live_region;
mod session;

pub use announcements::Announcer;
pub use controller::DragController;
pub use live_region::LiveRegion;
pub use session::{DragPhase, DragSession};
