use super::{Announcer, DragSession, LiveRegion};
use crate::store::{MoveOutcome, ProjectStore};
use kanban_domain::DragEntry;
use std::sync::Arc;

/// Entry point for the gesture layer: narrates each callback, then applies
/// it to the board.
///
/// Announcements are computed against the board as it was before the
/// callback's own mutation.
pub struct DragController {
    session: DragSession,
    announcer: Announcer,
    live_region: LiveRegion,
}

impl DragController {
    pub fn new(store: Arc<ProjectStore>) -> Self {
        Self {
            session: DragSession::new(store),
            announcer: Announcer::new(),
            live_region: LiveRegion::new(),
        }
    }

    pub fn session(&self) -> &DragSession {
        &self.session
    }

    pub fn announcer(&self) -> &Announcer {
        &self.announcer
    }

    pub fn live_region(&self) -> &LiveRegion {
        &self.live_region
    }

    pub fn store(&self) -> &Arc<ProjectStore> {
        self.session.store()
    }

    pub fn on_drag_start(&mut self, active: &DragEntry) -> bool {
        let snapshot = self.store().snapshot();
        let message = self.announcer.on_drag_start(active, &snapshot.projects);
        self.live_region.announce(message);
        self.session.on_drag_start(active)
    }

    pub async fn on_drag_over(
        &mut self,
        active: &DragEntry,
        over: Option<&DragEntry>,
    ) -> Option<MoveOutcome> {
        let snapshot = self.store().snapshot();
        let message = self.announcer.on_drag_over(active, over, &snapshot.projects);
        self.live_region.announce(message);
        self.session.on_drag_over(active, over).await
    }

    pub async fn on_drag_end(
        &mut self,
        active: &DragEntry,
        over: Option<&DragEntry>,
    ) -> Option<MoveOutcome> {
        let snapshot = self.store().snapshot();
        let message = self.announcer.on_drag_end(active, over, &snapshot.projects);
        self.live_region.announce(message);
        self.session.on_drag_end(active, over).await
    }

    pub fn on_drag_cancel(&mut self, active: &DragEntry) {
        let message = self.announcer.on_drag_cancel(active);
        self.live_region.announce(message);
        self.session.on_drag_cancel();
    }
}
