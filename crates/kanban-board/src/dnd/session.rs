use crate::store::{MoveOutcome, ProjectStore};
use kanban_domain::{DragData, DragEntry, DragSubject};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging(DragSubject),
}

impl DragPhase {
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging(_))
    }

    pub fn subject(&self) -> Option<&DragSubject> {
        match self {
            Self::Idle => None,
            Self::Dragging(subject) => Some(subject),
        }
    }
}

/// Turns drag callbacks into store operations.
///
/// Tasks move while hovering; projects only move on drop. Every handler
/// re-reads the store when it runs, so overlapping moves see each other's
/// effects.
pub struct DragSession {
    store: Arc<ProjectStore>,
    phase: DragPhase,
}

impl DragSession {
    pub fn new(store: Arc<ProjectStore>) -> Self {
        Self {
            store,
            phase: DragPhase::Idle,
        }
    }

    pub fn phase(&self) -> &DragPhase {
        &self.phase
    }

    pub fn store(&self) -> &Arc<ProjectStore> {
        &self.store
    }

    /// Returns whether a drag began.
    pub fn on_drag_start(&mut self, active: &DragEntry) -> bool {
        self.phase = DragPhase::Idle;
        let Some(data) = &active.data else {
            return false;
        };
        let snapshot = self.store.snapshot();
        match DragSubject::resolve(data, &snapshot.projects) {
            Some(subject) => {
                tracing::debug!("Drag started: {} {}", subject.kind(), subject.id());
                self.phase = DragPhase::Dragging(subject);
                true
            }
            None => {
                tracing::warn!(
                    "Drag started on {} {} which is not on the board",
                    data.kind(),
                    data.id()
                );
                false
            }
        }
    }

    /// Handle hovering. Returns the outcome of a move when one was attempted.
    pub async fn on_drag_over(
        &self,
        active: &DragEntry,
        over: Option<&DragEntry>,
    ) -> Option<MoveOutcome> {
        let subject = self.phase.subject()?;
        let over = over?;
        let (active_data, over_data) = (active.data.as_ref()?, over.data.as_ref()?);
        if active.id == over.id || active.id != subject.id() {
            return None;
        }

        let DragData::Task { task } = active_data else {
            // Projects are reordered on drop
            return None;
        };

        let target_project_id = match over_data {
            DragData::Project { project } => project.id.clone(),
            DragData::Task { task: over_task } => {
                let snapshot = self.store.snapshot();
                match snapshot.project_of_task(&over_task.id) {
                    Some(project) => project.id.clone(),
                    None => {
                        tracing::debug!("Hovered task {} is no longer on the board", over_task.id);
                        return None;
                    }
                }
            }
        };

        let outcome = self.store.move_task(&task.id, &target_project_id).await;
        if !outcome.is_applied() {
            tracing::debug!(
                "Hover move of task {} into {} not applied: {:?}",
                task.id,
                target_project_id,
                outcome
            );
        }
        Some(outcome)
    }

    /// Handle the drop. Always ends the drag.
    pub async fn on_drag_end(
        &mut self,
        active: &DragEntry,
        over: Option<&DragEntry>,
    ) -> Option<MoveOutcome> {
        let phase = std::mem::take(&mut self.phase);
        let DragPhase::Dragging(DragSubject::Project { .. }) = phase else {
            return None;
        };
        let over = over?;
        if active.id == over.id {
            return None;
        }
        match (&active.data, &over.data) {
            (Some(DragData::Project { .. }), Some(DragData::Project { .. })) => {
                match self.store.reorder_projects(&active.id, &over.id).await {
                    Ok(outcome) => Some(outcome),
                    Err(e) => {
                        tracing::warn!("Could not reorder projects: {}", e);
                        None
                    }
                }
            }
            _ => None,
        }
    }

    pub fn on_drag_cancel(&mut self) {
        if self.phase.is_dragging() {
            tracing::debug!("Drag cancelled");
        }
        self.phase = DragPhase::Idle;
    }
}
