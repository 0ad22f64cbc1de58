//! Screen-reader narration of drag gestures.
//!
//! Every method is a pure function of the drag entries, the project list at
//! the time of the event, and one piece of memory: the project a dragged
//! task was picked up from.

use kanban_domain::{DragData, DragEntry, DragKind, Project, ProjectId};

/// Where a task sits on the board.
struct TaskSlot<'a> {
    project: &'a Project,
    index: usize,
}

impl TaskSlot<'_> {
    fn position(&self) -> usize {
        self.index + 1
    }

    fn count(&self) -> usize {
        self.project.tasks.len()
    }
}

fn task_slot<'a>(projects: &'a [Project], task_id: &str) -> Option<TaskSlot<'a>> {
    projects.iter().find_map(|project| {
        project
            .task_position(task_id)
            .map(|index| TaskSlot { project, index })
    })
}

fn project_slot<'a>(projects: &'a [Project], project_id: &str) -> Option<(usize, &'a Project)> {
    projects
        .iter()
        .enumerate()
        .find(|(_, p)| p.id == project_id)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Announcer {
    picked_up_from: Option<ProjectId>,
}

impl Announcer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Project the dragged task was picked up from.
    pub fn origin(&self) -> Option<&str> {
        self.picked_up_from.as_deref()
    }

    fn is_origin(&self, project: &Project) -> bool {
        self.picked_up_from.as_deref() == Some(project.id.as_str())
    }

    pub fn on_drag_start(&mut self, active: &DragEntry, projects: &[Project]) -> Option<String> {
        match active.data.as_ref() {
            Some(DragData::Project { project }) => {
                self.picked_up_from = None;
                let (index, project) = project_slot(projects, &project.id)?;
                Some(format!(
                    "Picked up Project {} at position: {} of {}",
                    project.title,
                    index + 1,
                    projects.len()
                ))
            }
            Some(DragData::Task { task }) => {
                let Some(slot) = task_slot(projects, &task.id) else {
                    self.picked_up_from = None;
                    return None;
                };
                self.picked_up_from = Some(slot.project.id.clone());
                Some(format!(
                    "Picked up Task {} at position: {} of {} in project {}",
                    slot.project.tasks[slot.index].title,
                    slot.position(),
                    slot.count(),
                    slot.project.title
                ))
            }
            None => {
                self.picked_up_from = None;
                None
            }
        }
    }

    pub fn on_drag_over(
        &self,
        active: &DragEntry,
        over: Option<&DragEntry>,
        projects: &[Project],
    ) -> Option<String> {
        match (active.data.as_ref()?, over?.data.as_ref()?) {
            (DragData::Project { project: active }, DragData::Project { project: over }) => {
                let (over_index, over) = project_slot(projects, &over.id)?;
                Some(format!(
                    "Project {} was moved over {} at position {} of {}",
                    active.title,
                    over.title,
                    over_index + 1,
                    projects.len()
                ))
            }
            (DragData::Task { task: active }, DragData::Task { task: over }) => {
                let slot = task_slot(projects, &over.id)?;
                if self.is_origin(slot.project) {
                    Some(format!(
                        "Task was moved over position {} of {} in project {}",
                        slot.position(),
                        slot.count(),
                        slot.project.title
                    ))
                } else {
                    Some(format!(
                        "Task {} was moved over project {} in position {} of {}",
                        active.title,
                        slot.project.title,
                        slot.position(),
                        slot.count()
                    ))
                }
            }
            _ => None,
        }
    }

    /// Ends the gesture; the origin is forgotten whatever the outcome.
    pub fn on_drag_end(
        &mut self,
        active: &DragEntry,
        over: Option<&DragEntry>,
        projects: &[Project],
    ) -> Option<String> {
        let announcement = self.drop_announcement(active, over, projects);
        self.picked_up_from = None;
        announcement
    }

    fn drop_announcement(
        &self,
        active: &DragEntry,
        over: Option<&DragEntry>,
        projects: &[Project],
    ) -> Option<String> {
        match (active.data.as_ref()?, over?.data.as_ref()?) {
            (DragData::Project { project: active }, DragData::Project { project: over }) => {
                let (over_index, _) = project_slot(projects, &over.id)?;
                Some(format!(
                    "Project {} was dropped into position {} of {}",
                    active.title,
                    over_index + 1,
                    projects.len()
                ))
            }
            (DragData::Task { .. }, DragData::Task { task: over }) => {
                let slot = task_slot(projects, &over.id)?;
                if self.is_origin(slot.project) {
                    Some(format!(
                        "Task was dropped into position {} of {} in project {}",
                        slot.position(),
                        slot.count(),
                        slot.project.title
                    ))
                } else {
                    Some(format!(
                        "Task was dropped into project {} in position {} of {}",
                        slot.project.title,
                        slot.position(),
                        slot.count()
                    ))
                }
            }
            _ => None,
        }
    }

    pub fn on_drag_cancel(&mut self, active: &DragEntry) -> Option<String> {
        self.picked_up_from = None;
        let kind: DragKind = active.kind()?;
        Some(format!("Dragging {} cancelled.", kind))
    }
}
