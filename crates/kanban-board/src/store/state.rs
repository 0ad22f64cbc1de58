use kanban_domain::{BoardId, Project, ProjectId, Task, TaskFilters};
use kanban_persistence::SessionSnapshot;
use std::sync::Arc;

/// Snapshot of the board as the UI sees it.
///
/// Never mutated in place: every store operation builds a new `BoardState`
/// and swaps it in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardState {
    pub board_id: Option<BoardId>,
    /// Email of the signed-in user; sent with every write.
    pub acting_user: Option<String>,
    pub projects: Arc<Vec<Project>>,
    pub is_loading: bool,
    pub filter: TaskFilters,
}

impl BoardState {
    pub fn from_session(session: SessionSnapshot) -> Self {
        Self {
            board_id: session.board_id,
            acting_user: session.acting_user,
            projects: Arc::new(session.projects),
            is_loading: false,
            filter: session.filter,
        }
    }

    pub fn to_session(&self) -> SessionSnapshot {
        SessionSnapshot {
            board_id: self.board_id.clone(),
            acting_user: self.acting_user.clone(),
            filter: self.filter.clone(),
            projects: self.projects.as_ref().clone(),
        }
    }

    pub fn with_projects(&self, projects: Vec<Project>) -> Self {
        Self {
            projects: Arc::new(projects),
            ..self.clone()
        }
    }

    pub fn project(&self, project_id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == project_id)
    }

    pub fn project_index(&self, project_id: &str) -> Option<usize> {
        self.projects.iter().position(|p| p.id == project_id)
    }

    pub fn project_ids(&self) -> Vec<ProjectId> {
        self.projects.iter().map(|p| p.id.clone()).collect()
    }

    /// (project index, task index) of a task, scanning every project.
    pub fn locate_task(&self, task_id: &str) -> Option<(usize, usize)> {
        self.projects
            .iter()
            .enumerate()
            .find_map(|(pi, p)| p.task_position(task_id).map(|ti| (pi, ti)))
    }

    /// The project currently holding a task.
    pub fn project_of_task(&self, task_id: &str) -> Option<&Project> {
        self.locate_task(task_id).map(|(pi, _)| &self.projects[pi])
    }

    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.locate_task(task_id)
            .map(|(pi, ti)| &self.projects[pi].tasks[ti])
    }

    pub fn task_count(&self) -> usize {
        self.projects.iter().map(|p| p.tasks.len()).sum()
    }
}
