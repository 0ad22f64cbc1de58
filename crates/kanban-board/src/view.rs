//! Filtered view of the board.
//!
//! Stored tasks are never touched; the view is derived from the project list
//! and the active filters and recomputed only when one of them changes.

use crate::store::BoardState;
use kanban_domain::{Project, ProjectId, Task, TaskFilters};
use std::sync::Arc;

/// A project with the tasks that pass the current filters.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectView {
    pub project_id: ProjectId,
    pub title: String,
    pub description: Option<String>,
    pub tasks: Vec<Task>,
    /// Tasks in the project before filtering.
    pub total_tasks: usize,
}

impl ProjectView {
    pub fn from_project(project: &Project, filter: &TaskFilters) -> Self {
        Self {
            project_id: project.id.clone(),
            title: project.title.clone(),
            description: project.description.clone(),
            tasks: project
                .tasks
                .iter()
                .filter(|task| filter.matches(task))
                .cloned()
                .collect(),
            total_tasks: project.tasks.len(),
        }
    }

    pub fn hidden_tasks(&self) -> usize {
        self.total_tasks - self.tasks.len()
    }
}

pub fn filter_projects(projects: &[Project], filter: &TaskFilters) -> Vec<ProjectView> {
    projects
        .iter()
        .map(|project| ProjectView::from_project(project, filter))
        .collect()
}

/// Memoised `filter_projects`.
#[derive(Debug, Default)]
pub struct BoardView {
    source: Option<(Arc<Vec<Project>>, TaskFilters)>,
    projects: Arc<Vec<ProjectView>>,
    recomputed: usize,
}

impl BoardView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Views for `state`, reusing the previous result when neither the
    /// project list nor the filters changed.
    pub fn derive(&mut self, state: &BoardState) -> Arc<Vec<ProjectView>> {
        let fresh = match &self.source {
            Some((projects, filter)) => {
                Arc::ptr_eq(projects, &state.projects) && *filter == state.filter
            }
            None => false,
        };
        if !fresh {
            self.projects = Arc::new(filter_projects(&state.projects, &state.filter));
            self.source = Some((state.projects.clone(), state.filter.clone()));
            self.recomputed += 1;
        }
        self.projects.clone()
    }

    /// How many times the views were rebuilt.
    pub fn recompute_count(&self) -> usize {
        self.recomputed
    }
}
