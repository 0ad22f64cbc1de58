//! In-memory document store implementing `BoardRemote`.
//!
//! Used for local-only boards and as the backing store in tests. Failures
//! can be injected through `FailurePlan`, and every call is recorded so
//! callers can assert on what reached the store.

use async_trait::async_trait;
use kanban_core::{KanbanError, KanbanResult};
use kanban_domain::{
    Board, BoardId, Project, ProjectId, ProjectUpdate, Task, TaskId, TaskStatus, TaskUpdate, User,
};
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::traits::{BoardRemote, NewProject, NewTask};

/// Failures to inject into subsequent calls.
#[derive(Debug, Clone, Default)]
pub struct FailurePlan {
    /// `fetch_projects` returns an error.
    pub fail_fetch_projects: bool,
    /// `fetch_tasks` returns an error for these projects.
    pub fail_fetch_tasks: HashSet<ProjectId>,
    /// `reorder_projects` resolves to `false`.
    pub reject_reorder: bool,
    /// `move_task` resolves to `None`.
    pub reject_moves: bool,
    /// Create, update and delete calls return an error.
    pub fail_writes: bool,
}

/// A call that reached the store.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteCall {
    FetchProjects(BoardId),
    FetchTasks(ProjectId),
    CreateProject(NewProject),
    UpdateProject {
        project_id: ProjectId,
        acting_user_email: String,
    },
    DeleteProject {
        project_id: ProjectId,
        acting_user_email: String,
    },
    ReorderProjects {
        ordered_ids: Vec<ProjectId>,
        acting_user_email: String,
    },
    CreateTask(NewTask),
    UpdateTask {
        task_id: TaskId,
        acting_user_email: String,
    },
    DeleteTask(TaskId),
    MoveTask {
        acting_user_email: String,
        task_id: TaskId,
        target_project_id: ProjectId,
    },
}

#[derive(Debug, Default)]
struct RemoteData {
    users: Vec<User>,
    boards: Vec<Board>,
    /// Board order is the order of appearance.
    projects: Vec<Project>,
    /// Per-project order is the order of appearance.
    tasks: Vec<Task>,
}

impl RemoteData {
    fn user_by_email(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|u| u.email == email)
    }

    fn project(&self, project_id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == project_id)
    }

    fn can_write_project(&self, email: &str, project_id: &str) -> bool {
        match (self.user_by_email(email), self.project(project_id)) {
            (Some(user), Some(project)) => project.is_accessible_by(&user.id),
            _ => false,
        }
    }
}

#[derive(Debug, Default)]
pub struct InMemoryRemote {
    data: Mutex<RemoteData>,
    failures: Mutex<FailurePlan>,
    calls: Mutex<Vec<RemoteCall>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl InMemoryRemote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, email: &str, name: Option<&str>) -> User {
        let user = User::new(email, name.map(str::to_string));
        lock(&self.data).users.push(user.clone());
        user
    }

    pub fn add_board(&self, title: &str, owner: &User) -> Board {
        let board = Board::new(title.to_string(), None, owner.id.clone());
        lock(&self.data).boards.push(board.clone());
        board
    }

    /// Let `user` create projects on a board.
    pub fn share_board(&self, board_id: &str, user: &User) -> KanbanResult<()> {
        let mut data = lock(&self.data);
        let board = data
            .boards
            .iter_mut()
            .find(|b| b.id == board_id)
            .ok_or_else(|| KanbanError::NotFound(format!("board {}", board_id)))?;
        board.add_member(user.id.clone());
        Ok(())
    }

    /// Store a project as-is, appending it to its board. Nested tasks are
    /// stored too.
    pub fn insert_project(&self, mut project: Project) {
        let tasks = std::mem::take(&mut project.tasks);
        let mut data = lock(&self.data);
        data.projects.push(project);
        data.tasks.extend(tasks);
    }

    pub fn insert_task(&self, task: Task) {
        lock(&self.data).tasks.push(task);
    }

    pub fn set_failures(&self, plan: FailurePlan) {
        *lock(&self.failures) = plan;
    }

    pub fn update_failures(&self, f: impl FnOnce(&mut FailurePlan)) {
        f(&mut lock(&self.failures));
    }

    pub fn calls(&self) -> Vec<RemoteCall> {
        lock(&self.calls).clone()
    }

    pub fn clear_calls(&self) {
        lock(&self.calls).clear();
    }

    pub fn project(&self, project_id: &str) -> Option<Project> {
        lock(&self.data).project(project_id).cloned()
    }

    pub fn task(&self, task_id: &str) -> Option<Task> {
        lock(&self.data).tasks.iter().find(|t| t.id == task_id).cloned()
    }

    /// Project ids of a board in stored order.
    pub fn project_order(&self, board_id: &str) -> Vec<ProjectId> {
        lock(&self.data)
            .projects
            .iter()
            .filter(|p| p.board_id == board_id)
            .map(|p| p.id.clone())
            .collect()
    }

    fn record(&self, call: RemoteCall) {
        lock(&self.calls).push(call);
    }

    fn failures(&self) -> FailurePlan {
        lock(&self.failures).clone()
    }

    fn check_writes(&self, operation: &str) -> KanbanResult<()> {
        if self.failures().fail_writes {
            return Err(KanbanError::Remote(format!("{} failed", operation)));
        }
        Ok(())
    }
}

#[async_trait]
impl BoardRemote for InMemoryRemote {
    async fn fetch_projects(&self, board_id: &str) -> KanbanResult<Vec<Project>> {
        self.record(RemoteCall::FetchProjects(board_id.to_string()));
        if self.failures().fail_fetch_projects {
            return Err(KanbanError::Remote(format!(
                "fetching projects for board {} failed",
                board_id
            )));
        }
        Ok(lock(&self.data)
            .projects
            .iter()
            .filter(|p| p.board_id == board_id)
            .cloned()
            .collect())
    }

    async fn fetch_tasks(&self, project_id: &str) -> KanbanResult<Vec<Task>> {
        self.record(RemoteCall::FetchTasks(project_id.to_string()));
        if self.failures().fail_fetch_tasks.contains(project_id) {
            return Err(KanbanError::Remote(format!(
                "fetching tasks for project {} failed",
                project_id
            )));
        }
        Ok(lock(&self.data)
            .tasks
            .iter()
            .filter(|t| t.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn create_project(&self, request: NewProject) -> KanbanResult<Option<Project>> {
        self.record(RemoteCall::CreateProject(request.clone()));
        self.check_writes("create project")?;

        let mut data = lock(&self.data);
        let Some(user) = data.user_by_email(&request.acting_user_email).cloned() else {
            return Ok(None);
        };
        let Some(board) = data.boards.iter().find(|b| b.id == request.board_id) else {
            return Ok(None);
        };
        if !board.is_accessible_by(&user.id) {
            return Ok(None);
        }

        let project = Project::new(
            request.board_id,
            request.title,
            request.description,
            user.id,
        );
        data.projects.push(project.clone());
        Ok(Some(project))
    }

    async fn update_project(
        &self,
        project_id: &str,
        update: ProjectUpdate,
        acting_user_email: &str,
    ) -> KanbanResult<Option<Project>> {
        self.record(RemoteCall::UpdateProject {
            project_id: project_id.to_string(),
            acting_user_email: acting_user_email.to_string(),
        });
        self.check_writes("update project")?;

        let mut data = lock(&self.data);
        if !data.can_write_project(acting_user_email, project_id) {
            return Ok(None);
        }
        let Some(project) = data.projects.iter_mut().find(|p| p.id == project_id) else {
            return Ok(None);
        };
        project.update(update);
        Ok(Some(project.clone()))
    }

    async fn delete_project(&self, project_id: &str, acting_user_email: &str) -> KanbanResult<bool> {
        self.record(RemoteCall::DeleteProject {
            project_id: project_id.to_string(),
            acting_user_email: acting_user_email.to_string(),
        });
        self.check_writes("delete project")?;

        let mut data = lock(&self.data);
        if !data.can_write_project(acting_user_email, project_id) {
            return Ok(false);
        }
        data.projects.retain(|p| p.id != project_id);
        data.tasks.retain(|t| t.project_id != project_id);
        Ok(true)
    }

    async fn reorder_projects(
        &self,
        ordered_ids: Vec<ProjectId>,
        acting_user_email: &str,
    ) -> KanbanResult<bool> {
        self.record(RemoteCall::ReorderProjects {
            ordered_ids: ordered_ids.clone(),
            acting_user_email: acting_user_email.to_string(),
        });
        if self.failures().reject_reorder {
            return Ok(false);
        }

        let mut data = lock(&self.data);
        if data.user_by_email(acting_user_email).is_none()
            || ordered_ids.iter().any(|id| data.project(id).is_none())
        {
            return Ok(false);
        }

        // Reordered projects take the slots the listed projects occupied
        let slots: Vec<usize> = data
            .projects
            .iter()
            .enumerate()
            .filter(|(_, p)| ordered_ids.contains(&p.id))
            .map(|(i, _)| i)
            .collect();
        let reordered: Vec<Project> = ordered_ids
            .iter()
            .filter_map(|id| data.project(id).cloned())
            .collect();
        for (slot, project) in slots.into_iter().zip(reordered) {
            data.projects[slot] = project;
        }
        Ok(true)
    }

    async fn create_task(&self, request: NewTask) -> KanbanResult<Task> {
        self.record(RemoteCall::CreateTask(request.clone()));
        self.check_writes("create task")?;

        let mut data = lock(&self.data);
        let user = data
            .user_by_email(&request.acting_user_email)
            .cloned()
            .ok_or_else(|| KanbanError::PermissionDenied(request.acting_user_email.clone()))?;
        if data.project(&request.project_id).is_none() {
            return Err(KanbanError::NotFound(format!("project {}", request.project_id)));
        }

        let mut task = Task::new(
            request.project_id,
            request.title,
            request.status.unwrap_or(TaskStatus::Todo),
            user.id,
        );
        task.description = request.description;
        task.due_date = request.due_date;
        task.assignee_id = request.assignee_id;
        data.tasks.push(task.clone());
        Ok(task)
    }

    async fn update_task(
        &self,
        task_id: &str,
        update: TaskUpdate,
        acting_user_email: &str,
    ) -> KanbanResult<Task> {
        self.record(RemoteCall::UpdateTask {
            task_id: task_id.to_string(),
            acting_user_email: acting_user_email.to_string(),
        });
        self.check_writes("update task")?;

        let mut data = lock(&self.data);
        let user = data
            .user_by_email(acting_user_email)
            .cloned()
            .ok_or_else(|| KanbanError::PermissionDenied(acting_user_email.to_string()))?;
        let task = data
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| KanbanError::NotFound(format!("task {}", task_id)))?;
        task.update(update, user.id);
        Ok(task.clone())
    }

    async fn delete_task(&self, task_id: &str) -> KanbanResult<()> {
        self.record(RemoteCall::DeleteTask(task_id.to_string()));
        self.check_writes("delete task")?;

        let mut data = lock(&self.data);
        let before = data.tasks.len();
        data.tasks.retain(|t| t.id != task_id);
        if data.tasks.len() == before {
            return Err(KanbanError::NotFound(format!("task {}", task_id)));
        }
        Ok(())
    }

    async fn move_task(
        &self,
        acting_user_email: &str,
        task_id: &str,
        target_project_id: &str,
    ) -> KanbanResult<Option<Task>> {
        self.record(RemoteCall::MoveTask {
            acting_user_email: acting_user_email.to_string(),
            task_id: task_id.to_string(),
            target_project_id: target_project_id.to_string(),
        });
        if self.failures().reject_moves {
            return Ok(None);
        }

        let mut data = lock(&self.data);
        let Some(source_id) = data
            .tasks
            .iter()
            .find(|t| t.id == task_id)
            .map(|t| t.project_id.clone())
        else {
            return Ok(None);
        };
        if !data.can_write_project(acting_user_email, &source_id)
            || !data.can_write_project(acting_user_email, target_project_id)
        {
            return Ok(None);
        }
        let Some(user_id) = data.user_by_email(acting_user_email).map(|u| u.id.clone()) else {
            return Ok(None);
        };

        // Moved tasks go to the end of the target project
        let Some(index) = data.tasks.iter().position(|t| t.id == task_id) else {
            return Ok(None);
        };
        let mut task = data.tasks.remove(index);
        task.move_to_project(target_project_id.to_string(), user_id);
        data.tasks.push(task.clone());
        Ok(Some(task))
    }
}
