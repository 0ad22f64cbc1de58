use async_trait::async_trait;
use chrono::{DateTime, Utc};
use kanban_core::KanbanResult;
use kanban_domain::{Project, ProjectId, ProjectUpdate, Task, TaskStatus, TaskUpdate, UserId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::session::SessionSnapshot;

/// Metadata for persistence operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistenceMetadata {
    /// Version of the persistence format
    pub format_version: u32,
    /// ID of the instance that performed the save
    pub instance_id: Uuid,
    /// When this data was saved
    pub saved_at: DateTime<Utc>,
}

impl PersistenceMetadata {
    pub fn new(format_version: u32, instance_id: Uuid) -> Self {
        Self {
            format_version,
            instance_id,
            saved_at: Utc::now(),
        }
    }
}

/// Request to create a project on a board.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProject {
    pub title: String,
    pub description: Option<String>,
    pub board_id: String,
    pub acting_user_email: String,
}

/// Request to create a task in a project.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub project_id: ProjectId,
    pub title: String,
    pub acting_user_email: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub assignee_id: Option<UserId>,
    pub status: Option<TaskStatus>,
}

/// The document store holding boards, projects and tasks.
///
/// `Option`/`bool` results signal a rejection the store resolved normally
/// (unknown user, missing permission); `Err` signals the call itself failed.
#[async_trait]
pub trait BoardRemote: Send + Sync {
    /// Projects of a board in board order, with empty task lists.
    async fn fetch_projects(&self, board_id: &str) -> KanbanResult<Vec<Project>>;

    async fn fetch_tasks(&self, project_id: &str) -> KanbanResult<Vec<Task>>;

    async fn create_project(&self, project: NewProject) -> KanbanResult<Option<Project>>;

    async fn update_project(
        &self,
        project_id: &str,
        update: ProjectUpdate,
        acting_user_email: &str,
    ) -> KanbanResult<Option<Project>>;

    /// Deletes the project and all of its tasks.
    async fn delete_project(&self, project_id: &str, acting_user_email: &str) -> KanbanResult<bool>;

    async fn reorder_projects(
        &self,
        ordered_ids: Vec<ProjectId>,
        acting_user_email: &str,
    ) -> KanbanResult<bool>;

    async fn create_task(&self, task: NewTask) -> KanbanResult<Task>;

    async fn update_task(
        &self,
        task_id: &str,
        update: TaskUpdate,
        acting_user_email: &str,
    ) -> KanbanResult<Task>;

    async fn delete_task(&self, task_id: &str) -> KanbanResult<()>;

    /// Moves a task to another project after checking the caller may write
    /// to both.
    async fn move_task(
        &self,
        acting_user_email: &str,
        task_id: &str,
        target_project_id: &str,
    ) -> KanbanResult<Option<Task>>;
}

/// Storage for the board session between runs.
///
/// Implementations can be swapped for a no-op, an in-memory buffer or a
/// file on disk.
#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// Load the saved session, `None` if nothing was saved yet.
    async fn load(&self) -> KanbanResult<Option<SessionSnapshot>>;

    async fn save(&self, snapshot: &SessionSnapshot) -> KanbanResult<PersistenceMetadata>;

    async fn clear(&self) -> KanbanResult<()>;
}

/// Trait for serialization/deserialization strategies
pub trait Serializer<T: Send + Sync>: Send + Sync {
    /// Serialize data to bytes
    fn serialize(&self, data: &T) -> KanbanResult<Vec<u8>>;

    /// Deserialize data from bytes
    fn deserialize(&self, bytes: &[u8]) -> KanbanResult<T>;
}
