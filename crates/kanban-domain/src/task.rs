use chrono::{DateTime, Utc};
use kanban_core::KanbanError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::field_update::FieldUpdate;
use crate::project::ProjectId;
use crate::user::UserId;

pub type TaskId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "TODO",
            Self::InProgress => "IN_PROGRESS",
            Self::Done => "DONE",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = KanbanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "todo" => Ok(Self::Todo),
            "inprogress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            _ => Err(KanbanError::Validation(format!("unknown task status '{}'", s))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub project_id: ProjectId,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub due_date: Option<DateTime<Utc>>,
    pub assignee_id: Option<UserId>,
    pub created_by: UserId,
    pub last_modified_by: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update for a task. `title` and `status` are always sent by the
/// edit form; the optional fields follow `FieldUpdate` semantics.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskUpdate {
    pub title: String,
    pub status: Option<TaskStatus>,
    pub description: FieldUpdate<String>,
    pub due_date: FieldUpdate<DateTime<Utc>>,
    pub assignee_id: FieldUpdate<UserId>,
}

impl TaskUpdate {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            status: None,
            description: FieldUpdate::NoChange,
            due_date: FieldUpdate::NoChange,
            assignee_id: FieldUpdate::NoChange,
        }
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_description(mut self, description: FieldUpdate<String>) -> Self {
        self.description = description;
        self
    }
}

impl Task {
    pub fn new(project_id: ProjectId, title: String, status: TaskStatus, creator: UserId) -> Self {
        let now = Utc::now();
        Self {
            id: crate::new_id(),
            project_id,
            title,
            description: None,
            status,
            due_date: None,
            assignee_id: None,
            last_modified_by: creator.clone(),
            created_by: creator,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn update(&mut self, updates: TaskUpdate, modified_by: UserId) {
        self.title = updates.title;
        if let Some(status) = updates.status {
            self.status = status;
        }
        updates.description.apply_to(&mut self.description);
        updates.due_date.apply_to(&mut self.due_date);
        updates.assignee_id.apply_to(&mut self.assignee_id);
        self.last_modified_by = modified_by;
        self.updated_at = Utc::now();
    }

    pub fn move_to_project(&mut self, project_id: ProjectId, modified_by: UserId) {
        self.project_id = project_id;
        self.last_modified_by = modified_by;
        self.updated_at = Utc::now();
    }
}
