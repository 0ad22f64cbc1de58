//! Drag-and-drop metadata.
//!
//! Every draggable element on the board carries a `DragData` payload tagged
//! with its kind. Elements without a recognised payload are not draggable and
//! all drag handlers ignore them.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::project::{Project, ProjectId};
use crate::task::Task;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    Project,
    Task,
}

impl DragKind {
    /// Parse a metadata tag. `Container` and `Item` are accepted as synonyms.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "Project" | "Container" => Some(Self::Project),
            "Task" | "Item" => Some(Self::Task),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Project => "Project",
            Self::Task => "Task",
        }
    }
}

impl fmt::Display for DragKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Payload attached to a draggable element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DragData {
    Project { project: Project },
    Task { task: Task },
}

impl DragData {
    /// Decode raw element metadata. Unknown tags and malformed payloads
    /// yield `None`.
    pub fn from_metadata(value: &Value) -> Option<Self> {
        let tag = value.get("type")?.as_str()?;
        match DragKind::from_tag(tag)? {
            DragKind::Project => {
                let project = serde_json::from_value(value.get("project")?.clone()).ok()?;
                Some(Self::Project { project })
            }
            DragKind::Task => {
                let task = serde_json::from_value(value.get("task")?.clone()).ok()?;
                Some(Self::Task { task })
            }
        }
    }

    pub fn kind(&self) -> DragKind {
        match self {
            Self::Project { .. } => DragKind::Project,
            Self::Task { .. } => DragKind::Task,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Project { project } => &project.id,
            Self::Task { task } => &task.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Project { project } => &project.title,
            Self::Task { task } => &task.title,
        }
    }
}

/// The active or hovered element of a drag callback.
#[derive(Debug, Clone, PartialEq)]
pub struct DragEntry {
    pub id: String,
    pub data: Option<DragData>,
}

impl DragEntry {
    pub fn project(project: &Project) -> Self {
        Self {
            id: project.id.clone(),
            data: Some(DragData::Project {
                project: project.clone(),
            }),
        }
    }

    pub fn task(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            data: Some(DragData::Task { task: task.clone() }),
        }
    }

    pub fn untagged(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            data: None,
        }
    }

    pub fn from_metadata(id: impl Into<String>, metadata: &Value) -> Self {
        Self {
            id: id.into(),
            data: DragData::from_metadata(metadata),
        }
    }

    pub fn kind(&self) -> Option<DragKind> {
        self.data.as_ref().map(DragData::kind)
    }
}

/// The entity lifted by the current drag gesture, with the facts derived at
/// pick-up time.
#[derive(Debug, Clone, PartialEq)]
pub enum DragSubject {
    Project {
        project: Project,
        index: usize,
    },
    Task {
        task: Task,
        index: usize,
        origin_project_id: ProjectId,
    },
}

impl DragSubject {
    /// Resolve a payload against the current project list. Returns `None`
    /// when the entity is no longer on the board.
    pub fn resolve(data: &DragData, projects: &[Project]) -> Option<Self> {
        match data {
            DragData::Project { project } => {
                let index = projects.iter().position(|p| p.id == project.id)?;
                Some(Self::Project {
                    project: projects[index].clone(),
                    index,
                })
            }
            DragData::Task { task } => projects.iter().find_map(|p| {
                p.task_position(&task.id).map(|index| Self::Task {
                    task: p.tasks[index].clone(),
                    index,
                    origin_project_id: p.id.clone(),
                })
            }),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Project { project, .. } => &project.id,
            Self::Task { task, .. } => &task.id,
        }
    }

    pub fn kind(&self) -> DragKind {
        match self {
            Self::Project { .. } => DragKind::Project,
            Self::Task { .. } => DragKind::Task,
        }
    }
}
