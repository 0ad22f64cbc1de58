use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::board::BoardId;
use crate::field_update::FieldUpdate;
use crate::task::{Task, TaskId};
use crate::user::UserId;

pub type ProjectId = String;

/// A project is a column on the board: a titled, ordered list of tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub board_id: BoardId,
    pub title: String,
    pub description: Option<String>,
    pub owner_id: UserId,
    #[serde(default)]
    pub member_ids: Vec<UserId>,
    /// Display order; index 0 is the top of the column.
    #[serde(default)]
    pub tasks: Vec<Task>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update applied to a project's editable fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectUpdate {
    pub title: Option<String>,
    pub description: FieldUpdate<String>,
}

impl Project {
    pub fn new(
        board_id: BoardId,
        title: String,
        description: Option<String>,
        owner_id: UserId,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: crate::new_id(),
            board_id,
            title,
            description,
            owner_id,
            member_ids: Vec::new(),
            tasks: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn update(&mut self, updates: ProjectUpdate) {
        if let Some(title) = updates.title {
            self.title = title;
        }
        updates.description.apply_to(&mut self.description);
        self.updated_at = Utc::now();
    }

    pub fn is_accessible_by(&self, user_id: &str) -> bool {
        self.owner_id == user_id || self.member_ids.iter().any(|m| m == user_id)
    }

    pub fn task_position(&self, task_id: &str) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == task_id)
    }

    pub fn contains_task(&self, task_id: &str) -> bool {
        self.task_position(task_id).is_some()
    }

    pub fn task_ids(&self) -> Vec<TaskId> {
        self.tasks.iter().map(|t| t.id.clone()).collect()
    }
}

/// Move the element at `from` to `to`, shifting the elements in between.
///
/// Out-of-range indices leave the slice order unchanged.
pub fn array_move<T: Clone>(items: &[T], from: usize, to: usize) -> Vec<T> {
    let mut moved = items.to_vec();
    if from >= moved.len() || to >= moved.len() {
        return moved;
    }
    let item = moved.remove(from);
    moved.insert(to, item);
    moved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskStatus;

    fn project() -> Project {
        Project::new(
            "board".to_string(),
            "Backlog".to_string(),
            Some("Everything else".to_string()),
            "owner".to_string(),
        )
    }

    #[test]
    fn test_update_title_keeps_description() {
        let mut p = project();
        p.update(ProjectUpdate {
            title: Some("Icebox".to_string()),
            description: FieldUpdate::NoChange,
        });
        assert_eq!(p.title, "Icebox");
        assert_eq!(p.description.as_deref(), Some("Everything else"));
    }

    #[test]
    fn test_update_clears_description() {
        let mut p = project();
        p.update(ProjectUpdate {
            title: None,
            description: FieldUpdate::Clear,
        });
        assert_eq!(p.title, "Backlog");
        assert_eq!(p.description, None);
    }

    #[test]
    fn test_task_position() {
        let mut p = project();
        let a = Task::new(p.id.clone(), "A".to_string(), TaskStatus::Todo, "u".to_string());
        let b = Task::new(p.id.clone(), "B".to_string(), TaskStatus::Done, "u".to_string());
        p.tasks = vec![a.clone(), b.clone()];
        assert_eq!(p.task_position(&b.id), Some(1));
        assert!(p.contains_task(&a.id));
        assert_eq!(p.task_position("missing"), None);
    }

    #[test]
    fn test_array_move_forward_and_back() {
        let items = vec!['a', 'b', 'c', 'd'];
        assert_eq!(array_move(&items, 0, 2), vec!['b', 'c', 'a', 'd']);
        assert_eq!(array_move(&items, 3, 0), vec!['d', 'a', 'b', 'c']);
        assert_eq!(array_move(&items, 1, 1), items);
    }

    #[test]
    fn test_array_move_out_of_range() {
        let items = vec![1, 2, 3];
        assert_eq!(array_move(&items, 5, 0), items);
        assert_eq!(array_move(&items, 0, 3), items);
    }
}
