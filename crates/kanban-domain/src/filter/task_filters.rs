//! Task filter configuration.
//!
//! `TaskFilters` holds what the board is filtered by. It is part of the
//! persisted session and never touches the underlying task lists.

use serde::{Deserialize, Serialize};

use super::task_filter::{CompositeFilter, StatusFilter, TaskFilter};
use crate::field_update::FieldUpdate;
use crate::search::{CompositeSearcher, TaskSearcher};
use crate::{Task, TaskStatus};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFilters {
    /// Only show tasks with this status.
    #[serde(default)]
    pub status: Option<TaskStatus>,
    /// Free-text search over title and description.
    #[serde(default)]
    pub search: Option<String>,
}

/// Partial change to `TaskFilters`; fields left as `NoChange` keep their value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterUpdate {
    pub status: FieldUpdate<TaskStatus>,
    pub search: FieldUpdate<String>,
}

impl FilterUpdate {
    pub fn status(status: Option<TaskStatus>) -> Self {
        Self {
            status: status.into(),
            ..Self::default()
        }
    }

    pub fn search(search: Option<String>) -> Self {
        Self {
            search: search.into(),
            ..Self::default()
        }
    }
}

impl TaskFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a partial update into these filters.
    pub fn merge(&self, update: FilterUpdate) -> Self {
        let mut next = self.clone();
        update.status.apply_to(&mut next.status);
        update.search.apply_to(&mut next.search);
        next
    }

    fn search_query(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
    }

    pub fn has_active_filters(&self) -> bool {
        self.status.is_some() || self.search_query().is_some()
    }

    pub fn clear(&mut self) {
        self.status = None;
        self.search = None;
    }

    /// Returns true if the task should be displayed.
    pub fn matches(&self, task: &Task) -> bool {
        let mut filter = CompositeFilter::new();
        if let Some(status) = self.status {
            filter = filter.with_filter(Box::new(StatusFilter::new(status)));
        }
        if !filter.matches(task) {
            return false;
        }
        match self.search_query() {
            Some(query) => CompositeSearcher::all(query).matches(task),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(title: &str, status: TaskStatus) -> Task {
        Task::new("p".to_string(), title.to_string(), status, "u".to_string())
    }

    #[test]
    fn test_default_has_no_active_filters() {
        assert!(!TaskFilters::default().has_active_filters());
    }

    #[test]
    fn test_blank_search_is_inactive() {
        let filters = TaskFilters {
            status: None,
            search: Some("   ".to_string()),
        };
        assert!(!filters.has_active_filters());
        assert!(filters.matches(&task("Anything", TaskStatus::Done)));
    }

    #[test]
    fn test_merge_keeps_untouched_fields() {
        let filters = TaskFilters::new()
            .merge(FilterUpdate::status(Some(TaskStatus::Todo)))
            .merge(FilterUpdate::search(Some("docs".to_string())));
        assert_eq!(filters.status, Some(TaskStatus::Todo));
        assert_eq!(filters.search.as_deref(), Some("docs"));

        let cleared = filters.merge(FilterUpdate::status(None));
        assert_eq!(cleared.status, None);
        assert_eq!(cleared.search.as_deref(), Some("docs"));
    }

    #[test]
    fn test_matches_status_and_search() {
        let filters = TaskFilters {
            status: Some(TaskStatus::Todo),
            search: Some("DOCS".to_string()),
        };
        assert!(filters.matches(&task("Write docs", TaskStatus::Todo)));
        assert!(!filters.matches(&task("Write docs", TaskStatus::Done)));
        assert!(!filters.matches(&task("Fix bug", TaskStatus::Todo)));
    }

    #[test]
    fn test_clear_filters() {
        let mut filters = TaskFilters {
            status: Some(TaskStatus::Done),
            search: Some("x".to_string()),
        };
        filters.clear();
        assert_eq!(filters, TaskFilters::default());
    }
}
