//! Task filtering implementations.
//!
//! Provides the TaskFilter trait and filter implementations for narrowing
//! the displayed tasks by status.

use crate::{Task, TaskStatus};

/// Trait for filtering tasks by various criteria.
pub trait TaskFilter {
    /// Returns true if the task matches the filter criteria.
    fn matches(&self, task: &Task) -> bool;
}

/// Filter tasks by status.
pub struct StatusFilter {
    status: TaskStatus,
}

impl StatusFilter {
    pub fn new(status: TaskStatus) -> Self {
        Self { status }
    }
}

impl TaskFilter for StatusFilter {
    fn matches(&self, task: &Task) -> bool {
        task.status == self.status
    }
}

/// Combine multiple filters with AND logic.
///
/// A task matches only if it passes all filters.
pub struct CompositeFilter {
    filters: Vec<Box<dyn TaskFilter>>,
}

impl CompositeFilter {
    /// Create an empty composite filter (matches all tasks).
    pub fn new() -> Self {
        Self { filters: vec![] }
    }

    /// Add a filter to the composite (builder pattern).
    pub fn with_filter(mut self, filter: Box<dyn TaskFilter>) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl Default for CompositeFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskFilter for CompositeFilter {
    fn matches(&self, task: &Task) -> bool {
        self.filters.iter().all(|f| f.matches(task))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(status: TaskStatus) -> Task {
        Task::new("p1".to_string(), "Task".to_string(), status, "u".to_string())
    }

    #[test]
    fn test_status_filter() {
        let filter = StatusFilter::new(TaskStatus::Todo);
        assert!(filter.matches(&task(TaskStatus::Todo)));
        assert!(!filter.matches(&task(TaskStatus::Done)));
    }

    #[test]
    fn test_composite_filter() {
        let t = task(TaskStatus::InProgress);

        // Empty composite matches all
        assert!(CompositeFilter::new().matches(&t));

        let composite =
            CompositeFilter::new().with_filter(Box::new(StatusFilter::new(TaskStatus::InProgress)));
        assert!(composite.matches(&t));

        let failing = CompositeFilter::new()
            .with_filter(Box::new(StatusFilter::new(TaskStatus::InProgress)))
            .with_filter(Box::new(StatusFilter::new(TaskStatus::Done)));
        assert!(!failing.matches(&t));
    }
}
