//! Task filtering functionality.
//!
//! Provides traits and implementations for filtering tasks by various criteria.

pub mod task_filter;
pub mod task_filters;

pub use task_filter::{CompositeFilter, StatusFilter, TaskFilter};
pub use task_filters::{FilterUpdate, TaskFilters};
