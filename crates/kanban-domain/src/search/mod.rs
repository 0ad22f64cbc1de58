//! Task search functionality.
//!
//! Provides traits and implementations for free-text search over tasks.

use crate::Task;

/// Trait for searching tasks by various criteria.
pub trait TaskSearcher {
    /// Returns true if the task matches the search criteria.
    fn matches(&self, task: &Task) -> bool;
}

/// Search tasks by title (case-insensitive).
pub struct TitleSearcher {
    query: String,
}

impl TitleSearcher {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into().to_lowercase(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

impl TaskSearcher for TitleSearcher {
    fn matches(&self, task: &Task) -> bool {
        if self.query.is_empty() {
            return true;
        }
        task.title.to_lowercase().contains(&self.query)
    }
}

/// Search tasks by description (case-insensitive). Tasks without a
/// description never match a non-empty query.
pub struct DescriptionSearcher {
    query: String,
}

impl DescriptionSearcher {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into().to_lowercase(),
        }
    }
}

impl TaskSearcher for DescriptionSearcher {
    fn matches(&self, task: &Task) -> bool {
        if self.query.is_empty() {
            return true;
        }
        task.description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(&self.query))
    }
}

/// Enum dispatch for searching tasks by a specific field.
pub enum SearchBy {
    Title(TitleSearcher),
    Description(DescriptionSearcher),
}

impl SearchBy {
    fn matches(&self, task: &Task) -> bool {
        match self {
            Self::Title(s) => s.matches(task),
            Self::Description(s) => s.matches(task),
        }
    }
}

/// Composite searcher that matches if any sub-searcher matches.
pub struct CompositeSearcher {
    searchers: Vec<SearchBy>,
}

impl CompositeSearcher {
    /// Create an empty composite searcher (matches all tasks).
    pub fn new() -> Self {
        Self {
            searchers: Vec::new(),
        }
    }

    /// Title and description searchers for the same query.
    pub fn all(query: impl Into<String>) -> Self {
        let query = query.into();
        Self {
            searchers: vec![
                SearchBy::Title(TitleSearcher::new(query.clone())),
                SearchBy::Description(DescriptionSearcher::new(query)),
            ],
        }
    }

    pub fn with_search(mut self, searcher: SearchBy) -> Self {
        self.searchers.push(searcher);
        self
    }
}

impl Default for CompositeSearcher {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskSearcher for CompositeSearcher {
    fn matches(&self, task: &Task) -> bool {
        if self.searchers.is_empty() {
            return true;
        }
        self.searchers.iter().any(|searcher| searcher.matches(task))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TaskStatus;

    fn task(title: &str, description: Option<&str>) -> Task {
        let mut task = Task::new("p".to_string(), title.to_string(), TaskStatus::Todo, "u".to_string());
        task.description = description.map(str::to_string);
        task
    }

    #[test]
    fn test_title_searcher_matches() {
        let t = task("Fix authentication bug", None);
        assert!(TitleSearcher::new("auth").matches(&t));
        assert!(TitleSearcher::new("AUTH").matches(&t)); // case insensitive
        assert!(!TitleSearcher::new("database").matches(&t));
        assert_eq!(TitleSearcher::new("AuTh").query(), "auth");
    }

    #[test]
    fn test_description_searcher() {
        let t = task("Login", Some("Rotate the OAuth secrets"));
        assert!(DescriptionSearcher::new("oauth").matches(&t));
        assert!(!DescriptionSearcher::new("oauth").matches(&task("Login", None)));
        assert!(DescriptionSearcher::new("").matches(&task("Login", None)));
    }

    #[test]
    fn test_composite_searcher_any_match() {
        let t = task("Login", Some("Rotate the OAuth secrets"));
        assert!(CompositeSearcher::all("login").matches(&t));
        assert!(CompositeSearcher::all("secrets").matches(&t));
        assert!(!CompositeSearcher::all("billing").matches(&t));
    }

    #[test]
    fn test_composite_searcher_empty() {
        let t = task("Any task", None);
        assert!(CompositeSearcher::new().matches(&t));
        assert!(CompositeSearcher::new()
            .with_search(SearchBy::Title(TitleSearcher::new("any")))
            .matches(&t));
    }
}
