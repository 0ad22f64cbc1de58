use kanban_core::{LogEntry, Loggable};

const DEFAULT_CAPACITY: usize = 50;

/// Polite live region: the queue of announcements read out by assistive
/// technology. Oldest entries are dropped once full.
#[derive(Debug, Clone)]
pub struct LiveRegion {
    entries: Vec<LogEntry>,
    capacity: usize,
}

impl LiveRegion {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn announce(&mut self, message: Option<String>) {
        if let Some(message) = message {
            tracing::trace!("Announcing: {}", message);
            self.add_log(message);
        }
    }

    pub fn latest(&self) -> Option<&str> {
        self.entries.last().map(|e| e.message.as_str())
    }

    pub fn messages(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.message.as_str()).collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for LiveRegion {
    fn default() -> Self {
        Self::new()
    }
}

impl Loggable for LiveRegion {
    fn add_log(&mut self, message: String) {
        if self.entries.len() == self.capacity {
            self.entries.remove(0);
        }
        self.entries.push(LogEntry::new(message));
    }

    fn get_logs(&self) -> &[LogEntry] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drops_oldest_when_full() {
        let mut region = LiveRegion::with_capacity(2);
        region.announce(Some("one".into()));
        region.announce(None);
        region.announce(Some("two".into()));
        region.announce(Some("three".into()));
        assert_eq!(region.messages(), vec!["two", "three"]);
        assert_eq!(region.get_logs().len(), 2);
        assert_eq!(region.latest(), Some("three"));
    }
}
