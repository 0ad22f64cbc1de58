use crate::AppConfig;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

impl LogEntry {
    pub fn new(message: String) -> Self {
        Self {
            timestamp: Utc::now(),
            message,
        }
    }
}

pub trait Loggable {
    fn add_log(&mut self, message: String);
    fn get_logs(&self) -> &[LogEntry];
}

/// Install the stderr subscriber. Returns false if one was already installed.
pub fn init_tracing(config: &AppConfig) -> bool {
    let filter = EnvFilter::try_new(config.effective_log_filter())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_is_idempotent() {
        let config = AppConfig {
            log_filter: Some("debug".to_string()),
            ..AppConfig::default()
        };
        init_tracing(&config);
        assert!(!init_tracing(&config));
    }

    #[test]
    fn test_log_entry_timestamped() {
        let before = Utc::now();
        let entry = LogEntry::new("Picked up".to_string());
        assert!(entry.timestamp >= before);
        assert_eq!(entry.message, "Picked up");
    }
}
