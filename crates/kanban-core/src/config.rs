use crate::{KanbanError, KanbanResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where the board session is stored between runs.
    #[serde(default)]
    pub session_file: Option<PathBuf>,
    /// `tracing` filter directive, e.g. `kanban_board=debug`.
    #[serde(default)]
    pub log_filter: Option<String>,
    #[serde(default = "default_persist_session")]
    pub persist_session: bool,
}

fn default_persist_session() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            session_file: None,
            log_filter: None,
            persist_session: default_persist_session(),
        }
    }
}

impl AppConfig {
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::home_dir().map(|home| home.join(".config/kanban/config.toml"))
        }
        #[cfg(target_os = "linux")]
        {
            dirs::config_dir().map(|config| config.join("kanban/config.toml"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|config| config.join("kanban\\config.toml"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }

    pub fn load() -> Self {
        if let Some(config_path) = Self::config_path() {
            if config_path.exists() {
                if let Ok(content) = std::fs::read_to_string(&config_path) {
                    if let Ok(config) = Self::from_toml_str(&content) {
                        return config;
                    }
                    tracing::warn!("Ignoring malformed config at {}", config_path.display());
                }
            }
        }
        Self::default()
    }

    pub fn from_toml_str(content: &str) -> KanbanResult<Self> {
        toml::from_str(content).map_err(|e| KanbanError::Validation(e.to_string()))
    }

    pub fn effective_session_file(&self) -> Option<PathBuf> {
        self.session_file
            .clone()
            .or_else(|| dirs::data_dir().map(|data| data.join("kanban").join("session.json")))
    }

    pub fn effective_log_filter(&self) -> String {
        self.log_filter
            .clone()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| "warn".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert!(config.persist_session);
        assert!(config.session_file.is_none());
    }

    #[test]
    fn test_from_toml_str() {
        let config = AppConfig::from_toml_str(
            r#"
            session_file = "/tmp/kanban-session.json"
            log_filter = "kanban_board=debug"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.effective_session_file(),
            Some(PathBuf::from("/tmp/kanban-session.json"))
        );
        assert_eq!(config.effective_log_filter(), "kanban_board=debug");
        assert!(config.persist_session);
    }

    #[test]
    fn test_persist_session_can_be_disabled() {
        let config = AppConfig::from_toml_str("persist_session = false").unwrap();
        assert!(!config.persist_session);
    }

    #[test]
    fn test_malformed_toml_is_validation_error() {
        let err = AppConfig::from_toml_str("persist_session = \"maybe\"").unwrap_err();
        assert!(matches!(err, KanbanError::Validation(_)));
    }
}
