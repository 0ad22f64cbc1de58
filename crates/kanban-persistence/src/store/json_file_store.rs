use crate::session::{SessionSnapshot, SESSION_FORMAT_VERSION};
use crate::store::atomic_writer::AtomicWriter;
use crate::store::memory_storage::NoopSessionStorage;
use crate::traits::{PersistenceMetadata, SessionStorage};
use kanban_core::{AppConfig, KanbanError, KanbanResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use uuid::Uuid;

/// JSON file-backed session storage
#[derive(Debug, Clone)]
pub struct JsonFileSessionStorage {
    path: PathBuf,
    instance_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
struct JsonEnvelope {
    version: u32,
    metadata: PersistenceMetadata,
    data: SessionSnapshot,
}

impl JsonFileSessionStorage {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            instance_id: Uuid::new_v4(),
        }
    }

    /// Create a storage with a fixed instance ID (useful for testing)
    pub fn with_instance_id(path: impl AsRef<Path>, instance_id: Uuid) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            instance_id,
        }
    }

    pub fn instance_id(&self) -> Uuid {
        self.instance_id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl SessionStorage for JsonFileSessionStorage {
    async fn load(&self) -> KanbanResult<Option<SessionSnapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let file_bytes = AtomicWriter::read_all(&self.path).await?;
        let envelope: JsonEnvelope = serde_json::from_slice(&file_bytes)
            .map_err(|e| KanbanError::Serialization(e.to_string()))?;

        if envelope.version != SESSION_FORMAT_VERSION {
            return Err(KanbanError::Serialization(format!(
                "Unsupported session format version: {}",
                envelope.version
            )));
        }

        tracing::info!(
            "Loaded session ({} projects) from {}",
            envelope.data.projects.len(),
            self.path.display()
        );
        Ok(Some(envelope.data))
    }

    async fn save(&self, snapshot: &SessionSnapshot) -> KanbanResult<PersistenceMetadata> {
        let metadata = PersistenceMetadata::new(SESSION_FORMAT_VERSION, self.instance_id);
        let envelope = JsonEnvelope {
            version: SESSION_FORMAT_VERSION,
            metadata: metadata.clone(),
            data: snapshot.clone(),
        };

        let json_bytes = serde_json::to_vec_pretty(&envelope)
            .map_err(|e| KanbanError::Serialization(e.to_string()))?;
        AtomicWriter::write_atomic(&self.path, &json_bytes).await?;

        tracing::debug!(
            "Saved session ({} bytes) to {}",
            json_bytes.len(),
            self.path.display()
        );
        Ok(metadata)
    }

    async fn clear(&self) -> KanbanResult<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Pick the session storage described by the configuration.
pub fn session_storage_from_config(config: &AppConfig) -> Arc<dyn SessionStorage> {
    match config.effective_session_file() {
        Some(path) if config.persist_session => Arc::new(JsonFileSessionStorage::new(path)),
        _ => Arc::new(NoopSessionStorage),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kanban_domain::{Project, TaskFilters, TaskStatus};
    use tempfile::tempdir;

    fn snapshot() -> SessionSnapshot {
        SessionSnapshot {
            board_id: Some("board-1".to_string()),
            acting_user: Some("alice@example.com".to_string()),
            filter: TaskFilters {
                status: Some(TaskStatus::Done),
                search: Some("release".to_string()),
            },
            projects: vec![Project::new(
                "board-1".to_string(),
                "Launch".to_string(),
                None,
                "alice".to_string(),
            )],
        }
    }

    #[tokio::test]
    async fn test_load_missing_file_is_none() {
        let dir = tempdir().unwrap();
        let storage = JsonFileSessionStorage::new(dir.path().join("session.json"));
        assert!(storage.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let instance_id = Uuid::new_v4();
        let storage =
            JsonFileSessionStorage::with_instance_id(dir.path().join("session.json"), instance_id);

        let metadata = storage.save(&snapshot()).await.unwrap();
        assert_eq!(metadata.format_version, SESSION_FORMAT_VERSION);
        assert_eq!(metadata.instance_id, instance_id);

        let loaded = storage.load().await.unwrap().unwrap();
        assert_eq!(loaded, snapshot());
    }

    #[tokio::test]
    async fn test_rejects_unknown_version() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        let body = serde_json::json!({
            "version": 99,
            "metadata": PersistenceMetadata::new(99, Uuid::new_v4()),
            "data": {}
        });
        std::fs::write(&path, serde_json::to_vec(&body).unwrap()).unwrap();

        let err = JsonFileSessionStorage::new(&path).load().await.unwrap_err();
        assert!(matches!(err, KanbanError::Serialization(_)));
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let dir = tempdir().unwrap();
        let storage = JsonFileSessionStorage::new(dir.path().join("session.json"));
        storage.save(&snapshot()).await.unwrap();
        storage.clear().await.unwrap();
        storage.clear().await.unwrap();
        assert!(storage.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_storage_from_config() {
        let dir = tempdir().unwrap();
        let config = AppConfig {
            session_file: Some(dir.path().join("from-config.json")),
            ..AppConfig::default()
        };
        let storage = session_storage_from_config(&config);
        storage.save(&snapshot()).await.unwrap();
        assert!(dir.path().join("from-config.json").exists());

        let disabled = AppConfig {
            persist_session: false,
            ..config
        };
        let noop = session_storage_from_config(&disabled);
        assert!(noop.load().await.unwrap().is_none());
    }
}
