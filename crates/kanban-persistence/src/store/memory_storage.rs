use crate::serialization::JsonSerializer;
use crate::session::{SessionSnapshot, SESSION_FORMAT_VERSION};
use crate::traits::{PersistenceMetadata, SessionStorage, Serializer};
use async_trait::async_trait;
use kanban_core::KanbanResult;
use std::sync::{Mutex, PoisonError};
use uuid::Uuid;

/// Discards every save and never has anything to load.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSessionStorage;

#[async_trait]
impl SessionStorage for NoopSessionStorage {
    async fn load(&self) -> KanbanResult<Option<SessionSnapshot>> {
        Ok(None)
    }

    async fn save(&self, _snapshot: &SessionSnapshot) -> KanbanResult<PersistenceMetadata> {
        Ok(PersistenceMetadata::new(SESSION_FORMAT_VERSION, Uuid::nil()))
    }

    async fn clear(&self) -> KanbanResult<()> {
        Ok(())
    }
}

/// Keeps the serialized session in memory, like browser local storage.
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    bytes: Mutex<Option<Vec<u8>>>,
    saves: Mutex<usize>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of saves performed so far.
    pub fn save_count(&self) -> usize {
        *self.saves.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Raw serialized contents, if anything was saved.
    pub fn raw(&self) -> Option<Vec<u8>> {
        self.bytes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl SessionStorage for MemorySessionStorage {
    async fn load(&self) -> KanbanResult<Option<SessionSnapshot>> {
        match self.raw() {
            Some(bytes) => Ok(Some(JsonSerializer.deserialize(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, snapshot: &SessionSnapshot) -> KanbanResult<PersistenceMetadata> {
        let bytes = JsonSerializer.serialize(snapshot)?;
        *self.bytes.lock().unwrap_or_else(PoisonError::into_inner) = Some(bytes);
        *self.saves.lock().unwrap_or_else(PoisonError::into_inner) += 1;
        Ok(PersistenceMetadata::new(SESSION_FORMAT_VERSION, Uuid::nil()))
    }

    async fn clear(&self) -> KanbanResult<()> {
        *self.bytes.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_storage_round_trip() {
        let storage = MemorySessionStorage::new();
        assert!(storage.load().await.unwrap().is_none());

        let snapshot = SessionSnapshot {
            board_id: Some("b".to_string()),
            ..SessionSnapshot::default()
        };
        storage.save(&snapshot).await.unwrap();
        assert_eq!(storage.save_count(), 1);
        assert_eq!(storage.load().await.unwrap(), Some(snapshot));

        storage.clear().await.unwrap();
        assert!(storage.raw().is_none());
    }

    #[tokio::test]
    async fn test_noop_storage_forgets() {
        let storage = NoopSessionStorage;
        storage.save(&SessionSnapshot::default()).await.unwrap();
        assert!(storage.load().await.unwrap().is_none());
    }
}
