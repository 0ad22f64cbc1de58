use kanban_persistence::{SessionSnapshot, SessionStorage};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Drains queued session snapshots into a `SessionStorage`.
///
/// Snapshots that pile up while a save is in flight are coalesced: only the
/// newest one is written.
pub struct SessionSaver {
    storage: Arc<dyn SessionStorage>,
    rx: mpsc::UnboundedReceiver<SessionSnapshot>,
}

impl SessionSaver {
    pub fn new(storage: Arc<dyn SessionStorage>, rx: mpsc::UnboundedReceiver<SessionSnapshot>) -> Self {
        Self { storage, rx }
    }

    /// Runs until every sender is dropped. Returns the number of successful
    /// saves.
    pub async fn run(mut self) -> usize {
        let mut saved = 0;
        while let Some(mut snapshot) = self.rx.recv().await {
            while let Ok(newer) = self.rx.try_recv() {
                snapshot = newer;
            }
            match self.storage.save(&snapshot).await {
                Ok(_) => saved += 1,
                Err(e) => tracing::warn!("Failed to save session: {}", e),
            }
        }
        tracing::debug!("Session saver stopped after {} saves", saved);
        saved
    }

    pub fn spawn(self) -> JoinHandle<usize> {
        tokio::spawn(self.run())
    }
}
