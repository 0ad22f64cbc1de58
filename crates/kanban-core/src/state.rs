//! Injectable state container.
//!
//! `StateCell` holds an immutable snapshot behind an `Arc` and replaces it
//! wholesale on every update, so a reader holding a snapshot never observes a
//! half-applied mutation. Subscribers are notified through a tokio `watch`
//! channel.

use std::sync::Arc;
use tokio::sync::watch;

#[derive(Debug)]
pub struct StateCell<S> {
    tx: watch::Sender<Arc<S>>,
}

impl<S> StateCell<S> {
    pub fn new(initial: S) -> Self {
        let (tx, _rx) = watch::channel(Arc::new(initial));
        Self { tx }
    }

    /// Current snapshot.
    pub fn get(&self) -> Arc<S> {
        self.tx.borrow().clone()
    }

    /// Derive the next snapshot from the current one.
    ///
    /// Returning `None` leaves the state untouched and does not notify
    /// subscribers. Returns the stored snapshot, if any.
    pub fn update<F>(&self, f: F) -> Option<Arc<S>>
    where
        F: FnOnce(&S) -> Option<S>,
    {
        self.update_then(f, |_| {})
    }

    /// Like `update`, but runs `then` on the new snapshot before the cell is
    /// unlocked, so concurrent updates observe `then` in commit order.
    pub fn update_then<F, G>(&self, f: F, then: G) -> Option<Arc<S>>
    where
        F: FnOnce(&S) -> Option<S>,
        G: FnOnce(&Arc<S>),
    {
        let mut stored = None;
        self.tx.send_if_modified(|current| match f(current) {
            Some(next) => {
                let next = Arc::new(next);
                then(&next);
                *current = next.clone();
                stored = Some(next);
                true
            }
            None => false,
        });
        stored
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<S>> {
        self.tx.subscribe()
    }
}

impl<S: Default> Default for StateCell<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}
