#[cfg(feature = "emitter")]
use std::sync::{Arc, Mutex};

#[cfg(feature = "emitter")]
use event_emitter_rs::EventEmitter;
use serde::{Deserialize, Serialize};
#[cfg(feature = "emitter")]
use tracing::warn;

#[cfg(feature = "emitter")]
use crate::error::StoreError;

/// What happened to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeKind {
    Created,
    Updated,
    Deleted,
}

/// Notification sent to listeners after a store mutation lands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordChange {
    pub collection: String,
    pub id: String,
    pub kind: ChangeKind,
}

/// Per-store change listeners, keyed by collection name.
///
/// Clone-friendly via Arc; every clone of a store shares one feed.
#[cfg(feature = "emitter")]
#[derive(Clone)]
pub struct ChangeFeed {
    emitter: Arc<Mutex<EventEmitter>>,
}

#[cfg(feature = "emitter")]
impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "emitter")]
impl ChangeFeed {
    pub fn new() -> Self {
        Self {
            emitter: Arc::new(Mutex::new(EventEmitter::new())),
        }
    }

    /// Register a listener for changes to `collection`. Returns the listener id.
    pub fn subscribe<F>(&self, collection: &str, listener: F) -> Result<String, StoreError>
    where
        F: Fn(RecordChange) + Send + Sync + 'static,
    {
        let mut emitter = self
            .emitter
            .lock()
            .map_err(|_| StoreError::LockPoisoned("subscribe"))?;
        Ok(emitter.on(collection, listener))
    }

    /// Remove a listener. Returns true if it was registered.
    pub fn unsubscribe(&self, listener_id: &str) -> Result<bool, StoreError> {
        let mut emitter = self
            .emitter
            .lock()
            .map_err(|_| StoreError::LockPoisoned("unsubscribe"))?;
        Ok(emitter.remove_listener(listener_id).is_some())
    }

    /// Deliver a change and wait for every listener to finish.
    ///
    /// Must not be called while holding the store's collection lock:
    /// listeners are free to read the store.
    pub(crate) fn publish(&self, change: RecordChange) {
        let handles = match self.emitter.lock() {
            Ok(mut emitter) => {
                let event = change.collection.clone();
                emitter.emit(&event, change)
            }
            Err(_) => {
                warn!(collection = %change.collection, "change feed lock poisoned, dropping notification");
                return;
            }
        };

        for handle in handles {
            if handle.join().is_err() {
                warn!("record change listener panicked");
            }
        }
    }
}
