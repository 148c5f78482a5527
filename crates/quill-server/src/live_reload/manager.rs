//! Live reload manager.
//!
//! Bridges the blocking store notification channels onto a broadcast
//! channel the WebSocket handlers subscribe to.

use std::sync::Arc;

use quill_store::{ChangeOrigin, PageStore, StorageError, StoreEvent, StoreEventReceiver, WatchHandle};
use serde::Serialize;
use tokio::sync::broadcast;

/// Event sent to connected WebSocket clients when pages change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct ReloadEvent {
    /// Event type (always "reload").
    #[serde(rename = "type")]
    event_type: &'static str,
    /// `local` for saves through this server, `external` for other writers.
    origin: &'static str,
    /// Store or slot revision that triggered the event.
    revision: u64,
}

impl From<StoreEvent> for ReloadEvent {
    fn from(event: StoreEvent) -> Self {
        Self {
            event_type: "reload",
            origin: match event.origin {
                ChangeOrigin::Local => "local",
                ChangeOrigin::External => "external",
            },
            revision: event.revision,
        }
    }
}

/// Forwards store events to WebSocket clients.
pub(crate) struct LiveReloadManager {
    broadcaster: broadcast::Sender<ReloadEvent>,
    /// Dropping the handle stops the slot watcher.
    #[allow(dead_code)]
    watch: Option<WatchHandle>,
}

impl LiveReloadManager {
    /// Create a new live reload manager.
    #[must_use]
    pub(crate) fn new(broadcaster: broadcast::Sender<ReloadEvent>) -> Self {
        Self {
            broadcaster,
            watch: None,
        }
    }

    /// Subscribe to reload events.
    pub(crate) fn subscribe(&self) -> broadcast::Receiver<ReloadEvent> {
        self.broadcaster.subscribe()
    }

    /// Start forwarding events of `store`.
    ///
    /// Spawns one thread per store channel; each ends when its channel
    /// closes (the store or the watch handle is dropped).
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot slot cannot be watched.
    pub(crate) fn start(&mut self, store: &Arc<PageStore>) -> Result<(), StorageError> {
        let (external, handle) = store.watch_external()?;
        self.watch = Some(handle);

        Self::forward(store.subscribe(), self.broadcaster.clone());
        Self::forward(external, self.broadcaster.clone());

        tracing::debug!("Live reload started");
        Ok(())
    }

    fn forward(events: StoreEventReceiver, broadcaster: broadcast::Sender<ReloadEvent>) {
        std::thread::spawn(move || {
            for event in events.iter() {
                tracing::debug!(origin = ?event.origin, revision = event.revision, "Pages changed");
                // No receivers just means no browser is connected
                let _ = broadcaster.send(ReloadEvent::from(event));
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pretty_assertions::assert_eq;
    use quill_model::default_collection;
    use quill_store::MemoryBackend;

    use super::*;

    #[test]
    fn test_reload_event_serialization() {
        let event = ReloadEvent::from(StoreEvent {
            origin: ChangeOrigin::External,
            revision: 4,
        });

        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"type": "reload", "origin": "external", "revision": 4})
        );
    }

    #[tokio::test]
    async fn test_save_is_broadcast() {
        let store = Arc::new(PageStore::new(Arc::new(MemoryBackend::new())));
        let (tx, _rx) = broadcast::channel(16);
        let mut manager = LiveReloadManager::new(tx);
        manager.start(&store).unwrap();
        let mut events = manager.subscribe();

        store.save(&default_collection()).unwrap();

        let mut origins = Vec::new();
        for _ in 0..2 {
            let event = tokio::time::timeout(Duration::from_secs(5), events.recv())
                .await
                .unwrap()
                .unwrap();
            origins.push(event.origin);
        }
        origins.sort_unstable();
        // The memory slot reports the write to its watchers as well
        assert_eq!(origins, vec!["external", "local"]);
    }
}
