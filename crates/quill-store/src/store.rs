//! The page store.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, mpsc};

use quill_model::{PageCollection, SnapshotError, default_collection, parse_snapshot, to_snapshot};

use crate::backend::{SnapshotBackend, StorageError};
use crate::event::{StoreEvent, StoreEventReceiver, WatchHandle};

/// Error persisting the page collection.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Backend failed to write the slot.
    #[error("snapshot storage failed: {0}")]
    Storage(#[from] StorageError),

    /// Collection could not be serialized.
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

/// Result of a read-modify-write step.
#[derive(Debug)]
pub enum Update<T> {
    /// Persist the replacement collection, then return `T`.
    Write(PageCollection, T),
    /// Leave the slot untouched and return `T`.
    Skip(T),
}

/// Owns the canonical page collection.
///
/// The store does not cache the collection: every [`load`](Self::load)
/// re-reads the slot, so a change written by another store on the same
/// backend is visible on the next read.
pub struct PageStore {
    backend: Arc<dyn SnapshotBackend>,
    subscribers: Mutex<Vec<mpsc::Sender<StoreEvent>>>,
    revision: AtomicU64,
    write_lock: Mutex<()>,
}

impl PageStore {
    /// Create a store over the given backend.
    #[must_use]
    pub fn new(backend: Arc<dyn SnapshotBackend>) -> Self {
        Self {
            backend,
            subscribers: Mutex::new(Vec::new()),
            revision: AtomicU64::new(0),
            write_lock: Mutex::new(()),
        }
    }

    /// Read the current page collection.
    ///
    /// Never fails: a missing slot yields the default collection, and an
    /// unreadable or malformed snapshot is logged and replaced by the default.
    pub fn load(&self) -> PageCollection {
        match self.backend.read() {
            Ok(Some(json)) => match parse_snapshot(&json) {
                Ok(collection) => collection,
                Err(e) => {
                    tracing::warn!(error = %e, "Malformed snapshot, using default pages");
                    default_collection()
                }
            },
            Ok(None) => {
                tracing::debug!("No snapshot persisted yet, using default pages");
                default_collection()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read snapshot, using default pages");
                default_collection()
            }
        }
    }

    /// Persist the full collection and notify subscribers.
    ///
    /// Subscribers are only notified when the write succeeded.
    pub fn save(&self, collection: &PageCollection) -> Result<(), StoreError> {
        let json = to_snapshot(collection)?;
        self.backend.write(&json)?;

        let revision = self.revision.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::info!(revision, pages = collection.len(), "Pages saved");
        self.notify(&StoreEvent::local(revision));
        Ok(())
    }

    /// Read-modify-write the collection.
    ///
    /// `f` receives the freshly loaded collection and decides whether to
    /// write a full replacement. An error from `f` aborts without writing.
    /// Calls on the same store are serialized and apply in call order.
    /// Other stores on the same backend are not coordinated: last write wins.
    pub fn update<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&PageCollection) -> Result<Update<T>, E>,
        E: From<StoreError>,
    {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        let current = self.load();
        match f(&current)? {
            Update::Write(next, value) => {
                self.save(&next)?;
                Ok(value)
            }
            Update::Skip(value) => Ok(value),
        }
    }

    /// Register a subscriber for [`ChangeOrigin::Local`](crate::ChangeOrigin::Local) events.
    ///
    /// Dropped receivers are pruned on the next notification.
    pub fn subscribe(&self) -> StoreEventReceiver {
        let (tx, rx) = mpsc::channel();
        self.subscribers
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(tx);
        StoreEventReceiver::new(rx)
    }

    /// Watch the backend for writes made by other stores or processes.
    pub fn watch_external(&self) -> Result<(StoreEventReceiver, WatchHandle), StorageError> {
        self.backend.watch()
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    /// Revision of the last successful save made through this store.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }

    fn notify(&self, event: &StoreEvent) {
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}
