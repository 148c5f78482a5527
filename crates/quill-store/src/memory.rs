//! In-memory snapshot backend for testing.
//!
//! Provides [`MemoryBackend`], which keeps the snapshot in a string slot and
//! fans every write out to all watchers, the way a browser storage event
//! reaches every other tab.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, RwLock, mpsc};

use crate::backend::{SnapshotBackend, StorageError, StorageErrorKind};
use crate::event::{StoreEvent, StoreEventReceiver, WatchHandle};

/// Backend identifier for error messages.
const BACKEND: &str = "Memory";

/// In-memory snapshot slot.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use quill_store::{MemoryBackend, PageStore};
///
/// let backend = Arc::new(MemoryBackend::new().with_snapshot("{}"));
/// let store = PageStore::new(backend);
/// assert!(store.load().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct MemoryBackend {
    slot: RwLock<Option<String>>,
    watchers: Mutex<Vec<mpsc::Sender<StoreEvent>>>,
    writes: AtomicU64,
    fail_writes: AtomicBool,
}

impl MemoryBackend {
    /// Create an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the slot with a snapshot.
    #[must_use]
    pub fn with_snapshot(self, snapshot: impl Into<String>) -> Self {
        *self
            .slot
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(snapshot.into());
        self
    }

    /// Current slot content.
    #[must_use]
    pub fn snapshot(&self) -> Option<String> {
        self.slot
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Number of successful writes so far.
    #[must_use]
    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::SeqCst)
    }

    /// Make subsequent writes fail with an `Unavailable` error.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl SnapshotBackend for MemoryBackend {
    fn read(&self) -> Result<Option<String>, StorageError> {
        Ok(self.snapshot())
    }

    fn write(&self, snapshot: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::new(StorageErrorKind::Unavailable).with_backend(BACKEND));
        }

        *self
            .slot
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(snapshot.to_owned());
        let revision = self.writes.fetch_add(1, Ordering::SeqCst) + 1;

        let mut watchers = self
            .watchers
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        watchers.retain(|tx| tx.send(StoreEvent::external(revision)).is_ok());
        Ok(())
    }

    fn watch(&self) -> Result<(StoreEventReceiver, WatchHandle), StorageError> {
        let (tx, rx) = mpsc::channel();
        self.watchers
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(tx);
        Ok((StoreEventReceiver::new(rx), WatchHandle::no_op()))
    }
}
