//! Page store for Quill.
//!
//! The [`PageStore`] owns the canonical page collection. It reads the
//! persisted snapshot from an injectable [`SnapshotBackend`], writes the full
//! collection back on every mutation and notifies an explicit subscriber list.
//!
//! # Architecture
//!
//! The crate provides:
//! - [`SnapshotBackend`] trait with `read()`, `write()` and `watch()`
//! - [`FsBackend`], a single JSON file replaced atomically on each write
//! - [`MemoryBackend`] for tests (behind the `mock` feature flag)
//! - [`PageStore`] with `load()`, `save()`, `update()` and `subscribe()`
//! - [`select_current`] / [`resolve_selected_id`] for page selection fallback
//!
//! Two kinds of change notification exist. [`ChangeOrigin::Local`] events are
//! sent by a store to its own subscribers after every successful save.
//! [`ChangeOrigin::External`] events come from [`SnapshotBackend::watch`] and
//! report writes made by someone else to the same slot. Writers on one slot
//! are not coordinated: the last write wins.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use quill_store::{FsBackend, PageStore, Update};
//!
//! let store = PageStore::new(Arc::new(FsBackend::new("data/pages.json".into())));
//! let events = store.subscribe();
//! store.update(|pages| {
//!     let mut next = pages.clone();
//!     // mutate `next`
//!     Ok::<_, quill_store::StoreError>(Update::Write(next, ()))
//! })?;
//! ```

mod backend;
mod debouncer;
mod event;
mod fs;
#[cfg(any(test, feature = "mock"))]
mod memory;
mod select;
mod store;

pub use backend::{SnapshotBackend, StorageError, StorageErrorKind};
pub use event::{ChangeOrigin, StoreEvent, StoreEventReceiver, WatchHandle};
pub use fs::FsBackend;
#[cfg(any(test, feature = "mock"))]
pub use memory::MemoryBackend;
pub use select::{resolve_selected_id, select_current};
pub use store::{PageStore, StoreError, Update};
