//! Filesystem snapshot backend.
//!
//! Provides [`FsBackend`], which keeps the snapshot in a single JSON file.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, mpsc};
use std::time::Duration;

use notify::{RecursiveMode, Watcher};

use crate::backend::{SnapshotBackend, StorageError, StorageErrorKind};
use crate::debouncer::SlotDebouncer;
use crate::event::{StoreEvent, StoreEventReceiver, WatchHandle};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Debounce window for filesystem events.
const DEBOUNCE: Duration = Duration::from_millis(100);

/// Snapshot slot backed by one file.
///
/// Writes go to a uniquely named hidden sibling file which is then renamed
/// over the slot, so a concurrent reader never sees a half-written snapshot
/// and concurrent writers never share a temp file. [`watch`](SnapshotBackend::watch)
/// reports changes made by other processes; changes whose content equals the
/// last snapshot written through this backend are not reported.
pub struct FsBackend {
    path: PathBuf,
    last_written: Arc<Mutex<Option<String>>>,
}

impl FsBackend {
    /// Create a backend for the snapshot file at `path`.
    ///
    /// The file and its parent directories are created on first write.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            last_written: Arc::new(Mutex::new(None)),
        }
    }

    /// Path of the snapshot file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_prefix(&self) -> String {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        format!(".{name}.")
    }

    /// Write `snapshot` to a uniquely named sibling and rename it over the slot.
    fn replace_slot(&self, snapshot: &str) -> Result<(), StorageError> {
        let dir = self.watch_dir();
        let mut temp = tempfile::Builder::new()
            .prefix(&self.temp_prefix())
            .suffix(".tmp")
            .tempfile_in(&dir)
            .map_err(|e| StorageError::io(e, Some(dir.clone())).with_backend(BACKEND))?;
        temp.write_all(snapshot.as_bytes())
            .map_err(|e| StorageError::io(e, Some(temp.path().to_path_buf())).with_backend(BACKEND))?;
        temp.persist(&self.path)
            .map_err(|e| StorageError::io(e.error, Some(self.path.clone())).with_backend(BACKEND))?;
        Ok(())
    }

    fn watch_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}

/// Record `snapshot` as this backend's latest write, returning the previous one.
fn remember(slot: &Mutex<Option<String>>, snapshot: Option<String>) -> Option<String> {
    let mut last = slot.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    std::mem::replace(&mut *last, snapshot)
}

fn is_own_write(slot: &Mutex<Option<String>>, current: Option<&str>) -> bool {
    let last = slot.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    last.as_deref().is_some() && last.as_deref() == current
}

impl SnapshotBackend for FsBackend {
    fn read(&self) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io(e, Some(self.path.clone())).with_backend(BACKEND)),
        }
    }

    fn write(&self, snapshot: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .map_err(|e| StorageError::io(e, Some(parent.to_path_buf())).with_backend(BACKEND))?;
        }

        // Remember before the rename so the watcher never sees our write as foreign
        let previous = remember(&self.last_written, Some(snapshot.to_owned()));
        if let Err(e) = self.replace_slot(snapshot) {
            remember(&self.last_written, previous);
            return Err(e);
        }

        tracing::debug!(path = %self.path.display(), bytes = snapshot.len(), "Snapshot written");
        Ok(())
    }

    fn watch(&self) -> Result<(StoreEventReceiver, WatchHandle), StorageError> {
        let (event_tx, event_rx) = mpsc::channel();
        let (shutdown_tx, shutdown_rx) = mpsc::channel();

        let debouncer = Arc::new(SlotDebouncer::new(DEBOUNCE));
        let debouncer_for_watcher = Arc::clone(&debouncer);
        let slot_name = self.path.file_name().map(std::ffi::OsStr::to_os_string);

        let mut watcher =
            notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
                let Ok(event) = res else {
                    return;
                };
                if !matches!(
                    event.kind,
                    notify::EventKind::Create(_)
                        | notify::EventKind::Modify(_)
                        | notify::EventKind::Remove(_)
                ) {
                    return;
                }
                let touches_slot = event
                    .paths
                    .iter()
                    .any(|p| p.file_name().map(std::ffi::OsStr::to_os_string) == slot_name);
                if touches_slot {
                    debouncer_for_watcher.record();
                }
            })
            .map_err(|e| {
                StorageError::new(StorageErrorKind::Other)
                    .with_backend(BACKEND)
                    .with_source(e)
            })?;

        let watch_dir = self.watch_dir();
        fs::create_dir_all(&watch_dir)
            .map_err(|e| StorageError::io(e, Some(watch_dir.clone())).with_backend(BACKEND))?;
        watcher
            .watch(&watch_dir, RecursiveMode::NonRecursive)
            .map_err(|e| {
                StorageError::new(StorageErrorKind::Other)
                    .with_backend(BACKEND)
                    .with_path(watch_dir.clone())
                    .with_source(e)
            })?;

        let path = self.path.clone();
        let last_written = Arc::clone(&self.last_written);
        let mut revision = 0u64;

        std::thread::spawn(move || {
            // Keep watcher alive for the lifetime of this thread
            let _watcher_guard = watcher;

            loop {
                match shutdown_rx.recv_timeout(Duration::from_millis(50)) {
                    Ok(()) | Err(mpsc::RecvTimeoutError::Disconnected) => break,
                    Err(mpsc::RecvTimeoutError::Timeout) => {}
                }

                if !debouncer.take_ready() {
                    continue;
                }

                let current = fs::read_to_string(&path).ok();
                if is_own_write(&last_written, current.as_deref()) {
                    continue;
                }

                revision += 1;
                let event = StoreEvent::external(revision);
                if event_tx.send(event).is_err() {
                    // Receiver dropped, exit thread
                    return;
                }
            }
        });

        Ok((StoreEventReceiver::new(event_rx), WatchHandle::new(shutdown_tx)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_fs_backend_is_send_sync() {
        assert_send_sync::<FsBackend>();
    }

    #[test]
    fn test_read_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FsBackend::new(dir.path().join("pages.json"));

        assert!(backend.read().unwrap().is_none());
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FsBackend::new(dir.path().join("nested/data/pages.json"));

        backend.write(r#"{"a":1}"#).unwrap();

        assert_eq!(backend.read().unwrap().as_deref(), Some(r#"{"a":1}"#));
        let entries = fs::read_dir(dir.path().join("nested/data")).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_write_replaces_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FsBackend::new(dir.path().join("pages.json"));

        backend.write("first").unwrap();
        backend.write("second").unwrap();

        assert_eq!(backend.read().unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_read_directory_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FsBackend::new(dir.path().to_path_buf());

        let err = backend.read().unwrap_err();

        assert_eq!(err.backend, Some("Fs"));
    }

    #[test]
    fn test_temp_prefix_is_hidden() {
        let backend = FsBackend::new(PathBuf::from("/data/pages.json"));

        assert_eq!(backend.temp_prefix(), ".pages.json.");
    }

    #[test]
    fn test_concurrent_writers_leave_whole_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pages.json");
        let writers: Vec<_> = ["x", "y"]
            .into_iter()
            .map(|fill| {
                let backend = FsBackend::new(path.clone());
                let snapshot = fill.repeat(64 * 1024);
                std::thread::spawn(move || {
                    for _ in 0..20 {
                        backend.write(&snapshot).unwrap();
                    }
                })
            })
            .collect();
        for writer in writers {
            writer.join().unwrap();
        }

        let content = FsBackend::new(path).read().unwrap().unwrap();
        assert_eq!(content.len(), 64 * 1024);
        assert!(content.chars().all(|c| c == 'x') || content.chars().all(|c| c == 'y'));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_failed_write_is_not_remembered() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pages.json");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("occupied"), "").unwrap();
        let backend = FsBackend::new(path);
        backend.write("first").unwrap_err();

        assert!(!is_own_write(&backend.last_written, Some("first")));
    }

    #[test]
    fn test_own_write_detection() {
        let slot = Mutex::new(None);
        assert!(!is_own_write(&slot, None));

        assert_eq!(remember(&slot, Some("abc".to_owned())), None);

        assert!(is_own_write(&slot, Some("abc")));
        assert!(!is_own_write(&slot, Some("abd")));
        assert!(!is_own_write(&slot, None));
    }

    #[test]
    fn test_watch_reports_foreign_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pages.json");
        let backend = FsBackend::new(path.clone());
        let (events, _handle) = backend.watch().unwrap();

        // Give the watcher a moment to register
        std::thread::sleep(Duration::from_millis(100));
        fs::write(&path, "written elsewhere").unwrap();

        let mut received = None;
        for _ in 0..40 {
            if let Some(event) = events.try_recv() {
                received = Some(event);
                break;
            }
            std::thread::sleep(Duration::from_millis(50));
        }

        let event = received.expect("expected an external change event");
        assert_eq!(event.origin, crate::ChangeOrigin::External);
    }
}
