//! Store change events.
//!
//! Provides types for subscribing to snapshot changes through
//! [`PageStore::subscribe`](crate::PageStore::subscribe) and
//! [`SnapshotBackend::watch`](crate::SnapshotBackend::watch).

use std::sync::mpsc;

/// Where a change came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeOrigin {
    /// Written by the store that sent the event.
    Local,
    /// Written to the slot by another store or process.
    External,
}

/// A snapshot change event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreEvent {
    /// Where the change came from.
    pub origin: ChangeOrigin,
    /// Sequence number assigned by the emitter (store or backend).
    pub revision: u64,
}

impl StoreEvent {
    pub(crate) fn local(revision: u64) -> Self {
        Self {
            origin: ChangeOrigin::Local,
            revision,
        }
    }

    pub(crate) fn external(revision: u64) -> Self {
        Self {
            origin: ChangeOrigin::External,
            revision,
        }
    }
}

/// Receiver for store events.
///
/// Wraps a [`std::sync::mpsc::Receiver`] for synchronous event delivery.
/// Can be iterated with [`iter()`](Self::iter) or polled with [`recv()`](Self::recv)/[`try_recv()`](Self::try_recv).
pub struct StoreEventReceiver {
    rx: mpsc::Receiver<StoreEvent>,
}

impl StoreEventReceiver {
    pub(crate) fn new(rx: mpsc::Receiver<StoreEvent>) -> Self {
        Self { rx }
    }

    /// Wait for the next event (blocking).
    ///
    /// Returns `None` when the sender is dropped.
    #[must_use]
    pub fn recv(&self) -> Option<StoreEvent> {
        self.rx.recv().ok()
    }

    /// Try to receive an event without blocking.
    ///
    /// Returns `None` if no event is available or the sender is dropped.
    #[must_use]
    pub fn try_recv(&self) -> Option<StoreEvent> {
        self.rx.try_recv().ok()
    }

    /// Returns an iterator over events.
    ///
    /// Blocks until an event is available. Stops when the sender is dropped.
    pub fn iter(&self) -> impl Iterator<Item = StoreEvent> + '_ {
        self.rx.iter()
    }

    /// Create a no-op receiver that never yields events.
    pub(crate) fn no_op() -> Self {
        let (_tx, rx) = mpsc::channel();
        Self { rx }
    }
}

/// Handle to stop watching for changes.
///
/// Dropping the handle stops watching. Shutdown is signalled by dropping the
/// internal channel sender.
pub struct WatchHandle {
    _shutdown: Option<mpsc::Sender<()>>,
}

impl WatchHandle {
    pub(crate) fn new(shutdown: mpsc::Sender<()>) -> Self {
        Self {
            _shutdown: Some(shutdown),
        }
    }

    /// Stop watching immediately (consumes the handle).
    pub fn stop(mut self) {
        self._shutdown.take();
    }

    pub(crate) fn no_op() -> Self {
        Self { _shutdown: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receiver_iter_stops_when_sender_dropped() {
        let (tx, rx) = mpsc::channel();
        let receiver = StoreEventReceiver::new(rx);

        tx.send(StoreEvent::local(1)).unwrap();
        tx.send(StoreEvent::external(7)).unwrap();
        drop(tx);

        let received: Vec<_> = receiver.iter().collect();
        assert_eq!(received, vec![StoreEvent::local(1), StoreEvent::external(7)]);
    }

    #[test]
    fn test_receiver_no_op() {
        let receiver = StoreEventReceiver::no_op();

        assert!(receiver.try_recv().is_none());
        assert!(receiver.recv().is_none());
    }

    #[test]
    fn test_watch_handle_stop_closes_channel() {
        let (tx, rx) = mpsc::channel();
        let handle = WatchHandle::new(tx);

        handle.stop();

        assert!(rx.recv().is_err());
    }

    #[test]
    fn test_watch_handle_drop_closes_channel() {
        let (tx, rx) = mpsc::channel();
        let handle = WatchHandle::new(tx);

        drop(handle);

        assert!(rx.recv().is_err());
    }

    #[test]
    fn test_handles_are_send() {
        fn assert_send<T: Send>() {}
        assert_send::<WatchHandle>();
        assert_send::<StoreEventReceiver>();
    }
}
