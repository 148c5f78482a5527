//! Debouncing for slot change notification.
//!
//! Editors and atomic renames emit several filesystem events per save. The
//! slot is a single file, so all events collapse into one pending change that
//! fires once the slot has been quiet for the debounce duration.

use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Thread-safe single-slot debouncer.
pub(crate) struct SlotDebouncer {
    deadline: Mutex<Option<Instant>>,
    debounce_duration: Duration,
}

impl SlotDebouncer {
    pub(crate) fn new(debounce_duration: Duration) -> Self {
        Self {
            deadline: Mutex::new(None),
            debounce_duration,
        }
    }

    /// Record a raw change, pushing the deadline out.
    pub(crate) fn record(&self) {
        let mut deadline = self
            .deadline
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *deadline = Some(Instant::now() + self.debounce_duration);
    }

    /// Returns `true` once if a recorded change has passed its deadline.
    pub(crate) fn take_ready(&self) -> bool {
        let mut deadline = self
            .deadline
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        match *deadline {
            Some(at) if at <= Instant::now() => {
                *deadline = None;
                true
            }
            _ => false,
        }
    }
}
