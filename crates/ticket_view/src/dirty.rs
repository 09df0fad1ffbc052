//! Staleness tracking for cached ticket geometry
//!
//! The tracker is a two-state machine, `Dirty` on creation. Mutations move it
//! to `Dirty`; the draw pass takes the flag with a single atomic swap, so
//! concurrent invalidations from other threads are never lost and one draw
//! rebuilds at most once.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Whether cached geometry must be rebuilt before the next draw
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DirtyState {
    Clean,
    Dirty,
}

/// Owns the dirty flag of one ticket view
#[derive(Debug)]
pub struct DirtyTracker {
    flag: Arc<AtomicBool>,
}

impl DirtyTracker {
    /// New tracker in the `Dirty` state
    pub fn new() -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn mark_dirty(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// Atomically test and clear.
    ///
    /// Returns true if the state was `Dirty`; the state is `Clean` afterwards.
    pub fn take_dirty(&self) -> bool {
        self.flag.swap(false, Ordering::AcqRel)
    }

    pub fn state(&self) -> DirtyState {
        if self.flag.load(Ordering::Acquire) {
            DirtyState::Dirty
        } else {
            DirtyState::Clean
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.state() == DirtyState::Dirty
    }

    /// A handle other threads can use to invalidate this tracker
    pub fn handle(&self) -> DirtyHandle {
        DirtyHandle {
            flag: Arc::clone(&self.flag),
        }
    }
}

impl Default for DirtyTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Cloneable, thread-safe invalidation handle
#[derive(Clone, Debug)]
pub struct DirtyHandle {
    flag: Arc<AtomicBool>,
}

impl DirtyHandle {
    pub fn mark_dirty(&self) {
        self.flag.store(true, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_initially_dirty() {
        let tracker = DirtyTracker::new();
        assert_eq!(tracker.state(), DirtyState::Dirty);
    }

    #[test]
    fn test_take_dirty_clears_once() {
        let tracker = DirtyTracker::new();
        assert!(tracker.take_dirty());
        assert!(!tracker.take_dirty());
        assert_eq!(tracker.state(), DirtyState::Clean);

        tracker.mark_dirty();
        tracker.mark_dirty();
        assert!(tracker.take_dirty());
        assert!(!tracker.take_dirty());
    }

    #[test]
    fn test_handle_marks_from_other_thread() {
        let tracker = DirtyTracker::new();
        tracker.take_dirty();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let handle = tracker.handle();
                thread::spawn(move || handle.mark_dirty())
            })
            .collect();
        for h in handles {
            h.join().expect("thread panicked");
        }

        assert!(tracker.is_dirty());
        assert!(tracker.take_dirty());
        assert!(!tracker.is_dirty());
    }

    #[test]
    fn test_handle_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DirtyHandle>();
        assert_send_sync::<DirtyTracker>();
    }
}
