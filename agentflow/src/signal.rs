//! One-way stop latch for cooperative cancellation.

use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

/// A shared, one-way stop latch.
///
/// The registry and the worker hold references to the same instance
/// (typically via `Arc`). Once set, the latch stays set for the life of the
/// instance; setting it again is a no-op and the first reason wins.
///
/// Workers poll [`StopSignal::is_set`] between discrete units of work and
/// exit cleanly when it returns `true`. The latch never interrupts a worker
/// mid-side-effect; a worker that never polls runs to completion.
#[derive(Default)]
pub struct StopSignal {
    /// Whether a stop has been requested.
    stopped: AtomicBool,
    /// The reason for the stop request (first one wins).
    reason: RwLock<Option<String>>,
}

impl StopSignal {
    /// Creates a new, unset latch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the latch with a reason.
    ///
    /// Idempotent: only the first call flips the latch and records its
    /// reason. Returns `true` if this call was the one that set it.
    pub fn set(&self, reason: impl Into<String>) -> bool {
        if self
            .stopped
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            *self.reason.write() = Some(reason.into());
            true
        } else {
            false
        }
    }

    /// Returns whether a stop has been requested.
    ///
    /// Non-blocking atomic read; safe to poll from a tight worker loop
    /// without touching any registry lock.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    /// Returns the recorded stop reason, if any.
    #[must_use]
    pub fn reason(&self) -> Option<String> {
        self.reason.read().clone()
    }
}

impl std::fmt::Debug for StopSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StopSignal")
            .field("set", &self.is_set())
            .field("reason", &self.reason())
            .finish()
    }
}
