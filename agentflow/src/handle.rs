//! Execution handles for registered workers.
//!
//! A handle is an inspectable reference to a running worker: it exposes the
//! worker's name (for reverse lookup) and whether its unit of work is still
//! in flight. The registry uses handles for inspection only; it never joins,
//! aborts, or otherwise drives the worker through them.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// An inspectable reference to a running worker.
pub trait ExecutionHandle: Send + Sync {
    /// The worker's stable, inspectable name.
    fn name(&self) -> &str;

    /// Returns whether the worker's unit of work is still in flight.
    fn is_active(&self) -> bool;
}

/// Handle over a spawned OS thread.
///
/// Liveness comes from [`std::thread::JoinHandle::is_finished`]; the thread
/// is never joined through this type.
pub struct ThreadHandle {
    name: String,
    inner: std::thread::JoinHandle<()>,
}

impl ThreadHandle {
    /// Wraps a spawned thread's join handle.
    ///
    /// The name is taken from the thread itself when it was spawned with
    /// one, so reverse lookup matches what the worker sees as its own
    /// thread name.
    #[must_use]
    pub fn new(inner: std::thread::JoinHandle<()>) -> Self {
        let name = inner.thread().name().unwrap_or_default().to_string();
        Self { name, inner }
    }
}

impl ExecutionHandle for ThreadHandle {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_active(&self) -> bool {
        !self.inner.is_finished()
    }
}

/// Handle over a spawned tokio task.
///
/// Tokio tasks carry no names of their own, so the caller supplies one at
/// construction.
pub struct TaskHandle {
    name: String,
    inner: tokio::task::JoinHandle<()>,
}

impl TaskHandle {
    /// Wraps a spawned task's join handle under the given name.
    #[must_use]
    pub fn new(name: impl Into<String>, inner: tokio::task::JoinHandle<()>) -> Self {
        Self {
            name: name.into(),
            inner,
        }
    }
}

impl ExecutionHandle for TaskHandle {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_active(&self) -> bool {
        !self.inner.is_finished()
    }
}

/// Handle backed by an explicit completion flag.
///
/// For workers with no joinable handle: the worker (or its supervisor) calls
/// [`FlagHandle::finish`] when the unit of work ends. Also the natural test
/// double, since liveness can be flipped deterministically.
pub struct FlagHandle {
    name: String,
    finished: AtomicBool,
}

impl FlagHandle {
    /// Creates a handle that reports active until [`FlagHandle::finish`] is
    /// called.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            finished: AtomicBool::new(false),
        })
    }

    /// Marks the unit of work as finished. One-way, idempotent.
    pub fn finish(&self) {
        self.finished.store(true, Ordering::SeqCst);
    }
}

impl ExecutionHandle for FlagHandle {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_active(&self) -> bool {
        !self.finished.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_handle_lifecycle() {
        let handle = FlagHandle::new("worker-1");
        assert_eq!(handle.name(), "worker-1");
        assert!(handle.is_active());

        handle.finish();
        assert!(!handle.is_active());

        // Idempotent
        handle.finish();
        assert!(!handle.is_active());
    }

    #[test]
    fn test_thread_handle_tracks_liveness() {
        let (tx, rx) = std::sync::mpsc::channel::<()>();
        let join = std::thread::Builder::new()
            .name("agent-session-1".to_string())
            .spawn(move || {
                rx.recv().ok();
            })
            .unwrap();

        let handle = ThreadHandle::new(join);
        assert_eq!(handle.name(), "agent-session-1");
        assert!(handle.is_active());

        drop(tx);
        while handle.is_active() {
            std::thread::yield_now();
        }
        assert!(!handle.is_active());
    }

    #[tokio::test]
    async fn test_task_handle_tracks_liveness() {
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let join = tokio::spawn(async move {
            rx.await.ok();
        });

        let handle = TaskHandle::new("agent-task-1", join);
        assert_eq!(handle.name(), "agent-task-1");
        assert!(handle.is_active());

        tx.send(()).ok();
        while handle.is_active() {
            tokio::task::yield_now().await;
        }
        assert!(!handle.is_active());
    }
}
