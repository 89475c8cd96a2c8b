//! Session launcher: spawn, register, run, record, unregister.
//!
//! The registry on its own is passive bookkeeping; this module is the glue
//! a consumer would otherwise re-derive. A launched worker is registered
//! before its body runs, its body receives the stop latch to poll, and when
//! the body returns (or panics) the launcher records a terminal
//! [`SessionOutcome`] and unregisters the session.
//!
//! The launcher never force-terminates a worker. A caller that wants a
//! timeout on cancellation layers it on top by polling
//! [`SessionRegistry::is_running`].

use crate::errors::WorkerError;
use crate::handle::{TaskHandle, ThreadHandle};
use crate::outcome::SessionOutcome;
use crate::registry::{SessionId, SessionRegistry};
use crate::signal::StopSignal;
use parking_lot::RwLock;
use std::future::Future;
use std::sync::Arc;
use tracing::info;

/// The launcher-side view of one spawned session run.
pub struct SessionTicket {
    session_id: SessionId,
    stop: Arc<StopSignal>,
    outcome: Arc<RwLock<Option<SessionOutcome>>>,
}

impl SessionTicket {
    /// The id the run was registered under.
    #[must_use]
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// The run's stop latch, shared with the worker and the registry.
    #[must_use]
    pub fn stop_signal(&self) -> &Arc<StopSignal> {
        &self.stop
    }

    /// The terminal outcome, once the run has ended.
    ///
    /// `None` while the run is still in flight. Filled exactly once, after
    /// the session has been unregistered.
    #[must_use]
    pub fn outcome(&self) -> Option<SessionOutcome> {
        *self.outcome.read()
    }
}

/// Spawns workers and manages their registry lifecycle.
pub struct SessionLauncher {
    registry: Arc<SessionRegistry>,
}

impl SessionLauncher {
    /// Creates a launcher over the given registry.
    #[must_use]
    pub fn new(registry: Arc<SessionRegistry>) -> Self {
        Self { registry }
    }

    /// The registry this launcher registers sessions in.
    #[must_use]
    pub fn registry(&self) -> &Arc<SessionRegistry> {
        &self.registry
    }

    /// Spawns a worker on a named OS thread and registers it.
    ///
    /// The body receives the run's stop latch and reports how it ended;
    /// returning [`WorkerError::Stopped`] marks a cooperative stop. The
    /// body does not start until registration is visible, so a worker can
    /// resolve its own session id by thread name from its first
    /// instruction. Panics in the body are caught and recorded as a failed
    /// outcome.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS refuses to spawn the thread.
    pub fn spawn_thread<F>(
        &self,
        session_id: SessionId,
        name: impl Into<String>,
        body: F,
    ) -> std::io::Result<SessionTicket>
    where
        F: FnOnce(Arc<StopSignal>) -> Result<(), WorkerError> + Send + 'static,
    {
        let stop = Arc::new(StopSignal::new());
        let outcome = Arc::new(RwLock::new(None));
        let (ready_tx, ready_rx) = std::sync::mpsc::channel::<()>();

        let registry = self.registry.clone();
        let worker_stop = stop.clone();
        let worker_outcome = outcome.clone();
        let join = std::thread::Builder::new()
            .name(name.into())
            .spawn(move || {
                // Hold until the launcher has registered this session.
                let _ = ready_rx.recv();

                let result =
                    std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                        body(worker_stop)
                    }))
                    .unwrap_or_else(|payload| {
                        Err(WorkerError::Panicked(panic_message(payload.as_ref())))
                    });

                let ended = WorkerError::classify(&result);
                registry.unregister(session_id);
                *worker_outcome.write() = Some(ended);
                info!(session_id, outcome = %ended, "session finished");
            })?;

        self.registry
            .register(session_id, Arc::new(ThreadHandle::new(join)), stop.clone());
        let _ = ready_tx.send(());

        Ok(SessionTicket {
            session_id,
            stop,
            outcome,
        })
    }

    /// Spawns a worker as a tokio task and registers it.
    ///
    /// Same contract as [`SessionLauncher::spawn_thread`], with an async
    /// body and a named [`TaskHandle`]. Must be called from within a tokio
    /// runtime.
    pub fn spawn_task<F, Fut>(
        &self,
        session_id: SessionId,
        name: impl Into<String>,
        body: F,
    ) -> SessionTicket
    where
        F: FnOnce(Arc<StopSignal>) -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), WorkerError>> + Send + 'static,
    {
        let stop = Arc::new(StopSignal::new());
        let outcome = Arc::new(RwLock::new(None));
        let (ready_tx, ready_rx) = tokio::sync::oneshot::channel::<()>();

        let registry = self.registry.clone();
        let worker_stop = stop.clone();
        let worker_outcome = outcome.clone();
        let join = tokio::spawn(async move {
            let _ = ready_rx.await;

            // An inner task so a panicking body still surfaces as a join
            // error instead of tearing down this supervisor.
            let result = match tokio::spawn(body(worker_stop)).await {
                Ok(result) => result,
                Err(join_err) => Err(WorkerError::Panicked(join_err.to_string())),
            };

            let ended = WorkerError::classify(&result);
            registry.unregister(session_id);
            *worker_outcome.write() = Some(ended);
            info!(session_id, outcome = %ended, "session finished");
        });

        self.registry.register(
            session_id,
            Arc::new(TaskHandle::new(name, join)),
            stop.clone(),
        );
        let _ = ready_tx.send(());

        SessionTicket {
            session_id,
            stop,
            outcome,
        }
    }
}

/// Best-effort extraction of a panic payload's message.
fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "opaque panic payload".to_string()
    }
}
