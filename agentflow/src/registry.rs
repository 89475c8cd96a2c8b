//! In-memory session registry.
//!
//! One table per process maps a session id to the running worker's
//! execution handle and its stop latch. The registry is passive
//! bookkeeping: it signals and inspects workers but never drives them, and
//! it never removes entries on its own. The launcher that spawned a worker
//! registers it at start and unregisters it once the run ends.

use crate::handle::ExecutionHandle;
use crate::signal::StopSignal;
use crate::utils::iso_timestamp;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Process-local session identifier.
///
/// Caller-supplied; unique among currently registered sessions and free to
/// be reused once unregistered.
pub type SessionId = u64;

/// One registered worker: its handle, its latch, and when it was registered.
struct SessionEntry {
    handle: Arc<dyn ExecutionHandle>,
    stop: Arc<StopSignal>,
    /// RFC3339, diagnostic only.
    registered_at: String,
}

/// Thread-safe registry of running agent sessions.
///
/// A single coarse lock guards the whole table. Every operation holds it
/// only for the table read or write itself, never across worker code, so
/// all operations complete in bounded time. Readers see an entry fully or
/// not at all.
///
/// Construct one explicitly and share it (via `Arc`) with whoever needs to
/// look sessions up; there is no global instance.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<SessionId, SessionEntry>>,
}

impl SessionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a worker under the given session id.
    ///
    /// An already-present id is silently overwritten (last write wins); the
    /// replaced entry's latch is dropped, so a stop requested on the old
    /// run does not carry over to the new one.
    pub fn register(
        &self,
        session_id: SessionId,
        handle: Arc<dyn ExecutionHandle>,
        stop: Arc<StopSignal>,
    ) {
        info!(session_id, worker = handle.name(), "registering session");
        let entry = SessionEntry {
            handle,
            stop,
            registered_at: iso_timestamp(),
        };
        if self.sessions.write().insert(session_id, entry).is_some() {
            debug!(session_id, "replaced an existing session entry");
        }
    }

    /// Removes the entry for a session once its run has ended.
    ///
    /// Idempotent; unregistering an unknown id is a no-op.
    pub fn unregister(&self, session_id: SessionId) {
        info!(session_id, "unregistering session");
        self.sessions.write().remove(&session_id);
    }

    /// Returns whether the session is registered and its worker still active.
    ///
    /// `false` for an unknown id: querying a session that already finished
    /// and was unregistered is an expected race, not an error.
    #[must_use]
    pub fn is_running(&self, session_id: SessionId) -> bool {
        self.sessions
            .read()
            .get(&session_id)
            .is_some_and(|entry| entry.handle.is_active())
    }

    /// Requests a cooperative stop of the session's worker.
    ///
    /// Sets the entry's latch and returns `true` if the session is
    /// registered; returns `false` and leaves everything untouched
    /// otherwise. Idempotent: stopping an already-stopping session still
    /// returns `true`.
    pub fn request_stop(&self, session_id: SessionId, reason: impl Into<String>) -> bool {
        info!(session_id, "stop requested for session");
        // The latch is its own thread-safe object; only the lookup needs
        // the table lock.
        if let Some(entry) = self.sessions.read().get(&session_id) {
            entry.stop.set(reason);
            true
        } else {
            warn!(session_id, "no session found for stop request");
            false
        }
    }

    /// Returns whether the session's stop latch has been set.
    ///
    /// `false` for an unknown id.
    #[must_use]
    pub fn has_stop_signal(&self, session_id: SessionId) -> bool {
        self.sessions
            .read()
            .get(&session_id)
            .is_some_and(|entry| entry.stop.is_set())
    }

    /// Resolves a session id from a worker's execution name.
    ///
    /// Linear scan over current entries; returns the first match in table
    /// order, or `None`. Used by a worker introspecting its own session
    /// from inside its execution context, where it knows its thread name
    /// but not its id.
    #[must_use]
    pub fn find_session_by_name(&self, name: &str) -> Option<SessionId> {
        let found = self
            .sessions
            .read()
            .iter()
            .find(|(_, entry)| entry.handle.name() == name)
            .map(|(id, _)| *id);
        if found.is_none() {
            warn!(name, "no session found for worker name");
        }
        found
    }

    /// When the session was registered (RFC3339), if it is registered.
    #[must_use]
    pub fn registered_at(&self, session_id: SessionId) -> Option<String> {
        self.sessions
            .read()
            .get(&session_id)
            .map(|entry| entry.registered_at.clone())
    }

    /// Returns the ids of all currently registered sessions.
    #[must_use]
    pub fn session_ids(&self) -> Vec<SessionId> {
        self.sessions.read().keys().copied().collect()
    }

    /// Returns the number of registered sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    /// Returns true if no sessions are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }

    /// Removes every entry. Intended for test isolation.
    pub fn clear(&self) {
        self.sessions.write().clear();
    }
}

impl std::fmt::Debug for SessionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionRegistry")
            .field("sessions", &self.session_ids())
            .finish()
    }
}
