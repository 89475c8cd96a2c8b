//! # Agentflow
//!
//! A session registry and cooperative cancellation layer for long-lived
//! agent worker tasks.
//!
//! Agentflow is in-process bookkeeping for a handful of concurrently
//! running workers:
//!
//! - **Session registry**: a process-wide table from session id to the
//!   running worker's execution handle and stop latch
//! - **Cooperative cancellation**: workers poll a shared one-way latch and
//!   exit cleanly when it is set; nothing is ever force-terminated
//! - **Execution handles**: liveness and name inspection over OS threads,
//!   tokio tasks, or explicit completion flags
//! - **Session launcher**: spawn-register-run-unregister glue with a
//!   terminal outcome per run
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use agentflow::prelude::*;
//! use std::sync::Arc;
//!
//! let registry = Arc::new(SessionRegistry::new());
//! let launcher = SessionLauncher::new(registry.clone());
//!
//! let ticket = launcher.spawn_thread(7, "agent-session-7", |stop| {
//!     while !stop.is_set() {
//!         // one unit of work, then check the latch again
//!     }
//!     Err(WorkerError::Stopped { reason: stop.reason() })
//! })?;
//!
//! // Meanwhile, an API handler reacting to the user:
//! registry.request_stop(7, "user hit stop");
//! ```
//!
//! The registry is memory-only and process-local; nothing survives a
//! restart.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod errors;
pub mod handle;
pub mod launcher;
pub mod outcome;
pub mod registry;
pub mod signal;
pub mod utils;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::errors::WorkerError;
    pub use crate::handle::{ExecutionHandle, FlagHandle, TaskHandle, ThreadHandle};
    pub use crate::launcher::{SessionLauncher, SessionTicket};
    pub use crate::outcome::SessionOutcome;
    pub use crate::registry::{SessionId, SessionRegistry};
    pub use crate::signal::StopSignal;
}
