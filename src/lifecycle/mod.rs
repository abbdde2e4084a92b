//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Open pool → Migrate (optional) → Assemble router → Bind → Serve
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting → Drain (30s bound) → Close pool
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//!
//! States (state.rs):
//!     Idle → Starting → Serving → ShuttingDown → Stopped
//!     Starting | Serving | ShuttingDown → Fatal
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then core, then listeners
//! - Fail fast: any startup error is fatal, no retry
//! - Shutdown has a deadline; overrunning it is a fatal exit

pub mod shutdown;
pub mod signals;
pub mod startup;
pub mod state;

use std::time::Duration;

use thiserror::Error;

use crate::db::DbError;

pub use shutdown::Shutdown;
pub use signals::shutdown_signal;
pub use startup::{bind_and_serve, run, serve_until, SHUTDOWN_GRACE_PERIOD};
pub use state::{Lifecycle, LifecycleState};

/// Faults that end the process with a non-zero exit.
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error(transparent)]
    Database(#[from] DbError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),

    #[error("server task failed: {0}")]
    ServerTask(#[source] tokio::task::JoinError),

    #[error("server stopped without a shutdown signal")]
    ServerExited,

    #[error("server forced to shutdown: requests still running after {0:?}")]
    ForcedShutdown(Duration),
}
