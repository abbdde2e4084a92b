//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing macros (structured events)
//!     → logging.rs (subscriber: level filter + JSON or console encoder)
//!     → non-blocking stdout writer, flushed by LogGuard on drop
//!
//! Every request additionally produces:
//!     → access_log.rs (one "request completed" event, tagged with request id)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) in production, console output elsewhere
//! - Request ID flows through every access log line
//! - The subscriber is installed once; the guard is held by `main`

pub mod access_log;
pub mod logging;

pub use logging::{LogEncoding, LogGuard, LoggingError};
