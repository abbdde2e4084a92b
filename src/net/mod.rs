//! Connection-level networking.
//!
//! # Data Flow
//! ```text
//! TcpListener::accept
//!     → deadline.rs (read-idle and stalled-write deadlines on the socket)
//!     → connection.rs (in-flight request tracking per connection)
//!     → hyper connection (header read timeout, keep-alive)
//!     → Router
//! ```
//!
//! # Design Decisions
//! - A connection with no request in flight is idle; idle connections are
//!   closed after the idle timeout
//! - A single write that cannot make progress for the write timeout fails
//!   the connection
//! - Request heads must arrive within the read timeout (enforced by hyper)

pub mod connection;
pub mod deadline;

pub use connection::{InFlight, RequestGuard};
pub use deadline::{ConnectionTimeouts, TimedStream, IDLE_TIMEOUT, READ_TIMEOUT, WRITE_TIMEOUT};
