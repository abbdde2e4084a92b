//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request into the handler chain:
//!     → recovery.rs (panic anywhere below becomes a 500)
//!     → timeouts.rs (total handling time capped, 504 on expiry)
//! ```
//!
//! # Design Decisions
//! - A failing request never takes the process down
//! - Timeouts are non-negotiable; every request has a deadline
//! - Clients see fixed JSON messages; details go to the log

pub mod recovery;
pub mod timeouts;
