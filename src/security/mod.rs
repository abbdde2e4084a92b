//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → cors.rs (origin allow-list, preflight)
//!     → headers.rs (fixed security response headers)
//!     → limits.rs (request body ceiling)
//!     → Pass to routing
//! ```
//!
//! # Design Decisions
//! - Fail closed: oversized bodies never reach a handler
//! - Header values are fixed, not configurable

pub mod cors;
pub mod headers;
pub mod limits;
