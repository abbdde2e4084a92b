//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request (method, path)
//!     → router.rs (static route table)
//!     → params.rs (typed path parameters)
//!     → handlers::*
//!
//! No match:
//!     unknown path        → 404 JSON
//!     known path, method  → 405 JSON
//! ```
//!
//! # Design Decisions
//! - Routes registered once at startup, immutable at runtime
//! - Path parameters extracted into structs, never looked up by string
//! - Deterministic: same input always matches same route

pub mod params;
pub mod router;

pub use params::{UserPath, UserResourcePath};
pub use router::{api_routes, API_PREFIX};
