//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum::serve, graceful drain)
//!     → middleware/ (ordered interceptor stack)
//!     → request.rs (request ID assignment)
//!     → routing + handlers
//!     → response.rs (JSON bodies, error mapping)
//!     → Send to client
//! ```

pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use middleware::{MiddlewareStack, Stage};
pub use request::X_REQUEST_ID;
pub use response::{ApiError, MessageBody};
pub use server::{build_router, build_router_with, AppState, HttpServer};
