//! 30Budget API
//!
//! HTTP scaffold for a personal budgeting service, built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client Request
//!   ──────────────▶ ┌────────────────────────────── middleware ───────────────────────────────┐
//!                   │ request id → access log → recovery → timeout → cors → headers → limit    │
//!                   └──────────────────────────────────┬───────────────────────────────────────┘
//!                                                      ▼
//!                                         ┌────────────────────────┐
//!                                         │ routing (route table)  │
//!                                         └───────────┬────────────┘
//!                                                     ▼
//!                                         ┌────────────────────────┐      ┌──────────┐
//!                                         │ handlers (501 stubs)   │─ ─ ─▶│ db pool  │
//!                                         └────────────────────────┘      └──────────┘
//!
//!   Cross-cutting: config (env), observability (tracing), lifecycle (startup/shutdown)
//! ```

// Core subsystems
pub mod config;
pub mod db;
pub mod handlers;
pub mod http;
pub mod net;
pub mod routing;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod security;

pub use config::AppConfig;
pub use http::{build_router, AppState, HttpServer};
pub use lifecycle::{Lifecycle, LifecycleError, LifecycleState, Shutdown};
