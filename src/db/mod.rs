//! Database subsystem.
//!
//! # Data Flow
//! ```text
//! DatabaseConfig
//!     → pool.rs (size bounds, connect, ping)
//!     → migrations.rs (apply pending migrations when enabled)
//!     → PgPool shared via AppState
//! ```
//!
//! # Design Decisions
//! - Any failure here is fatal at startup; there is no retry
//! - The pool is closed explicitly during shutdown

pub mod migrations;
pub mod pool;

use thiserror::Error;

pub use migrations::run_migrations;
pub use pool::{connect, pool_options};

/// Error type for database setup.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("invalid database URL: {0}")]
    Url(#[source] sqlx::Error),

    #[error("failed to connect to database: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("failed to ping database: {0}")]
    Ping(#[source] sqlx::Error),

    #[error("database ping timed out after {0:?}")]
    PingTimeout(std::time::Duration),

    #[error("failed to load migrations from {path}: {source}")]
    MigrationSource {
        path: String,
        #[source]
        source: sqlx::migrate::MigrateError,
    },

    #[error("failed to run migrations: {0}")]
    Migrate(#[source] sqlx::migrate::MigrateError),
}
