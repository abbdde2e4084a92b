//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! .env.development (optional)
//!     → loader.rs (merge into process environment)
//!     → schema.rs (resolve every field, lenient parsing)
//!     → AppConfig (immutable)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload path
//! - Every field has a default so the process starts with an empty environment
//! - Malformed values fall back to their default instead of failing startup

pub mod loader;
pub mod schema;

pub use loader::{load, load_from, ConfigError, ENV_FILE};
pub use schema::{
    AppConfig, AppUrlConfig, DatabaseConfig, JwtConfig, RedisConfig, ServerConfig, StorageConfig,
};
