//! 30Budget API server.
//!
//! Boot order: configuration → logger → database pool (+ migrations) →
//! middleware and routes → listener → wait for SIGINT/SIGTERM → drain.
//!
//! Exits non-zero on any startup fault or forced shutdown.

use budget_api::{config, lifecycle, observability::logging};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = logging::with_bootstrap_logger(config::load)?;

    // Held until main returns so buffered records are flushed on every path.
    let _log_guard = logging::init(&config.server)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = %config.server.environment,
        "budget-api starting"
    );
    tracing::info!(
        allowed_origins = ?config.server.cors_origins,
        "CORS configuration"
    );
    tracing::debug!(config = ?config, "Configuration loaded");

    lifecycle::run(config).await?;

    Ok(())
}
