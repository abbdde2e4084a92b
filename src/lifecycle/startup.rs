//! Startup orchestration and the serve loop.
//!
//! # Responsibilities
//! - Open the database pool and apply migrations when enabled
//! - Assemble the router and bind the listener
//! - Serve until a termination signal, then drain within the grace period
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Subsystems initialize in order, not concurrently
//! - Listeners start last (traffic only when ready)

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use crate::config::AppConfig;
use crate::db;
use crate::http::{AppState, HttpServer};
use crate::lifecycle::shutdown::Shutdown;
use crate::lifecycle::signals::shutdown_signal;
use crate::lifecycle::state::{Lifecycle, LifecycleState};
use crate::lifecycle::LifecycleError;

/// How long in-flight requests may run after a shutdown signal.
pub const SHUTDOWN_GRACE_PERIOD: Duration = Duration::from_secs(30);

/// Run the service from a loaded configuration until it stops.
///
/// The logger must already be installed. Returns `Ok` only after a clean,
/// signal-initiated shutdown.
pub async fn run(config: AppConfig) -> Result<(), LifecycleError> {
    let mut lifecycle = Lifecycle::new();
    lifecycle.transition(LifecycleState::Starting);

    let config = Arc::new(config);

    let pool = match db::connect(&config.database).await {
        Ok(pool) => pool,
        Err(e) => return Err(fail(&mut lifecycle, e.into())),
    };

    if config.auto_migrate {
        if let Err(e) = db::run_migrations(&pool, &config.migrations_path).await {
            pool.close().await;
            return Err(fail(&mut lifecycle, e.into()));
        }
        tracing::info!("Database migrations completed successfully");
    }

    let state = AppState::new(config, Some(pool.clone()));
    let outcome = bind_and_serve(
        &mut lifecycle,
        state,
        shutdown_signal(),
        SHUTDOWN_GRACE_PERIOD,
    )
    .await;

    pool.close().await;
    tracing::info!("Database connections closed");

    outcome
}

/// Bind the configured address and serve `state` until `signal` resolves.
///
/// `lifecycle` must be in `Starting`. A bind failure moves it to `Fatal`.
pub async fn bind_and_serve<F>(
    lifecycle: &mut Lifecycle,
    state: AppState,
    signal: F,
    grace: Duration,
) -> Result<(), LifecycleError>
where
    F: Future<Output = ()>,
{
    let address = state.config.server.bind_address();
    let listener = match TcpListener::bind(&address).await {
        Ok(listener) => listener,
        Err(source) => return Err(fail(lifecycle, LifecycleError::Bind { address, source })),
    };

    tracing::info!(
        address = %address,
        environment = %state.config.server.environment,
        "Starting server"
    );

    serve_until(lifecycle, HttpServer::new(state), listener, signal, grace).await
}

/// Serve on `listener` until `signal` resolves, then drain for at most `grace`.
///
/// Moves `lifecycle` through `Serving` and `ShuttingDown` to `Stopped`, or to
/// `Fatal` when the server fails or the drain overruns.
pub async fn serve_until<F>(
    lifecycle: &mut Lifecycle,
    server: HttpServer,
    listener: TcpListener,
    signal: F,
    grace: Duration,
) -> Result<(), LifecycleError>
where
    F: Future<Output = ()>,
{
    let shutdown = Shutdown::new();
    let mut task = tokio::spawn(server.run(listener, shutdown.wait()));
    lifecycle.transition(LifecycleState::Serving);

    tokio::select! {
        () = signal => {}
        joined = &mut task => {
            let err = match joined {
                Ok(Ok(())) => LifecycleError::ServerExited,
                Ok(Err(e)) => LifecycleError::Serve(e),
                Err(e) => LifecycleError::ServerTask(e),
            };
            return Err(fail(lifecycle, err));
        }
    }

    lifecycle.transition(LifecycleState::ShuttingDown);
    tracing::info!(grace_period = ?grace, "Shutting down server...");
    shutdown.trigger();

    match tokio::time::timeout(grace, &mut task).await {
        Ok(Ok(Ok(()))) => {
            lifecycle.transition(LifecycleState::Stopped);
            tracing::info!("Server stopped gracefully");
            Ok(())
        }
        Ok(Ok(Err(e))) => Err(fail(lifecycle, LifecycleError::Serve(e))),
        Ok(Err(e)) => Err(fail(lifecycle, LifecycleError::ServerTask(e))),
        Err(_) => {
            task.abort();
            Err(fail(lifecycle, LifecycleError::ForcedShutdown(grace)))
        }
    }
}

fn fail(lifecycle: &mut Lifecycle, err: LifecycleError) -> LifecycleError {
    tracing::error!(state = %lifecycle.state(), error = %err, "Fatal lifecycle error");
    lifecycle.transition(LifecycleState::Fatal);
    err
}
