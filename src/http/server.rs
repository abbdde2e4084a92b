//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with every route and fallback
//! - Wrap it in the ordered middleware stack
//! - Serve on a bound listener until the shutdown future resolves
//! - Apply read, write and idle deadlines to every connection

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::{extract::ConnectInfo, http::Request, Router};
use hyper::{body::Incoming, service::service_fn};
use hyper_util::{
    rt::{TokioExecutor, TokioIo, TokioTimer},
    server::{conn::auto, graceful::GracefulShutdown},
};
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower::ServiceExt;

use crate::config::AppConfig;
use crate::handlers::fallback;
use crate::http::middleware::MiddlewareStack;
use crate::net::{ConnectionTimeouts, InFlight, TimedStream};
use crate::routing::api_routes;

/// Pause after a failed accept, typically file descriptor exhaustion.
const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_secs(1);

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,

    /// `None` when running without a database (tests, tooling).
    pub db: Option<PgPool>,
}

impl AppState {
    pub fn new(config: Arc<AppConfig>, db: Option<PgPool>) -> Self {
        Self { config, db }
    }
}

/// Build the complete application: routes, fallbacks and the standard stack.
pub fn build_router(state: AppState) -> Router {
    let stack = MiddlewareStack::standard(&state.config.server);
    build_router_with(stack, state)
}

/// Build the application with an explicit middleware stack.
pub fn build_router_with(stack: MiddlewareStack, state: AppState) -> Router {
    let routes = api_routes()
        .fallback(fallback::not_found)
        .method_not_allowed_fallback(fallback::method_not_allowed)
        .with_state(state);

    stack.apply(routes)
}

/// HTTP server for the API.
pub struct HttpServer {
    router: Router,
    timeouts: ConnectionTimeouts,
}

impl HttpServer {
    /// Create a server for the full application.
    pub fn new(state: AppState) -> Self {
        Self::from_router(build_router(state))
    }

    /// Create a server around an already assembled router.
    pub fn from_router(router: Router) -> Self {
        Self {
            router,
            timeouts: ConnectionTimeouts::default(),
        }
    }

    /// Replace the per-connection timeouts.
    pub fn with_timeouts(mut self, timeouts: ConnectionTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Serve on `listener` until `shutdown` resolves, then drain.
    ///
    /// The listener is closed as soon as `shutdown` resolves. Returns once
    /// every open connection has finished.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            read_timeout = ?self.timeouts.read,
            write_timeout = ?self.timeouts.write,
            idle_timeout = ?self.timeouts.idle,
            "HTTP server starting"
        );

        let mut builder = auto::Builder::new(TokioExecutor::new());
        builder
            .http1()
            .timer(TokioTimer::new())
            .header_read_timeout(self.timeouts.read)
            .keep_alive(true);

        let graceful = GracefulShutdown::new();
        tokio::pin!(shutdown);

        loop {
            let (stream, remote) = tokio::select! {
                accepted = listener.accept() => match accepted {
                    Ok(conn) => conn,
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to accept connection");
                        tokio::time::sleep(ACCEPT_ERROR_BACKOFF).await;
                        continue;
                    }
                },
                () = &mut shutdown => break,
            };

            let in_flight = InFlight::new();
            let io = TokioIo::new(TimedStream::new(stream, self.timeouts, in_flight.clone()));

            let router = self.router.clone();
            let service = service_fn(move |mut req: Request<Incoming>| {
                req.extensions_mut().insert(ConnectInfo(remote));
                let guard = in_flight.track();
                let router = router.clone();
                async move {
                    let response = router.oneshot(req).await;
                    drop(guard);
                    response
                }
            });

            let conn = graceful.watch(builder.serve_connection_with_upgrades(io, service).into_owned());
            tokio::spawn(async move {
                if let Err(e) = conn.await {
                    tracing::debug!(peer = %remote, error = %e, "Connection closed with error");
                }
            });
        }

        drop(listener);
        tracing::info!("HTTP server draining connections");
        graceful.shutdown().await;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
