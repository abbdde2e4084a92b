//! Request pipeline composition.
//!
//! # Data Flow
//! ```text
//! Inbound request (outermost first):
//!     → RequestId        (assign / keep X-Request-Id, echo on response)
//!     → AccessLog        (log line written after the inner stages return)
//!     → Recovery         (panic → 500)
//!     → Timeout          (deadline → 504)
//!     → Cors             (allow-list, preflight)
//!     → SecurityHeaders  (fixed response headers)
//!     → BodyLimit        (413 above the ceiling)
//!     → Route table
//! ```
//!
//! # Design Decisions
//! - The order lives in one list, built once at assembly time
//! - Recovery wraps everything that can fault, so no panic escapes unlogged
//! - The body ceiling sits last so it gates exactly the handler's read

use std::time::Duration;

use axum::{middleware, Router};

use crate::config::ServerConfig;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::observability::access_log::access_log_middleware;
use crate::resilience::recovery::recovery_layer;
use crate::resilience::timeouts::{with_request_timeout, REQUEST_TIMEOUT};
use crate::security::cors::cors_layer;
use crate::security::headers::with_security_headers;
use crate::security::limits::{with_body_limit, MAX_BODY_BYTES};

/// One interceptor in the request pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    RequestId,
    AccessLog,
    Recovery,
    Timeout(Duration),
    Cors(Vec<String>),
    SecurityHeaders,
    BodyLimit(usize),
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::RequestId => "request_id",
            Stage::AccessLog => "access_log",
            Stage::Recovery => "recovery",
            Stage::Timeout(_) => "timeout",
            Stage::Cors(_) => "cors",
            Stage::SecurityHeaders => "security_headers",
            Stage::BodyLimit(_) => "body_limit",
        }
    }

    /// Wrap `router` so this stage runs before it.
    fn wrap<S>(self, router: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        match self {
            Stage::RequestId => router
                .layer(propagate_request_id_layer())
                .layer(set_request_id_layer()),
            Stage::AccessLog => router.layer(middleware::from_fn(access_log_middleware)),
            Stage::Recovery => router.layer(recovery_layer()),
            Stage::Timeout(limit) => with_request_timeout(router, limit),
            Stage::Cors(origins) => router.layer(cors_layer(&origins)),
            Stage::SecurityHeaders => with_security_headers(router),
            Stage::BodyLimit(limit) => with_body_limit(router, limit),
        }
    }
}

/// Ordered list of stages, outermost first.
#[derive(Debug, Clone)]
pub struct MiddlewareStack {
    stages: Vec<Stage>,
}

impl MiddlewareStack {
    pub fn new(stages: Vec<Stage>) -> Self {
        Self { stages }
    }

    /// The production pipeline for the given server settings.
    pub fn standard(config: &ServerConfig) -> Self {
        Self::new(vec![
            Stage::RequestId,
            Stage::AccessLog,
            Stage::Recovery,
            Stage::Timeout(REQUEST_TIMEOUT),
            Stage::Cors(config.cors_origins.clone()),
            Stage::SecurityHeaders,
            Stage::BodyLimit(MAX_BODY_BYTES),
        ])
    }

    /// Replace the deadline of the timeout stage.
    pub fn with_timeout(mut self, limit: Duration) -> Self {
        for stage in &mut self.stages {
            if let Stage::Timeout(current) = stage {
                *current = limit;
            }
        }
        self
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Compose the stages around `router`.
    ///
    /// `Router::layer` wraps from the inside out, so the list is applied in
    /// reverse to leave the first stage outermost.
    pub fn apply<S>(self, router: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        self.stages
            .into_iter()
            .rev()
            .fold(router, |router, stage| stage.wrap(router))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn test_standard_order() {
        let config = AppConfig::default();
        let stack = MiddlewareStack::standard(&config.server);
        let names: Vec<_> = stack.stages().iter().map(Stage::name).collect();

        assert_eq!(
            names,
            vec![
                "request_id",
                "access_log",
                "recovery",
                "timeout",
                "cors",
                "security_headers",
                "body_limit",
            ]
        );
    }

    #[test]
    fn test_standard_values() {
        let config = AppConfig::default();
        let stack = MiddlewareStack::standard(&config.server);

        assert!(stack.stages().contains(&Stage::Timeout(Duration::from_secs(60))));
        assert!(stack.stages().contains(&Stage::BodyLimit(10 * 1024 * 1024)));
        assert!(stack
            .stages()
            .contains(&Stage::Cors(vec!["http://localhost:3000".to_string()])));
    }

    #[test]
    fn test_with_timeout_replaces_deadline() {
        let config = AppConfig::default();
        let stack = MiddlewareStack::standard(&config.server).with_timeout(Duration::from_millis(5));

        assert!(stack.stages().contains(&Stage::Timeout(Duration::from_millis(5))));
        assert_eq!(stack.stages().len(), 7);
    }
}
