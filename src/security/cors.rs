//! Cross-origin resource sharing policy.
//!
//! Origins come from configuration; methods, headers and the preflight cache
//! duration are fixed. A configured `*` mirrors the caller's origin, since a
//! literal wildcard cannot be combined with credentials.

use std::time::Duration;

use axum::http::{header, HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// How long browsers may cache a preflight result.
pub const PREFLIGHT_MAX_AGE: Duration = Duration::from_secs(300);

const X_CSRF_TOKEN: HeaderName = HeaderName::from_static("x-csrf-token");

/// Build the CORS stage for the given origin allow-list.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(allow_origin(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::ACCEPT,
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            X_CSRF_TOKEN,
        ])
        .expose_headers([header::LINK])
        .allow_credentials(true)
        .max_age(PREFLIGHT_MAX_AGE)
}

fn allow_origin(origins: &[String]) -> AllowOrigin {
    if origins.iter().any(|o| o == "*") {
        return AllowOrigin::mirror_request();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    AllowOrigin::list(allowed)
}
