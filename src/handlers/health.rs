//! Liveness and welcome endpoints.

use std::time::SystemTime;

use axum::Json;
use serde::Serialize;

use crate::http::response::MessageBody;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    /// RFC 3339, UTC.
    pub timestamp: String,
}

/// Always healthy; deliberately independent of the database.
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        timestamp: humantime::format_rfc3339_seconds(SystemTime::now()).to_string(),
    })
}

pub async fn welcome() -> Json<MessageBody> {
    Json(MessageBody::new("Welcome to the 30Budget API!"))
}
