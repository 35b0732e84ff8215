//! Health check handlers.
//!
//! `/health` answers with the plain-text `Healthy` diagnostic. `/health/live`
//! and `/health/ready` return JSON status responses for liveness and
//! readiness probes; readiness pings the ride store.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Health status response for liveness and readiness probes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Status indicator: "ok" or "not_ready: <reason>".
    pub status: String,

    /// Service name for identification.
    pub service: String,

    /// Service version from build-time.
    pub version: String,

    /// Whether the ride store answered a ping (for readiness check).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_ready: Option<bool>,
}

impl HealthStatus {
    /// Create a healthy liveness status.
    pub fn alive(service: &str, version: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            store_ready: None,
        }
    }

    /// Create a ready status.
    pub fn ready(service: &str, version: &str) -> Self {
        Self {
            store_ready: Some(true),
            ..Self::alive(service, version)
        }
    }

    /// Create a not-ready status.
    pub fn not_ready(service: &str, version: &str, reason: &str) -> Self {
        Self {
            status: format!("not_ready: {}", reason),
            service: service.to_string(),
            version: version.to_string(),
            store_ready: Some(false),
        }
    }
}

/// Plain-text diagnostic handler.
///
/// ```text
/// GET /health
/// Healthy
/// ```
pub async fn health() -> &'static str {
    "Healthy"
}

/// Liveness probe handler.
///
/// Returns 200 OK if the service is running. The store is not consulted.
///
/// ```text
/// GET /health/live
/// {"status":"ok","service":"rides","version":"0.1.0"}
/// ```
pub async fn health_live(State(state): State<AppState>) -> impl IntoResponse {
    let status = HealthStatus::alive(state.service_name(), env!("CARGO_PKG_VERSION"));
    (StatusCode::OK, Json(status))
}

/// Readiness probe handler.
///
/// Returns 200 OK when the ride store answers a ping, 503 otherwise.
pub async fn health_ready(State(state): State<AppState>) -> Response {
    let service = state.service_name();
    let version = env!("CARGO_PKG_VERSION");

    match state.with_store(|store| store.ping()).await {
        Ok(()) => (StatusCode::OK, Json(HealthStatus::ready(service, version))).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "ride store failed readiness ping");
            let status = HealthStatus::not_ready(service, version, "store unavailable");
            (StatusCode::SERVICE_UNAVAILABLE, Json(status)).into_response()
        }
    }
}
