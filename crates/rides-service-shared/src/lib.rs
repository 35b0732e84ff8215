//! Shared infrastructure for the rides HTTP service.
//!
//! This crate provides the HTTP glue around `rides-lib`:
//!
//! - [`AppState`]: The shared ride store and status policy
//! - [`health`]: Health check handlers
//! - [`ErrorResponse`]: `{error_code, message}` error bodies
//! - [`ServiceConfig`]: Port, database path and status policy from the environment
//! - [`metrics`]: Prometheus metrics infrastructure
//! - [`logging`]: Structured JSON logging setup
//! - [`middleware`]: Request correlation and metrics middleware
//! - Request types with validation for each endpoint
//!
//! # Architecture
//!
//! Handlers stay thin; ride rules live in `rides-lib`:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  axum Handler                                               │
//! │  - Parse request JSON / query / path                        │
//! │  - Validate parameters                                      │
//! │  - Call rides-lib on the blocking pool                      │
//! │  - Format response                                          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Testing Support
//!
//! The [`test_utils`] module provides fresh in-memory state and sample
//! payloads. Enable the `test-utils` feature to access it from dependent
//! crates.

#![deny(warnings)]

pub mod config;
mod error;
mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod request;
mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::ServiceConfig;
pub use error::{from_lib_error, ErrorCode, ErrorResponse, StatusPolicy, SERVER_ERROR_MESSAGE};
pub use health::{health, health_live, health_ready, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::{
    init_metrics, metrics_handler, record_ride_created, record_ride_rejected, record_rides_listed,
    MetricsConfig, MetricsError,
};
pub use middleware::{extract_or_generate_request_id, RequestId, RequestLayer, REQUEST_ID_HEADER};
pub use request::{ListRidesQuery, RidePath, Validate};
pub use state::{AppState, AppStateError, DEFAULT_SERVICE_NAME};
