//! Rides HTTP microservice binary.
//!
//! # Configuration
//!
//! - `RIDES_DATABASE_PATH` - SQLite database file (default: `:memory:`)
//! - `RIDES_STATUS_POLICY` - `compat` (default) or `mapped`
//! - `SERVICE_PORT` - HTTP port (default: 8010)
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default) or text
//! - `SERVICE_NAME` - Name on the root span and in health responses (default: rides)
//! - `METRICS_ENABLED`, `METRICS_PATH` - Prometheus endpoint settings

use std::net::SocketAddr;

use tracing::{error, info};

use rides_service_shared::{
    init_logging, init_metrics, AppState, LoggingConfig, MetricsConfig, ServiceConfig,
    DEFAULT_SERVICE_NAME,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logging_config = LoggingConfig::from_env(DEFAULT_SERVICE_NAME);
    init_logging(&logging_config)?;
    let service_span = logging_config.service_span();

    let metrics_config = MetricsConfig::from_env();
    if let Err(e) = init_metrics(&metrics_config) {
        // Log but don't fail - metrics are optional
        tracing::warn!(error = %e, "failed to initialize metrics, continuing without metrics");
    }

    let config = ServiceConfig::from_env();
    info!(
        database_path = %config.database_path,
        port = config.port,
        status_policy = ?config.status_policy,
        "starting rides service"
    );

    let state = AppState::open(&config.database_path, config.status_policy, &service_span)
        .map_err(|e| {
            error!(error = %e, path = %config.database_path, "failed to load application state");
            e
        })?
        .with_service_name(&logging_config.service);

    let app = rides_service::router(state, &metrics_config.path);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(addr = %addr, "listening on");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
