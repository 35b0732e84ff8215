//! Tracing subscriber setup for the rides service.
//!
//! `init_logging` runs once in the binary. Everything below it receives the
//! span its events belong to: the binary derives a root span from
//! [`LoggingConfig::service_span`] and hands children of it to the store
//! (see [`rides_lib::SqliteRideStore::with_span`]).
//!
//! Variables: `LOG_FORMAT` (`json` or `text`), `RUST_LOG` (filter directives,
//! default `info`), `SERVICE_NAME` (overrides the name the binary passes in).

use tracing::Span;
use tracing_subscriber::{fmt, prelude::*, util::TryInitError, EnvFilter};

const DEFAULT_FILTER: &str = "info";

/// Output encoding for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per line with event fields flattened to the top level.
    #[default]
    Json,
    /// Compact single-line text for local runs.
    Text,
}

impl LogFormat {
    /// `text` and `pretty` select [`LogFormat::Text`]; anything else is JSON.
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("text") || value.eq_ignore_ascii_case("pretty") {
            LogFormat::Text
        } else {
            LogFormat::Json
        }
    }
}

/// Resolved logging settings for one service process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub format: LogFormat,
    /// `EnvFilter` directives, e.g. `info,rides_lib=debug`.
    pub filter: String,
    /// Name recorded on the root span and reported by the health probes.
    pub service: String,
}

impl LoggingConfig {
    /// Defaults for `service`: JSON output at `info`.
    pub fn for_service(service: impl Into<String>) -> Self {
        Self {
            format: LogFormat::default(),
            filter: DEFAULT_FILTER.to_string(),
            service: service.into(),
        }
    }

    /// Read the logging variables from the process environment.
    pub fn from_env(service: impl Into<String>) -> Self {
        Self::from_lookup(service, |name| std::env::var(name).ok())
    }

    /// Read the logging variables through `lookup`. Blank values are ignored.
    pub fn from_lookup(
        service: impl Into<String>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let read = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::for_service(service);

        Self {
            format: read("LOG_FORMAT")
                .map(|v| LogFormat::parse(v.trim()))
                .unwrap_or(defaults.format),
            filter: read("RUST_LOG").unwrap_or(defaults.filter),
            service: read("SERVICE_NAME").unwrap_or(defaults.service),
        }
    }

    /// Root span for the process, carrying the service name.
    pub fn service_span(&self) -> Span {
        tracing::info_span!("service", service = %self.service)
    }
}

/// Install the global subscriber.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_new(&config.filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let registry = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Text => registry.with(fmt::layer().compact()).try_init(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_current_span(true)
                    .with_span_list(false),
            )
            .try_init(),
    }
}
