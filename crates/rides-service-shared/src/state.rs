//! Application state for the rides service.
//!
//! This module provides the shared state structure that axum handlers use to
//! reach the ride store and the configured status policy.

use std::path::Path;
use std::sync::Arc;

use rides_lib::{Error as LibError, RideStore, SqliteRideStore};
use tracing::Span;

use crate::error::StatusPolicy;

/// Service name reported by the health probes unless one is configured.
pub const DEFAULT_SERVICE_NAME: &str = "rides";

/// Error during application state initialization.
#[derive(Debug)]
pub enum AppStateError {
    /// Failed to open the ride database or apply its schema.
    StoreOpen { path: String, source: LibError },
}

impl std::fmt::Display for AppStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StoreOpen { path, source } => {
                write!(f, "failed to open ride store at {}: {}", path, source)
            }
        }
    }
}

impl std::error::Error for AppStateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::StoreOpen { source, .. } => Some(source),
        }
    }
}

/// Shared application state for all axum handlers.
///
/// This struct is cheaply cloneable (using `Arc` internally) and should be
/// shared via axum's `State` extractor.
///
/// # Example
///
/// ```ignore
/// use axum::{Router, routing::get, extract::State};
/// use rides_service_shared::{AppState, StatusPolicy};
///
/// async fn handler(State(state): State<AppState>) {
///     let rides = state.with_store(|store| store.find_all()).await;
///     // ... use rides
/// }
///
/// let state = AppState::open(":memory:", StatusPolicy::Compat, &tracing::Span::none()).unwrap();
/// let app = Router::new()
///     .route("/rides", get(handler))
///     .with_state(state);
/// ```
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Arc<dyn RideStore>,
    status_policy: StatusPolicy,
    service_name: String,
}

impl AppState {
    /// Open the SQLite store at `db_path` (or `:memory:`), creating the schema
    /// when needed.
    ///
    /// Store events are recorded under a `ride_store` span whose parent is
    /// `parent`.
    pub fn open(
        db_path: impl AsRef<Path>,
        status_policy: StatusPolicy,
        parent: &Span,
    ) -> Result<Self, AppStateError> {
        let db_path = db_path.as_ref();

        tracing::info!(path = %db_path.display(), "opening ride store");
        let store = SqliteRideStore::open(db_path)
            .map_err(|source| AppStateError::StoreOpen {
                path: db_path.display().to_string(),
                source,
            })?
            .with_span(tracing::info_span!(parent: parent, "ride_store", path = %db_path.display()));

        Ok(Self::from_store(Arc::new(store), status_policy))
    }

    /// Create application state around an existing store.
    ///
    /// This is useful for testing with a custom [`RideStore`].
    pub fn from_store(store: Arc<dyn RideStore>, status_policy: StatusPolicy) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                store,
                status_policy,
                service_name: DEFAULT_SERVICE_NAME.to_string(),
            }),
        }
    }

    /// Set the name the health probes report.
    pub fn with_service_name(self, service_name: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                store: Arc::clone(&self.inner.store),
                status_policy: self.inner.status_policy,
                service_name: service_name.into(),
            }),
        }
    }

    pub fn service_name(&self) -> &str {
        &self.inner.service_name
    }

    /// Access the ride store.
    pub fn store(&self) -> &dyn RideStore {
        self.inner.store.as_ref()
    }

    /// The policy used to pick status codes for error bodies.
    pub fn status_policy(&self) -> StatusPolicy {
        self.inner.status_policy
    }

    /// Run a store operation on the blocking pool and await its outcome.
    ///
    /// A task that panics or is cancelled is reported as
    /// [`LibError::StoreUnavailable`].
    pub async fn with_store<T, F>(&self, operation: F) -> Result<T, LibError>
    where
        F: FnOnce(&dyn RideStore) -> rides_lib::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.inner.store);
        tokio::task::spawn_blocking(move || operation(store.as_ref()))
            .await
            .map_err(|e| LibError::StoreUnavailable {
                message: format!("store task failed: {e}"),
            })?
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("status_policy", &self.inner.status_policy)
            .field("service_name", &self.inner.service_name)
            .finish_non_exhaustive()
    }
}
