//! Rides HTTP microservice.
//!
//! # Endpoints
//!
//! - `POST /rides` - Validate and persist a ride, returning the stored row
//! - `GET /rides` - List rides, paginated with `page` and `limit`
//! - `GET /rides/{id}` - Fetch the ride with the given identifier
//! - `GET /health` - Plain-text diagnostic
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe (pings the store)
//! - `GET /metrics` - Prometheus metrics endpoint

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::Value;
use tracing::{error, info};

use rides_lib::{get_ride, list_rides, persist_ride, Error as LibError, RideRequest};
use rides_service_shared::{
    extract_or_generate_request_id, from_lib_error, health, health_live, health_ready,
    metrics_handler, record_ride_created, record_ride_rejected, record_rides_listed, AppState,
    ErrorResponse, ListRidesQuery, RequestLayer, RidePath, Validate,
};

/// Message returned when the creation body is not a JSON object.
pub const INVALID_BODY_MESSAGE: &str = "Request body must be a JSON object";

/// Message returned when the listing query string cannot be decoded.
pub const INVALID_QUERY_MESSAGE: &str = "Page and limit must be positive integers";

/// Build the service router.
pub fn router(state: AppState, metrics_path: &str) -> Router {
    Router::new()
        .route("/rides", get(list_rides_handler).post(create_ride_handler))
        .route("/rides/{id}", get(get_ride_handler))
        .route(metrics_path, get(metrics_handler))
        .route("/health", get(health))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .layer(RequestLayer)
        .with_state(state)
}

/// Handle POST /rides requests.
async fn create_ride_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let request_id = extract_or_generate_request_id(&headers);

    let request = match body {
        Ok(Json(value @ Value::Object(_))) => serde_json::from_value::<RideRequest>(value).ok(),
        _ => None,
    };
    let Some(request) = request else {
        return reject(&state, "create", ErrorResponse::validation(INVALID_BODY_MESSAGE));
    };

    let ride = match request.validate() {
        Ok(ride) => ride,
        Err(body) => {
            info!(request_id = %request_id, reason = %body.message, "ride rejected");
            return reject(&state, "create", body);
        }
    };

    match state.with_store(move |store| persist_ride(store, &ride)).await {
        Ok(ride) => {
            record_ride_created();
            info!(request_id = %request_id, ride_id = ride.ride_id, "ride created");
            (StatusCode::OK, Json(vec![ride])).into_response()
        }
        Err(e) => reject_lib(&state, "create", request_id.as_str(), &e),
    }
}

/// Handle GET /rides requests.
async fn list_rides_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<ListRidesQuery>, QueryRejection>,
) -> Response {
    let request_id = extract_or_generate_request_id(&headers);

    let Ok(Query(query)) = query else {
        return reject(&state, "list", ErrorResponse::validation(INVALID_QUERY_MESSAGE));
    };
    let page_request = match query.validate() {
        Ok(page_request) => page_request,
        Err(body) => return reject(&state, "list", body),
    };

    match state
        .with_store(move |store| list_rides(store, page_request))
        .await
    {
        Ok(page) => {
            record_rides_listed(page.results.len());
            info!(
                request_id = %request_id,
                page = page_request.page(),
                limit = page_request.limit(),
                returned = page.results.len(),
                "rides listed"
            );
            (StatusCode::OK, Json(page)).into_response()
        }
        Err(e) => reject_lib(&state, "list", request_id.as_str(), &e),
    }
}

/// Handle GET /rides/{id} requests.
async fn get_ride_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(path): Path<RidePath>,
) -> Response {
    let request_id = extract_or_generate_request_id(&headers);

    let Some(id) = path.ride_id() else {
        return reject(&state, "get", ErrorResponse::rides_not_found());
    };

    match state.with_store(move |store| get_ride(store, id)).await {
        Ok(rides) => (StatusCode::OK, Json(rides)).into_response(),
        Err(e) => reject_lib(&state, "get", request_id.as_str(), &e),
    }
}

fn reject(state: &AppState, operation: &'static str, body: ErrorResponse) -> Response {
    record_ride_rejected(operation, body.error_code.as_str());
    body.with_policy(state.status_policy()).into_response()
}

/// Turn a library error into a response, logging store failures first so the
/// cause is visible to operators but not to the caller.
fn reject_lib(
    state: &AppState,
    operation: &'static str,
    request_id: &str,
    error: &LibError,
) -> Response {
    if error.is_store_failure() {
        error!(request_id = %request_id, operation, error = %error, "ride store operation failed");
    }
    reject(state, operation, from_lib_error(error))
}
