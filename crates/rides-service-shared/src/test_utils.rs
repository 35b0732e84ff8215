//! Test utilities for handler testing.
//!
//! Each call to [`test_state`] opens its own in-memory database, so tests
//! never observe each other's rides.

use serde_json::{json, Value};
use tracing::Span;

use crate::error::StatusPolicy;
use crate::state::AppState;

/// Fresh state over an empty in-memory store with the compat status policy.
pub fn test_state() -> AppState {
    test_state_with_policy(StatusPolicy::Compat)
}

/// Fresh state over an empty in-memory store.
///
/// # Panics
///
/// Panics if the in-memory database cannot be created.
pub fn test_state_with_policy(policy: StatusPolicy) -> AppState {
    AppState::open(":memory:", policy, &Span::none())
        .unwrap_or_else(|e| panic!("failed to open in-memory ride store: {}", e))
}

/// A creation payload that passes every validation rule.
pub fn valid_ride_payload() -> Value {
    json!({
        "start_lat": 50,
        "start_long": 50,
        "end_lat": 50,
        "end_long": 50,
        "rider_name": "dummy",
        "driver_name": "dummy",
        "driver_vehicle": "dummy",
    })
}

/// [`valid_ride_payload`] with one field replaced.
pub fn ride_payload_with(field: &str, value: Value) -> Value {
    let mut payload = valid_ride_payload();
    payload[field] = value;
    payload
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_states_are_isolated() {
        let first = test_state();
        let second = test_state();

        let request = serde_json::from_value(valid_ride_payload()).unwrap();
        rides_lib::create_ride(first.store(), &request).unwrap();

        assert_eq!(first.store().find_all().unwrap().len(), 1);
        assert!(second.store().find_all().unwrap().is_empty());
    }

    #[test]
    fn test_ride_payload_with_replaces_field() {
        let payload = ride_payload_with("rider_name", json!(""));
        assert_eq!(payload["rider_name"], "");
        assert_eq!(payload["driver_name"], "dummy");
    }
}
