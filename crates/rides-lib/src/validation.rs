//! Field validation for ride creation payloads.
//!
//! Payload fields are kept in their transport representation so the rules
//! can decide what counts as a number or a string. Rules run in a fixed
//! order and only the first failure is reported:
//!
//! 1. start coordinates within bounds
//! 2. end coordinates within bounds
//! 3. rider name
//! 4. driver name
//! 5. driver vehicle

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::ride::NewRide;

const LATITUDE_BOUND: f64 = 90.0;
const LONGITUDE_BOUND: f64 = 180.0;

/// Ride creation payload as received from the caller.
///
/// Absent fields deserialize to `null` and fail validation like any other
/// value of the wrong type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RideRequest {
    #[serde(default)]
    pub start_lat: Value,
    #[serde(default)]
    pub start_long: Value,
    #[serde(default)]
    pub end_lat: Value,
    #[serde(default)]
    pub end_long: Value,
    #[serde(default)]
    pub rider_name: Value,
    #[serde(default)]
    pub driver_name: Value,
    #[serde(default)]
    pub driver_vehicle: Value,
}

/// The first rule a creation payload violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Start latitude and longitude must be between -90 - 90 and -180 to 180 degrees respectively")]
    StartOutOfBounds,

    #[error("End latitude and longitude must be between -90 - 90 and -180 to 180 degrees respectively")]
    EndOutOfBounds,

    #[error("Rider name must be a non empty string")]
    RiderName,

    #[error("Driver name must be a non empty string")]
    DriverName,

    #[error("Driver vehicle must be a non empty string")]
    DriverVehicle,
}

impl ValidationError {
    /// Short label used for metrics and log fields.
    pub fn reason(&self) -> &'static str {
        match self {
            ValidationError::StartOutOfBounds => "start_out_of_bounds",
            ValidationError::EndOutOfBounds => "end_out_of_bounds",
            ValidationError::RiderName => "rider_name",
            ValidationError::DriverName => "driver_name",
            ValidationError::DriverVehicle => "driver_vehicle",
        }
    }
}

/// Validate a creation payload and coerce it into a [`NewRide`].
pub fn validate_ride(request: &RideRequest) -> Result<NewRide, ValidationError> {
    let (start_lat, start_long) = coordinate_pair(&request.start_lat, &request.start_long)
        .ok_or(ValidationError::StartOutOfBounds)?;
    let (end_lat, end_long) = coordinate_pair(&request.end_lat, &request.end_long)
        .ok_or(ValidationError::EndOutOfBounds)?;

    let rider_name = non_empty_string(&request.rider_name).ok_or(ValidationError::RiderName)?;
    let driver_name = non_empty_string(&request.driver_name).ok_or(ValidationError::DriverName)?;
    let driver_vehicle =
        non_empty_string(&request.driver_vehicle).ok_or(ValidationError::DriverVehicle)?;

    Ok(NewRide {
        start_lat,
        start_long,
        end_lat,
        end_long,
        rider_name,
        driver_name,
        driver_vehicle,
    })
}

/// Coerce a transport value to a number. Anything that is not a JSON number
/// or a numeric string yields `None`.
fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn within(value: f64, bound: f64) -> bool {
    // NaN fails both comparisons
    value >= -bound && value <= bound
}

fn coordinate_pair(lat: &Value, long: &Value) -> Option<(f64, f64)> {
    let lat = coerce_number(lat).filter(|v| within(*v, LATITUDE_BOUND))?;
    let long = coerce_number(long).filter(|v| within(*v, LONGITUDE_BOUND))?;
    Some((lat, long))
}

fn non_empty_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}
