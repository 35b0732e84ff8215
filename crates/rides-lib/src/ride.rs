use serde::{Deserialize, Serialize};

/// Store-assigned identifier for a ride.
pub type RideId = i64;

/// A validated ride, ready to be inserted.
///
/// Only [`crate::validate_ride`] produces values of this type from caller
/// input, so every `NewRide` already satisfies the coordinate and name rules.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRide {
    pub start_lat: f64,
    pub start_long: f64,
    pub end_lat: f64,
    pub end_long: f64,
    pub rider_name: String,
    pub driver_name: String,
    pub driver_vehicle: String,
}

/// A ride as persisted by the store, including the generated identifier and
/// the creation timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ride {
    #[serde(rename = "rideID")]
    pub ride_id: RideId,
    pub start_lat: f64,
    pub start_long: f64,
    pub end_lat: f64,
    pub end_long: f64,
    pub rider_name: String,
    pub driver_name: String,
    pub driver_vehicle: String,
    /// `CURRENT_TIMESTAMP` text as written by SQLite (`YYYY-MM-DD HH:MM:SS`, UTC).
    pub created: String,
}

impl Ride {
    /// Whether the caller-supplied fields of this ride equal `input`.
    pub fn matches(&self, input: &NewRide) -> bool {
        self.start_lat == input.start_lat
            && self.start_long == input.start_long
            && self.end_lat == input.end_lat
            && self.end_long == input.end_long
            && self.rider_name == input.rider_name
            && self.driver_name == input.driver_name
            && self.driver_vehicle == input.driver_vehicle
    }
}
