//! Request types and validation for HTTP endpoints.

use serde::{Deserialize, Serialize};

use rides_lib::{validate_ride, NewRide, PageRequest, RideId, RideRequest};

use crate::error::{from_lib_error, ErrorResponse};

/// Validation trait for request types.
///
/// Implementations check every field and either produce the typed value the
/// handler works with or the error body to send back.
pub trait Validate {
    /// The value produced by a successful validation.
    type Output;

    /// Validate the request, returning an error body if invalid.
    fn validate(&self) -> Result<Self::Output, ErrorResponse>;
}

impl Validate for RideRequest {
    type Output = NewRide;

    fn validate(&self) -> Result<NewRide, ErrorResponse> {
        validate_ride(self).map_err(|rule| {
            tracing::debug!(reason = rule.reason(), "ride failed validation");
            ErrorResponse::validation(rule.to_string())
        })
    }
}

/// Query string accepted by `GET /rides`.
///
/// Values stay raw so blank and malformed input can be told apart from
/// absent input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListRidesQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<String>,
}

impl Validate for ListRidesQuery {
    type Output = PageRequest;

    fn validate(&self) -> Result<PageRequest, ErrorResponse> {
        PageRequest::parse(self.page.as_deref(), self.limit.as_deref())
            .map_err(|e| from_lib_error(&e))
    }
}

/// Path segment of `GET /rides/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RidePath {
    pub id: String,
}

impl RidePath {
    /// The identifier the segment denotes, if any.
    ///
    /// Integers are taken as-is. A decimal with no fractional part (`1.0`,
    /// `1e0`) denotes the same integer, as it would in a SQLite comparison
    /// against the integer key. Anything else can never match a stored ride.
    pub fn ride_id(&self) -> Option<RideId> {
        let raw = self.id.trim();
        if let Ok(id) = raw.parse::<RideId>() {
            return Some(id);
        }
        let value = raw.parse::<f64>().ok()?;
        let integral = value.is_finite() && value.fract() == 0.0;
        (integral && value >= RideId::MIN as f64 && value < RideId::MAX as f64)
            .then_some(value as RideId)
    }
}
