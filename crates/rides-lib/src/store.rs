//! The persistence capability the ride operations depend on.

use crate::error::Result;
use crate::ride::{NewRide, Ride, RideId};

/// Storage backend for rides.
///
/// Each call either completes or fails as a whole. Implementations are shared
/// across request handlers, so they must serialize their own statement
/// execution. An empty result set is `Ok(vec![])`, never an error.
pub trait RideStore: Send + Sync {
    /// Insert a ride and return the identifier the store assigned to it.
    fn insert(&self, ride: &NewRide) -> Result<RideId>;

    /// Fetch the rides whose identifier equals `id`.
    fn find_by_id(&self, id: RideId) -> Result<Vec<Ride>>;

    /// Fetch every ride, ordered by identifier.
    fn find_all(&self) -> Result<Vec<Ride>>;

    /// Check that the store can still answer queries.
    fn ping(&self) -> Result<()>;
}
