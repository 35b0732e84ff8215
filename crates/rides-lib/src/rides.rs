//! Ride operations composed from validation, the store, and pagination.

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::pagination::{paginate, Page, PageRequest};
use crate::ride::{NewRide, Ride, RideId};
use crate::store::RideStore;
use crate::validation::{validate_ride, RideRequest};

/// Validate a creation payload, persist it, and return the stored row.
///
/// Validation failures return before the store is touched.
pub fn create_ride(store: &dyn RideStore, request: &RideRequest) -> Result<Ride> {
    let ride = validate_ride(request)?;
    persist_ride(store, &ride)
}

/// Insert an already-validated ride and read it back by its generated id.
///
/// The returned row is what the store holds, including the `created`
/// timestamp it assigned.
pub fn persist_ride(store: &dyn RideStore, ride: &NewRide) -> Result<Ride> {
    let id = store.insert(ride)?;
    let mut rows = store.find_by_id(id)?;
    if rows.is_empty() {
        warn!(ride_id = id, "inserted ride missing on read-back");
        return Err(Error::MissingReadBack { id });
    }
    debug!(ride_id = id, "ride persisted");
    Ok(rows.swap_remove(0))
}

/// Fetch every ride and return the requested page.
///
/// An empty table is reported as [`Error::RidesNotFound`]; a page beyond the
/// last one is an empty page.
pub fn list_rides(store: &dyn RideStore, request: PageRequest) -> Result<Page<Ride>> {
    let rides = store.find_all()?;
    if rides.is_empty() {
        return Err(Error::RidesNotFound);
    }
    Ok(paginate(&rides, request))
}

/// Fetch the rides matching `id`.
pub fn get_ride(store: &dyn RideStore, id: RideId) -> Result<Vec<Ride>> {
    let rides = store.find_by_id(id)?;
    if rides.is_empty() {
        return Err(Error::RidesNotFound);
    }
    Ok(rides)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::SqliteRideStore;
    use crate::pagination::PageDescriptor;
    use crate::validation::ValidationError;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn request(lat: serde_json::Value, rider: serde_json::Value) -> RideRequest {
        serde_json::from_value(json!({
            "start_lat": lat,
            "start_long": 50,
            "end_lat": 50,
            "end_long": 50,
            "rider_name": rider,
            "driver_name": "dummy",
            "driver_vehicle": "dummy",
        }))
        .unwrap()
    }

    /// Store that fails every call and counts how often it was reached.
    #[derive(Default)]
    struct FailingStore {
        calls: AtomicUsize,
    }

    impl FailingStore {
        fn fail<T>(&self) -> Result<T> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(Error::Sqlite(rusqlite::Error::InvalidQuery))
        }
    }

    impl RideStore for FailingStore {
        fn insert(&self, _ride: &NewRide) -> Result<RideId> {
            self.fail()
        }
        fn find_by_id(&self, _id: RideId) -> Result<Vec<Ride>> {
            self.fail()
        }
        fn find_all(&self) -> Result<Vec<Ride>> {
            self.fail()
        }
        fn ping(&self) -> Result<()> {
            self.fail()
        }
    }

    /// Store whose inserts succeed but never become visible.
    struct ForgetfulStore;

    impl RideStore for ForgetfulStore {
        fn insert(&self, _ride: &NewRide) -> Result<RideId> {
            Ok(7)
        }
        fn find_by_id(&self, _id: RideId) -> Result<Vec<Ride>> {
            Ok(Vec::new())
        }
        fn find_all(&self) -> Result<Vec<Ride>> {
            Ok(Vec::new())
        }
        fn ping(&self) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_create_ride_round_trip() {
        let store = SqliteRideStore::open_in_memory().unwrap();
        let ride = create_ride(&store, &request(json!(50), json!("dummy"))).unwrap();

        assert_eq!(ride.ride_id, 1);
        assert_eq!(ride.start_lat, 50.0);
        assert_eq!(ride.rider_name, "dummy");
        assert!(!ride.created.is_empty());
    }

    #[test]
    fn test_invalid_ride_never_reaches_store() {
        let store = FailingStore::default();
        let err = create_ride(&store, &request(json!(500), json!("dummy"))).unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::StartOutOfBounds)
        ));

        let err = create_ride(&store, &request(json!(50), json!(""))).unwrap_err();
        assert!(matches!(err, Error::Validation(ValidationError::RiderName)));

        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_invalid_ride_persists_nothing() {
        let store = SqliteRideStore::open_in_memory().unwrap();
        assert!(create_ride(&store, &request(json!(-91), json!("dummy"))).is_err());
        assert!(store.find_all().unwrap().is_empty());
    }

    #[test]
    fn test_store_failure_propagates() {
        let store = FailingStore::default();
        let err = create_ride(&store, &request(json!(50), json!("dummy"))).unwrap_err();
        assert!(err.is_store_failure());
        assert_eq!(store.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_missing_read_back_is_store_failure() {
        let err = create_ride(&ForgetfulStore, &request(json!(50), json!("dummy"))).unwrap_err();
        assert!(matches!(err, Error::MissingReadBack { id: 7 }));
    }

    #[test]
    fn test_list_rides_empty_is_not_found() {
        let store = SqliteRideStore::open_in_memory().unwrap();
        let err = list_rides(&store, PageRequest::default()).unwrap_err();
        assert!(matches!(err, Error::RidesNotFound));
    }

    #[test]
    fn test_list_rides_paginates() {
        let store = SqliteRideStore::open_in_memory().unwrap();
        for name in ["first", "second"] {
            create_ride(&store, &request(json!(10), json!(name))).unwrap();
        }

        let first = list_rides(&store, PageRequest::new(1, 1).unwrap()).unwrap();
        assert_eq!(first.results[0].rider_name, "first");
        assert_eq!(first.next, Some(PageDescriptor { page: 2, limit: 1 }));
        assert!(first.previous.is_none());

        let second = list_rides(&store, PageRequest::new(2, 1).unwrap()).unwrap();
        assert_eq!(second.results[0].rider_name, "second");
        assert!(second.next.is_none());
        assert_eq!(second.previous, Some(PageDescriptor { page: 1, limit: 1 }));
    }

    #[test]
    fn test_list_store_failure_is_not_not_found() {
        let err = list_rides(&FailingStore::default(), PageRequest::default()).unwrap_err();
        assert!(err.is_store_failure());
    }

    #[test]
    fn test_get_ride() {
        let store = SqliteRideStore::open_in_memory().unwrap();
        let created = create_ride(&store, &request(json!(10), json!("rider"))).unwrap();

        let rides = get_ride(&store, created.ride_id).unwrap();
        assert_eq!(rides, vec![created]);

        assert!(matches!(get_ride(&store, 404), Err(Error::RidesNotFound)));
    }
}
