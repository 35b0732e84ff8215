//! Rides library entry points.
//!
//! This crate owns everything the rides service knows about its single
//! resource: validating creation payloads, persisting rides through a
//! [`RideStore`], and slicing listings into pages. Higher-level consumers
//! (the HTTP service) should only depend on the functions exported here
//! instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod db;
pub mod error;
pub mod pagination;
pub mod ride;
pub mod rides;
pub mod store;
pub mod validation;

pub use db::{initialise_schema, SqliteRideStore, RIDES_SCHEMA};
pub use error::{Error, Result};
pub use pagination::{paginate, Page, PageDescriptor, PageRequest, DEFAULT_LIMIT, DEFAULT_PAGE};
pub use ride::{NewRide, Ride, RideId};
pub use rides::{create_ride, get_ride, list_rides, persist_ride};
pub use store::RideStore;
pub use validation::{validate_ride, RideRequest, ValidationError};
