use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, Row};
use tracing::{debug, Span};

use crate::error::{Error, Result};
use crate::ride::{NewRide, Ride, RideId};
use crate::store::RideStore;

/// Schema for the `Rides` table. Safe to run against an existing database.
pub const RIDES_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS Rides (
    rideID INTEGER PRIMARY KEY AUTOINCREMENT,
    startLat DECIMAL NOT NULL,
    startLong DECIMAL NOT NULL,
    endLat DECIMAL NOT NULL,
    endLong DECIMAL NOT NULL,
    riderName TEXT NOT NULL,
    driverName TEXT NOT NULL,
    driverVehicle TEXT NOT NULL,
    created DATETIME DEFAULT CURRENT_TIMESTAMP
);
"#;

const INSERT_RIDE: &str = "INSERT INTO Rides (startLat, startLong, endLat, endLong, riderName, driverName, driverVehicle) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";

const SELECT_RIDE_BY_ID: &str = "SELECT rideID, startLat, startLong, endLat, endLong, riderName, driverName, driverVehicle, created \
     FROM Rides WHERE rideID = ?1";

const SELECT_ALL_RIDES: &str = "SELECT rideID, startLat, startLong, endLat, endLong, riderName, driverName, driverVehicle, created \
     FROM Rides ORDER BY rideID";

/// Create the `Rides` table if it does not exist yet.
pub fn initialise_schema(connection: &Connection) -> Result<()> {
    connection.execute_batch(RIDES_SCHEMA)?;
    Ok(())
}

/// [`RideStore`] backed by a single SQLite connection.
///
/// The connection sits behind a mutex, so statements from concurrent callers
/// run one at a time. An insert and the `last_insert_rowid` lookup happen under
/// the same lock, which keeps generated identifiers from leaking between
/// callers.
pub struct SqliteRideStore {
    connection: Mutex<Connection>,
    span: Span,
}

impl SqliteRideStore {
    /// Open (or create) a database file and make sure the schema exists.
    ///
    /// The special path `:memory:` opens a private in-memory database.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let connection = if path == Path::new(":memory:") {
            Connection::open_in_memory()?
        } else {
            Connection::open(path)?
        };
        debug!(path = %path.display(), "opened ride database");
        Self::from_connection(connection)
    }

    /// Open a fresh in-memory database with the schema applied.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    /// Wrap an existing connection, applying the schema first.
    pub fn from_connection(connection: Connection) -> Result<Self> {
        initialise_schema(&connection)?;
        Ok(Self {
            connection: Mutex::new(connection),
            span: Span::none(),
        })
    }

    /// Attach the span that store events are recorded under.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.connection.lock().map_err(|e| Error::StoreUnavailable {
            message: e.to_string(),
        })
    }
}

impl std::fmt::Debug for SqliteRideStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteRideStore").finish_non_exhaustive()
    }
}

impl RideStore for SqliteRideStore {
    fn insert(&self, ride: &NewRide) -> Result<RideId> {
        let _enter = self.span.enter();
        let connection = self.lock()?;
        connection.execute(
            INSERT_RIDE,
            params![
                ride.start_lat,
                ride.start_long,
                ride.end_lat,
                ride.end_long,
                ride.rider_name,
                ride.driver_name,
                ride.driver_vehicle,
            ],
        )?;
        let id = connection.last_insert_rowid();
        debug!(ride_id = id, "inserted ride");
        Ok(id)
    }

    fn find_by_id(&self, id: RideId) -> Result<Vec<Ride>> {
        let _enter = self.span.enter();
        let connection = self.lock()?;
        let mut statement = connection.prepare_cached(SELECT_RIDE_BY_ID)?;
        let rides = statement
            .query_map(params![id], map_ride)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        debug!(ride_id = id, matched = rides.len(), "queried ride by id");
        Ok(rides)
    }

    fn find_all(&self) -> Result<Vec<Ride>> {
        let _enter = self.span.enter();
        let connection = self.lock()?;
        let mut statement = connection.prepare_cached(SELECT_ALL_RIDES)?;
        let rides = statement
            .query_map([], map_ride)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        debug!(count = rides.len(), "queried all rides");
        Ok(rides)
    }

    fn ping(&self) -> Result<()> {
        let connection = self.lock()?;
        connection.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
        Ok(())
    }
}

fn map_ride(row: &Row<'_>) -> rusqlite::Result<Ride> {
    Ok(Ride {
        ride_id: row.get(0)?,
        start_lat: row.get(1)?,
        start_long: row.get(2)?,
        end_lat: row.get(3)?,
        end_long: row.get(4)?,
        rider_name: row.get(5)?,
        driver_name: row.get(6)?,
        driver_vehicle: row.get(7)?,
        created: row.get(8)?,
    })
}
