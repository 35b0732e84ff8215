use thiserror::Error;

use crate::ride::RideId;
use crate::validation::ValidationError;

/// Convenient result alias for the rides library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// A creation payload broke one of the field rules.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Page or limit could not be interpreted as a positive integer.
    #[error("Page and limit must be positive integers")]
    InvalidPagination,

    /// The query succeeded but matched no rows.
    #[error("Could not find any rides")]
    RidesNotFound,

    /// Raised when a ride that was just inserted cannot be read back.
    #[error("ride {id} was inserted but could not be read back")]
    MissingReadBack { id: RideId },

    /// The store connection is no longer usable (e.g. a poisoned lock).
    #[error("ride store unavailable: {message}")]
    StoreUnavailable { message: String },

    /// Wrapper for SQLite errors.
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error originated in the store rather than in caller input.
    pub fn is_store_failure(&self) -> bool {
        matches!(
            self,
            Error::MissingReadBack { .. }
                | Error::StoreUnavailable { .. }
                | Error::Sqlite(_)
                | Error::Io(_)
        )
    }
}
