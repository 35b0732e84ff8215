//! Service configuration read from the environment.
//!
//! # Environment Variables
//!
//! - `SERVICE_PORT`: HTTP port (default: 8010)
//! - `RIDES_DATABASE_PATH`: SQLite database file, or `:memory:` (default)
//! - `RIDES_STATUS_POLICY`: `compat` (default, always 200) or `mapped`

use serde::{Deserialize, Serialize};

use crate::error::StatusPolicy;

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 8010;

/// Default database location: a private in-memory database.
pub const DEFAULT_DATABASE_PATH: &str = ":memory:";

/// Runtime configuration for the rides service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub port: u16,
    pub database_path: String,
    pub status_policy: StatusPolicy,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_path: DEFAULT_DATABASE_PATH.to_string(),
            status_policy: StatusPolicy::default(),
        }
    }
}

impl ServiceConfig {
    /// Create configuration from environment variables.
    ///
    /// Unset or unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("SERVICE_PORT")
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let database_path = lookup("RIDES_DATABASE_PATH")
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_PATH.to_string());

        let status_policy = lookup("RIDES_STATUS_POLICY")
            .map(|v| StatusPolicy::from_str(&v))
            .unwrap_or_default();

        Self {
            port,
            database_path,
            status_policy,
        }
    }
}
