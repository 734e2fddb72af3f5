//! Connection settings for remote backends.
//!
//! Settings come from a JSON credentials blob in [`CREDENTIALS_ENV`] when it is
//! present and well-formed. Otherwise the ambient defaults are used: [`URI_ENV`] and
//! [`DATABASE_ENV`], falling back to a local server. A malformed blob is logged and
//! ignored, never fatal.

use serde::Deserialize;
use std::env;
use tracing::{debug, warn};

/// Environment variable holding the JSON credentials blob.
pub const CREDENTIALS_ENV: &str = "DOCBRIDGE_CREDENTIALS";
/// Environment variable holding the ambient connection string.
pub const URI_ENV: &str = "MONGODB_URI";
/// Environment variable holding the ambient database name.
pub const DATABASE_ENV: &str = "DOCBRIDGE_DATABASE";

pub const DEFAULT_URI: &str = "mongodb://localhost:27017";
pub const DEFAULT_DATABASE: &str = "docbridge";

/// Resolved connection settings for a remote document store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Connection string understood by the backend driver.
    pub uri: String,
    /// Name of the database holding the collections.
    pub database: String,
}

#[derive(Deserialize)]
struct Credentials {
    uri: String,
    database: Option<String>,
}

impl StoreConfig {
    pub fn new(uri: impl Into<String>, database: impl Into<String>) -> Self {
        Self { uri: uri.into(), database: database.into() }
    }

    /// Resolves settings from the process environment.
    pub fn from_env() -> Self {
        Self::resolve(
            env::var(CREDENTIALS_ENV).ok().as_deref(),
            Self::ambient(),
        )
    }

    /// Settings from the ambient environment variables, or the local defaults.
    pub fn ambient() -> Self {
        Self {
            uri: env::var(URI_ENV).unwrap_or_else(|_| DEFAULT_URI.to_string()),
            database: env::var(DATABASE_ENV).unwrap_or_else(|_| DEFAULT_DATABASE.to_string()),
        }
    }

    /// Picks the credentials blob when it parses, `ambient` otherwise.
    ///
    /// A blob without a `database` inherits the ambient database name.
    pub fn resolve(credentials: Option<&str>, ambient: StoreConfig) -> Self {
        let Some(raw) = credentials
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
        else {
            debug!("no credentials blob configured; using ambient settings");
            return ambient;
        };

        match serde_json::from_str::<Credentials>(raw) {
            Ok(credentials) => Self {
                uri: credentials.uri,
                database: credentials.database.unwrap_or(ambient.database),
            },
            Err(err) => {
                warn!(
                    error = %err,
                    variable = CREDENTIALS_ENV,
                    "could not parse credentials blob; falling back to ambient settings"
                );
                ambient
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ambient() -> StoreConfig {
        StoreConfig::new("mongodb://ambient:27017", "ambient_db")
    }

    #[test]
    fn uses_well_formed_credentials() {
        let config = StoreConfig::resolve(
            Some(r#"{"uri": "mongodb+srv://svc@cluster.example.net", "database": "courses_prod"}"#),
            ambient(),
        );

        assert_eq!(config, StoreConfig::new("mongodb+srv://svc@cluster.example.net", "courses_prod"));
    }

    #[test]
    fn credentials_without_database_inherit_ambient_database() {
        let config = StoreConfig::resolve(Some(r#"{"uri": "mongodb://svc:27017"}"#), ambient());

        assert_eq!(config, StoreConfig::new("mongodb://svc:27017", "ambient_db"));
    }

    #[test]
    fn malformed_credentials_fall_back_to_ambient() {
        assert_eq!(StoreConfig::resolve(Some("{not json"), ambient()), ambient());
        assert_eq!(StoreConfig::resolve(Some(r#"{"database": "x"}"#), ambient()), ambient());
    }

    #[test]
    fn missing_or_blank_credentials_use_ambient() {
        assert_eq!(StoreConfig::resolve(None, ambient()), ambient());
        assert_eq!(StoreConfig::resolve(Some("   "), ambient()), ambient());
    }
}
