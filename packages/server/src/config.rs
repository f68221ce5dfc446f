//! Process configuration from the environment.

use anyhow::Result;
use pricing::AppSettings;

/// Bootstrap configuration, loaded once at startup.
#[derive(Debug)]
pub struct Config {
    /// Port the server listens on.
    pub port: u16,

    /// Postgres connection URL. When unset (or the `postgres` feature
    /// is off) the in-memory store is used.
    pub database_url: Option<String>,

    /// Initial runtime settings, mutable afterwards via the settings
    /// endpoint.
    pub settings: AppSettings,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let port = match std::env::var("PORT") {
            Ok(value) => value.parse()?,
            Err(_) => 8080,
        };

        Ok(Self {
            port,
            database_url: std::env::var("DATABASE_URL").ok(),
            settings: AppSettings::from_env(),
        })
    }
}
