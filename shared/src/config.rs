//! Configuration management for Lambda functions.

use std::env;

use crate::{Error, Result};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Full MySQL URL; takes precedence over the individual settings
    pub database_url: Option<String>,
    /// Database host
    pub db_host: Option<String>,
    /// Database port
    pub db_port: u16,
    /// Database name
    pub db_name: String,
    /// Database user, used when no secret is configured
    pub db_user: String,
    /// Database password, used when no secret is configured
    pub db_password: String,
    /// ARN of the secret containing database credentials
    pub db_secret_arn: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let db_port = match lookup("DB_PORT") {
            Some(port) => port
                .parse()
                .map_err(|_| Error::Config(format!("DB_PORT is not a valid port: {}", port)))?,
            None => 3306,
        };

        let config = Self {
            database_url: lookup("DATABASE_URL"),
            db_host: lookup("DB_HOST"),
            db_port,
            db_name: lookup("DB_NAME").unwrap_or_else(|| "planner".to_string()),
            db_user: lookup("DB_USER").unwrap_or_else(|| "planner".to_string()),
            db_password: lookup("DB_PASSWORD").unwrap_or_default(),
            db_secret_arn: lookup("DB_SECRET_ARN"),
        };

        if config.database_url.is_none() && config.db_host.is_none() {
            return Err(Error::Config("DATABASE_URL or DB_HOST must be set".to_string()));
        }

        Ok(config)
    }
}
