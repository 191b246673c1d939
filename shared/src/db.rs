//! Database access: one MySQL connection per statement.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::Value;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection, MySqlRow};
use sqlx::{Column, Connection, Row as _, TypeInfo, ValueRef};
use std::str::FromStr;
use tracing::{debug, warn};

use crate::models::Row;
use crate::query::Statement;
use crate::secrets::{get_database_credentials, DatabaseCredentials};
use crate::{Config, Error, Result};

/// Runs single statements against the calendar store.
///
/// Implementations open a connection for every call and release it before
/// returning, whether the statement succeeded or not.
#[async_trait]
pub trait StoreConnector: Send + Sync {
    /// Run a statement that returns no rows. Affected-row counts are ignored.
    async fn execute(&self, statement: &Statement) -> Result<()>;

    /// Run a query and collect every row in the order the store returns them.
    async fn fetch_all(&self, statement: &Statement) -> Result<Vec<Row>>;
}

/// [`StoreConnector`] backed by a fresh MySQL connection per call.
#[derive(Debug, Clone)]
pub struct MySqlStore {
    options: MySqlConnectOptions,
}

impl MySqlStore {
    pub fn new(options: MySqlConnectOptions) -> Self {
        Self { options }
    }

    /// Resolve connection options from the environment and, when configured,
    /// Secrets Manager. Nothing is connected yet.
    pub async fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(connect_options(config).await?))
    }

    async fn connect(&self) -> Result<MySqlConnection> {
        MySqlConnection::connect_with(&self.options)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to connect to database");
                Error::connection(e)
            })
    }
}

async fn release(conn: MySqlConnection) {
    if let Err(e) = conn.close().await {
        warn!(error = %e, "Failed to close database connection");
    }
}

type MySqlQuery<'q> = sqlx::query::Query<'q, sqlx::MySql, sqlx::mysql::MySqlArguments>;

fn prepare(statement: &Statement) -> MySqlQuery<'_> {
    statement
        .params
        .iter()
        .fold(sqlx::query(&statement.sql), |query, value| query.bind(value.as_deref()))
}

#[async_trait]
impl StoreConnector for MySqlStore {
    async fn execute(&self, statement: &Statement) -> Result<()> {
        let mut conn = self.connect().await?;
        debug!(sql = %statement.sql, "Executing statement");

        let outcome = prepare(statement).execute(&mut conn).await;
        release(conn).await;

        outcome.map(|_| ()).map_err(Error::statement)
    }

    async fn fetch_all(&self, statement: &Statement) -> Result<Vec<Row>> {
        let mut conn = self.connect().await?;
        debug!(sql = %statement.sql, "Running query");

        let outcome = prepare(statement).fetch_all(&mut conn).await;
        release(conn).await;

        let rows = outcome.map_err(Error::statement)?;
        Ok(rows.iter().map(row_to_json).collect())
    }
}

/// Build connection options: `DATABASE_URL` wins, then the individual
/// settings, with Secrets Manager credentials layered on top when configured.
pub async fn connect_options(config: &Config) -> Result<MySqlConnectOptions> {
    let creds = match (&config.database_url, &config.db_secret_arn) {
        (None, Some(arn)) => Some(get_database_credentials(arn).await?),
        _ => None,
    };
    build_options(config, creds)
}

fn build_options(
    config: &Config,
    creds: Option<DatabaseCredentials>,
) -> Result<MySqlConnectOptions> {
    if let Some(url) = &config.database_url {
        return MySqlConnectOptions::from_str(url)
            .map_err(|e| Error::Config(format!("Invalid DATABASE_URL: {}", e)));
    }

    let mut host = config
        .db_host
        .clone()
        .ok_or_else(|| Error::Config("DB_HOST not set".to_string()))?;
    let mut port = config.db_port;
    let mut database = config.db_name.clone();
    let mut username = config.db_user.clone();
    let mut password = config.db_password.clone();

    if let Some(creds) = creds {
        username = creds.username;
        password = creds.password;
        host = creds.host.unwrap_or(host);
        port = creds.port.unwrap_or(port);
        database = creds.dbname.unwrap_or(database);
    }

    Ok(MySqlConnectOptions::new()
        .host(&host)
        .port(port)
        .database(&database)
        .username(&username)
        .password(&password))
}

fn row_to_json(row: &MySqlRow) -> Row {
    row.columns()
        .iter()
        .map(|column| (column.name().to_string(), column_value(row, column.ordinal())))
        .collect()
}

/// Decode one column into JSON, keyed off the MySQL type name. Anything
/// unrecognised is returned as text.
fn column_value(row: &MySqlRow, index: usize) -> Value {
    let type_name = match row.try_get_raw(index) {
        Ok(raw) if raw.is_null() => return Value::Null,
        Ok(raw) => raw.type_info().name().to_string(),
        Err(_) => return Value::Null,
    };

    let decoded = match type_name.as_str() {
        name if name.ends_with("UNSIGNED") => row.try_get::<u64, _>(index).map(Value::from),
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" => {
            row.try_get::<i64, _>(index).map(Value::from)
        }
        "YEAR" => row.try_get_unchecked::<u16, _>(index).map(Value::from),
        "FLOAT" | "DOUBLE" => row.try_get::<f64, _>(index).map(Value::from),
        "TIME" => row
            .try_get::<NaiveTime, _>(index)
            .map(|t| Value::from(t.format("%H:%M:%S").to_string())),
        "DATE" => row
            .try_get::<NaiveDate, _>(index)
            .map(|d| Value::from(d.format("%Y-%m-%d").to_string())),
        "DATETIME" | "TIMESTAMP" => row
            .try_get::<NaiveDateTime, _>(index)
            .map(|dt| Value::from(dt.format("%Y-%m-%d %H:%M:%S").to_string())),
        _ => row.try_get::<String, _>(index).map(Value::from),
    };

    decoded.unwrap_or_else(|_| {
        // DECIMAL and friends arrive as text
        row.try_get_unchecked::<Vec<u8>, _>(index)
            .map(|bytes| Value::from(String::from_utf8_lossy(&bytes).into_owned()))
            .unwrap_or(Value::Null)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host_config() -> Config {
        Config {
            db_host: Some("10.0.0.5".to_string()),
            db_port: 3306,
            db_name: "planner".to_string(),
            db_user: "planner".to_string(),
            db_password: "hunter2".to_string(),
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn test_database_url_wins_over_host() {
        let config = Config {
            database_url: Some("mysql://alice:pw@db.example.com:3307/cal".to_string()),
            ..host_config()
        };

        let options = connect_options(&config).await.unwrap();
        assert_eq!(options.get_host(), "db.example.com");
        assert_eq!(options.get_port(), 3307);
        assert_eq!(options.get_username(), "alice");
        assert_eq!(options.get_database(), Some("cal"));
    }

    #[tokio::test]
    async fn test_database_url_skips_secret_lookup() {
        let config = Config {
            database_url: Some("mysql://alice:pw@db.example.com/cal".to_string()),
            db_secret_arn: Some("arn:aws:secretsmanager:eu-west-1:1:secret:db".to_string()),
            ..host_config()
        };

        let options = connect_options(&config).await.unwrap();
        assert_eq!(options.get_host(), "db.example.com");
    }

    #[tokio::test]
    async fn test_host_settings_without_secret() {
        let options = connect_options(&host_config()).await.unwrap();
        assert_eq!(options.get_host(), "10.0.0.5");
        assert_eq!(options.get_port(), 3306);
        assert_eq!(options.get_username(), "planner");
        assert_eq!(options.get_database(), Some("planner"));
    }

    #[tokio::test]
    async fn test_missing_host_is_config_error() {
        let config = Config {
            db_host: None,
            ..host_config()
        };
        assert!(matches!(connect_options(&config).await, Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn test_invalid_url_is_config_error() {
        let config = Config {
            database_url: Some("not a url".to_string()),
            ..host_config()
        };
        assert!(matches!(connect_options(&config).await, Err(Error::Config(_))));
    }

    #[test]
    fn test_secret_overrides_environment() {
        let creds = DatabaseCredentials {
            username: "rotated".to_string(),
            password: "s3cret".to_string(),
            host: Some("rds.internal".to_string()),
            port: Some(3310),
            dbname: Some("calendar".to_string()),
        };

        let options = build_options(&host_config(), Some(creds)).unwrap();
        assert_eq!(options.get_host(), "rds.internal");
        assert_eq!(options.get_port(), 3310);
        assert_eq!(options.get_username(), "rotated");
        assert_eq!(options.get_database(), Some("calendar"));
    }

    #[test]
    fn test_partial_secret_keeps_environment_location() {
        let creds = DatabaseCredentials {
            username: "rotated".to_string(),
            password: "s3cret".to_string(),
            host: None,
            port: None,
            dbname: None,
        };

        let options = build_options(&host_config(), Some(creds)).unwrap();
        assert_eq!(options.get_host(), "10.0.0.5");
        assert_eq!(options.get_port(), 3306);
        assert_eq!(options.get_username(), "rotated");
        assert_eq!(options.get_database(), Some("planner"));
    }
}
