//! Error types for the Planner calendar Lambda functions.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Message reported when the store cannot be reached.
pub const CONNECTION_FAILED: &str = "Could not connect to the database";

/// Errors that can occur while serving a calendar request.
#[derive(Error, Debug)]
pub enum Error {
    /// A required parameter was missing or malformed
    #[error("{0}")]
    Validation(String),

    /// The store could not be reached. The cause is logged, never shown to callers.
    #[error("{}", CONNECTION_FAILED)]
    Connection(String),

    /// The store rejected the statement; carries the store's own message
    #[error("{0}")]
    Statement(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// AWS SDK error
    #[error("AWS error: {0}")]
    Aws(String),
}

impl Error {
    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Validation(_) => 400,
            _ => 500,
        }
    }

    /// Classify a failure to open a connection.
    pub fn connection(err: sqlx::Error) -> Self {
        Error::Connection(err.to_string())
    }

    /// Classify a failure reported while running a statement.
    ///
    /// Database errors keep only the server's message so callers see exactly
    /// what MySQL said; anything else falls back to sqlx's description.
    pub fn statement(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db) => Error::Statement(db.message().to_string()),
            other => Error::Statement(other.to_string()),
        }
    }
}
