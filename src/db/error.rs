use thiserror::Error;

/// Errors returned by the connection registry and the drivers behind it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DbError {
    /// Connection names must be non-empty.
    #[error("Connection name must not be empty")]
    InvalidName,

    #[error("Connection with this name already exists: {0}")]
    DuplicateName(String),

    #[error("Connection not found: {0}")]
    ConnectionNotFound(String),

    /// Any open/execute/describe failure reported by the underlying client
    /// library. The message is passed through verbatim.
    #[error("{message}")]
    Driver { message: String },
}

impl DbError {
    pub fn driver(message: impl Into<String>) -> Self {
        Self::Driver { message: message.into() }
    }

    /// Stable short code, used in log records.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidName => "invalid_name",
            Self::DuplicateName(_) => "duplicate_name",
            Self::ConnectionNotFound(_) => "connection_not_found",
            Self::Driver { .. } => "driver_error",
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(err: rusqlite::Error) -> Self {
        Self::driver(err.to_string())
    }
}

impl From<::postgres::Error> for DbError {
    fn from(err: ::postgres::Error) -> Self {
        // The top-level Display of a server error is just "db error"; the
        // server message lives in the DbError source.
        match err.as_db_error() {
            Some(db) => Self::driver(db.to_string()),
            None => Self::driver(err.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, DbError>;
