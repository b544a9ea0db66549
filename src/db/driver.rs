use super::connection::{ConnectionTarget, QueryResult};
use super::error::Result;
use super::postgres::PostgresSession;
use super::sqlite::SqliteSession;

/// A live session against one database backend.
pub trait Session: Send {
    fn execute(&mut self, sql: &str) -> Result<QueryResult>;
    fn list_tables(&mut self) -> Result<Vec<String>>;
    /// Column names of `table`, in declaration order. A missing table yields
    /// an empty list.
    fn describe_table(&mut self, table: &str) -> Result<Vec<String>>;
    /// Releases the driver-level resource before returning.
    fn close(self: Box<Self>) -> Result<()>;
}

/// Establishes sessions for connection targets.
pub trait Driver: Send {
    fn open(&self, target: &ConnectionTarget) -> Result<Box<dyn Session>>;
}

/// Dispatches to the built-in SQLite and PostgreSQL backends.
#[derive(Debug, Clone)]
pub struct NativeDriver {
    default_postgres_port: u16,
}

impl NativeDriver {
    pub fn new() -> Self {
        Self {
            default_postgres_port: super::postgres::DEFAULT_PORT,
        }
    }

    pub fn with_default_postgres_port(mut self, port: u16) -> Self {
        self.default_postgres_port = port;
        self
    }
}

impl Default for NativeDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl Driver for NativeDriver {
    fn open(&self, target: &ConnectionTarget) -> Result<Box<dyn Session>> {
        match target {
            ConnectionTarget::File { path } => Ok(SqliteSession::connect(path)?),
            ConnectionTarget::Network { host, port, database, user, password } => {
                let port = if *port == 0 { self.default_postgres_port } else { *port };
                Ok(PostgresSession::connect(host, port, database, user, password)?)
            }
        }
    }
}
