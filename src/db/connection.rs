use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseKind {
    /// File-backed embedded engine.
    Sqlite,
    /// Client-server engine reached over the network.
    Postgres,
}

impl DatabaseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatabaseKind::Sqlite => "SQLite",
            DatabaseKind::Postgres => "PostgreSQL",
        }
    }
}

impl fmt::Display for DatabaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a connection points. The variant decides which driver is used.
#[derive(Clone, PartialEq)]
pub enum ConnectionTarget {
    File {
        path: String,
    },
    Network {
        host: String,
        port: u16, // 0 = driver default
        database: String,
        user: String,
        password: String,
    },
}

impl ConnectionTarget {
    pub fn sqlite(path: impl Into<String>) -> Self {
        ConnectionTarget::File { path: path.into() }
    }

    pub fn postgres(
        host: impl Into<String>,
        port: u16,
        database: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        ConnectionTarget::Network {
            host: host.into(),
            port,
            database: database.into(),
            user: user.into(),
            password: password.into(),
        }
    }

    pub fn kind(&self) -> DatabaseKind {
        match self {
            ConnectionTarget::File { .. } => DatabaseKind::Sqlite,
            ConnectionTarget::Network { .. } => DatabaseKind::Postgres,
        }
    }

    /// Human readable target with the password left out.
    pub fn display(&self) -> String {
        match self {
            ConnectionTarget::File { path } => path.clone(),
            ConnectionTarget::Network { host, port, database, user, .. } => {
                if *port == 0 {
                    format!("{}@{}/{}", user, host, database)
                } else {
                    format!("{}@{}:{}/{}", user, host, port, database)
                }
            }
        }
    }
}

// Hand-written so passwords never end up in logs.
impl fmt::Debug for ConnectionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionTarget::File { path } => f.debug_struct("File").field("path", path).finish(),
            ConnectionTarget::Network { host, port, database, user, .. } => f
                .debug_struct("Network")
                .field("host", host)
                .field("port", port)
                .field("database", database)
                .field("user", user)
                .field("password", &"***")
                .finish(),
        }
    }
}

/// Summary of a live connection, as shown in the connection list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectionInfo {
    pub name: String,
    pub kind: DatabaseKind,
    pub target: String,
}

/// A single loosely typed cell value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Text written to an exported file. NULL becomes an empty field.
    pub fn to_export_string(&self) -> String {
        match self {
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Integer(v) => write!(f, "{}", v),
            Value::Real(v) => write!(f, "{}", v),
            Value::Text(v) => f.write_str(v),
            Value::Blob(v) => write!(f, "<BLOB: {} bytes>", v.len()),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Real(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
    pub rows_affected: Option<u64>,
    pub execution_time_ms: u64,
}

impl QueryResult {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self {
            columns,
            rows,
            rows_affected: None,
            execution_time_ms: 0,
        }
    }

    /// Result of a statement that produced no rows.
    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    pub fn with_time(mut self, time_ms: u64) -> Self {
        self.execution_time_ms = time_ms;
        self
    }

    pub fn with_affected(mut self, affected: u64) -> Self {
        self.rows_affected = Some(affected);
        self
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Value]> + '_ {
        self.rows.iter().map(Vec::as_slice)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Display strings for one row, as rendered in the grid.
    pub fn display_row(&self, index: usize) -> Option<Vec<String>> {
        self.rows
            .get(index)
            .map(|row| row.iter().map(ToString::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Null.to_string(), "NULL");
        assert_eq!(Value::Integer(42).to_string(), "42");
        assert_eq!(Value::Real(1.5).to_string(), "1.5");
        assert_eq!(Value::from("abc").to_string(), "abc");
        assert_eq!(Value::Blob(vec![0, 1, 2]).to_string(), "<BLOB: 3 bytes>");
    }

    #[test]
    fn test_null_exports_as_empty() {
        assert_eq!(Value::Null.to_export_string(), "");
        assert_eq!(Value::Integer(7).to_export_string(), "7");
    }

    #[test]
    fn test_target_display_hides_password() {
        let target = ConnectionTarget::postgres("db.local", 5433, "app", "alice", "s3cret");
        assert_eq!(target.display(), "alice@db.local:5433/app");
        assert!(!format!("{:?}", target).contains("s3cret"));
        assert_eq!(target.kind(), DatabaseKind::Postgres);
        assert_eq!(ConnectionTarget::sqlite("a.db").kind(), DatabaseKind::Sqlite);
    }

    #[test]
    fn test_display_row() {
        let result = QueryResult::new(
            vec!["id".into(), "label".into()],
            vec![vec![Value::Integer(1), Value::Null]],
        );
        assert_eq!(result.display_row(0), Some(vec!["1".to_string(), "NULL".to_string()]));
        assert_eq!(result.display_row(1), None);
    }
}
