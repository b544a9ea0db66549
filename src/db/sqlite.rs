use rusqlite::types::ValueRef;
use rusqlite::{Batch, Connection, Row};
use std::time::Instant;
use tracing::debug;

use super::connection::{QueryResult, Value};
use super::driver::Session;
use super::error::{DbError, Result};

const MULTIPLE_STATEMENTS: &str = "Unable to execute multiple statements at a time";

pub struct SqliteSession {
    conn: Connection,
}

impl SqliteSession {
    /// Opens (or creates) the database file at `path`.
    pub fn connect(path: &str) -> Result<Box<Self>> {
        let conn = Connection::open(path)?;
        Ok(Box::new(SqliteSession { conn }))
    }

    pub fn in_memory() -> Result<Box<Self>> {
        let conn = Connection::open_in_memory()?;
        Ok(Box::new(SqliteSession { conn }))
    }

    fn row_to_values(row: &Row, column_count: usize) -> rusqlite::Result<Vec<Value>> {
        let mut values = Vec::with_capacity(column_count);
        for i in 0..column_count {
            let value = match row.get_ref(i)? {
                ValueRef::Null => Value::Null,
                ValueRef::Integer(v) => Value::Integer(v),
                ValueRef::Real(v) => Value::Real(v),
                ValueRef::Text(v) => Value::Text(String::from_utf8_lossy(v).into_owned()),
                ValueRef::Blob(v) => Value::Blob(v.to_vec()),
            };
            values.push(value);
        }
        Ok(values)
    }
}

impl Session for SqliteSession {
    fn execute(&mut self, sql: &str) -> Result<QueryResult> {
        let start = Instant::now();

        let mut batch = Batch::new(&self.conn, sql);
        // Whitespace and comments compile to no statement at all
        let Some(mut stmt) = batch.next()? else {
            return Ok(QueryResult::empty().with_time(start.elapsed().as_millis() as u64));
        };
        if batch.next()?.is_some() {
            return Err(DbError::driver(MULTIPLE_STATEMENTS));
        }

        let column_names: Vec<String> = stmt
            .column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let result = if column_names.is_empty() {
            // DDL/DML: no result set
            let affected = stmt.execute([])?;
            QueryResult::empty().with_affected(affected as u64)
        } else {
            let column_count = column_names.len();
            let rows = stmt
                .query_map([], |row| Self::row_to_values(row, column_count))?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            QueryResult::new(column_names, rows)
        };

        let elapsed = start.elapsed().as_millis() as u64;
        debug!(rows = result.row_count(), elapsed_ms = elapsed, "sqlite statement finished");
        Ok(result.with_time(elapsed))
    }

    fn list_tables(&mut self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )?;

        let tables = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(tables)
    }

    fn describe_table(&mut self, table: &str) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM pragma_table_info(?1) ORDER BY cid")?;

        let columns = stmt
            .query_map([table], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(columns)
    }

    fn close(self: Box<Self>) -> Result<()> {
        self.conn
            .close()
            .map_err(|(_, err)| DbError::from(err))
    }
}
