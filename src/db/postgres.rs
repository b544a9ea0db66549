//! PostgreSQL backend built on the synchronous `postgres` client.
//!
//! Ad-hoc statements go through the simple query protocol, so every cell
//! arrives as text (or NULL) regardless of its column type. Introspection
//! uses `information_schema` with parameterised queries.

use ::postgres::{Client, Config, NoTls, SimpleQueryMessage};
use std::time::Instant;
use tracing::debug;

use super::connection::{QueryResult, Value};
use super::driver::Session;
use super::error::Result;

pub const DEFAULT_PORT: u16 = 5432;

pub struct PostgresSession {
    client: Client,
}

impl PostgresSession {
    pub fn connect(
        host: &str,
        port: u16,
        database: &str,
        user: &str,
        password: &str,
    ) -> Result<Box<Self>> {
        let mut config = Config::new();
        config.host(host).port(port).user(user).dbname(database);
        if !password.is_empty() {
            config.password(password);
        }

        let client = config.connect(NoTls)?;
        Ok(Box::new(PostgresSession { client }))
    }
}

/// Schema that `list_tables` leaves off the names it returns.
const UNQUALIFIED_SCHEMA: &str = "public";

/// Splits `schema.table`. A bare name belongs to `public`, matching how
/// `list_tables` names tables there.
fn split_qualified(table: &str) -> (&str, &str) {
    match table.split_once('.') {
        Some((schema, name)) if !schema.is_empty() && !name.is_empty() => (schema, name),
        _ => (UNQUALIFIED_SCHEMA, table),
    }
}

impl Session for PostgresSession {
    fn execute(&mut self, sql: &str) -> Result<QueryResult> {
        let start = Instant::now();
        let messages = self.client.simple_query(sql)?;

        let mut columns: Vec<String> = Vec::new();
        let mut rows: Vec<Vec<Value>> = Vec::new();
        let mut affected: Option<u64> = None;

        for message in messages {
            match message {
                SimpleQueryMessage::RowDescription(description) => {
                    columns = description.iter().map(|c| c.name().to_string()).collect();
                    rows.clear();
                }
                SimpleQueryMessage::Row(row) => {
                    if columns.is_empty() {
                        columns = row.columns().iter().map(|c| c.name().to_string()).collect();
                    }
                    let values = (0..row.len())
                        .map(|i| Value::from(row.get(i)))
                        .collect();
                    rows.push(values);
                }
                SimpleQueryMessage::CommandComplete(count) => {
                    affected = Some(count);
                }
                _ => {}
            }
        }

        let result = if columns.is_empty() {
            let empty = QueryResult::empty();
            match affected {
                Some(count) => empty.with_affected(count),
                None => empty,
            }
        } else {
            QueryResult::new(columns, rows)
        };

        let elapsed = start.elapsed().as_millis() as u64;
        debug!(rows = result.row_count(), elapsed_ms = elapsed, "postgres statement finished");
        Ok(result.with_time(elapsed))
    }

    fn list_tables(&mut self) -> Result<Vec<String>> {
        let rows = self.client.query(
            "SELECT table_schema::text, table_name::text
             FROM information_schema.tables
             WHERE table_type = 'BASE TABLE'
             AND table_schema NOT IN ('pg_catalog', 'information_schema')
             ORDER BY table_schema, table_name",
            &[],
        )?;

        let tables = rows
            .iter()
            .map(|row| {
                let schema: String = row.get(0);
                let name: String = row.get(1);
                if schema == UNQUALIFIED_SCHEMA {
                    name
                } else {
                    format!("{}.{}", schema, name)
                }
            })
            .collect();

        Ok(tables)
    }

    fn describe_table(&mut self, table: &str) -> Result<Vec<String>> {
        let (schema, name) = split_qualified(table);

        let rows = self.client.query(
            "SELECT column_name::text
             FROM information_schema.columns
             WHERE table_schema::text = $1::text
             AND table_name::text = $2::text
             ORDER BY ordinal_position",
            &[&schema, &name],
        )?;

        Ok(rows.iter().map(|row| row.get::<_, String>(0)).collect())
    }

    fn close(self: Box<Self>) -> Result<()> {
        self.client.close()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_qualified() {
        assert_eq!(split_qualified("users"), ("public", "users"));
        assert_eq!(split_qualified("audit.events"), ("audit", "events"));
        assert_eq!(split_qualified(".events"), ("public", ".events"));
    }

    fn test_session() -> Option<Box<PostgresSession>> {
        let host = std::env::var("DBDESK_TEST_PG_HOST").ok()?;
        let port = std::env::var("DBDESK_TEST_PG_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let database = std::env::var("DBDESK_TEST_PG_DATABASE").unwrap_or_else(|_| "postgres".into());
        let user = std::env::var("DBDESK_TEST_PG_USER").unwrap_or_else(|_| "postgres".into());
        let password = std::env::var("DBDESK_TEST_PG_PASSWORD").unwrap_or_default();
        PostgresSession::connect(&host, port, &database, &user, &password).ok()
    }

    #[test]
    #[ignore = "requires a PostgreSQL server (DBDESK_TEST_PG_HOST)"]
    fn test_postgres_round_trip() {
        let Some(mut session) = test_session() else {
            return;
        };
        session.execute("DROP TABLE IF EXISTS public.dbdesk_rt").unwrap();
        session.execute("CREATE TABLE public.dbdesk_rt(id INTEGER, label TEXT)").unwrap();
        let inserted = session
            .execute("INSERT INTO public.dbdesk_rt VALUES (1, 'a'), (2, NULL)")
            .unwrap();
        assert_eq!(inserted.rows_affected, Some(2));

        let result = session.execute("SELECT * FROM public.dbdesk_rt ORDER BY id").unwrap();
        assert_eq!(result.columns, vec!["id", "label"]);
        assert_eq!(result.rows[0], vec![Value::from("1"), Value::from("a")]);
        assert!(result.rows[1][1].is_null());

        assert!(session.list_tables().unwrap().contains(&"dbdesk_rt".to_string()));
        assert_eq!(session.describe_table("dbdesk_rt").unwrap(), vec!["id", "label"]);
        assert!(session.describe_table("dbdesk_missing").unwrap().is_empty());

        session.execute("DROP TABLE public.dbdesk_rt").unwrap();
        session.close().unwrap();
    }
}
