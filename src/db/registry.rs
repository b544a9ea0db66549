//! Name-keyed store of live database sessions.
//!
//! The registry owns every session exclusively. Dropping it closes whatever
//! is still open, so sessions never outlive the application state that
//! created them.

use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use super::connection::{ConnectionInfo, ConnectionTarget, DatabaseKind, QueryResult};
use super::driver::{Driver, NativeDriver, Session};
use super::error::{DbError, Result};

/// A named live session.
pub struct Connection {
    name: String,
    target: ConnectionTarget,
    session: Box<dyn Session>,
}

impl Connection {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> DatabaseKind {
        self.target.kind()
    }

    pub fn target(&self) -> &ConnectionTarget {
        &self.target
    }

    pub fn info(&self) -> ConnectionInfo {
        ConnectionInfo {
            name: self.name.clone(),
            kind: self.kind(),
            target: self.target.display(),
        }
    }
}

pub struct Registry {
    driver: Box<dyn Driver>,
    connections: BTreeMap<String, Connection>,
}

impl Registry {
    pub fn new() -> Self {
        Self::with_driver(NativeDriver::new())
    }

    pub fn with_driver(driver: impl Driver + 'static) -> Self {
        Self {
            driver: Box::new(driver),
            connections: BTreeMap::new(),
        }
    }

    /// Opens a session for `target` and stores it under `name`.
    ///
    /// Fails without touching the registry when the name is empty or taken,
    /// or when the driver cannot establish the session.
    pub fn open(&mut self, name: &str, target: ConnectionTarget) -> Result<()> {
        if name.is_empty() {
            return Err(DbError::InvalidName);
        }
        if self.connections.contains_key(name) {
            return Err(DbError::DuplicateName(name.to_string()));
        }

        let session = self.driver.open(&target).map_err(|err| {
            warn!(connection = name, kind = %target.kind(), code = err.code(), error = %err, "open failed");
            err
        })?;

        info!(connection = name, kind = %target.kind(), target = %target.display(), "connection opened");
        self.connections.insert(
            name.to_string(),
            Connection {
                name: name.to_string(),
                target,
                session,
            },
        );
        Ok(())
    }

    /// Closes and forgets `name`. Unknown names are ignored.
    ///
    /// The session is released before this returns, so the name can be
    /// reused straight away.
    pub fn close(&mut self, name: &str) {
        if let Some(conn) = self.connections.remove(name) {
            Self::close_connection(conn);
        }
    }

    /// Closes every open session, swallowing failures.
    pub fn close_all(&mut self) {
        let connections = std::mem::take(&mut self.connections);
        for (_, conn) in connections {
            Self::close_connection(conn);
        }
    }

    fn close_connection(conn: Connection) {
        let Connection { name, session, .. } = conn;
        match session.close() {
            Ok(()) => info!(connection = %name, "connection closed"),
            Err(err) => warn!(connection = %name, error = %err, "close failed, session dropped"),
        }
    }

    /// Runs `sql` verbatim against the named connection.
    pub fn execute(&mut self, name: &str, sql: &str) -> Result<QueryResult> {
        let conn = self
            .connections
            .get_mut(name)
            .ok_or_else(|| DbError::ConnectionNotFound(name.to_string()))?;

        debug!(connection = name, "executing statement");
        conn.session.execute(sql).map_err(|err| {
            debug!(connection = name, error = %err, "statement failed");
            err
        })
    }

    /// Table names of the named connection, in driver order. Empty when the
    /// connection is unknown or the driver fails.
    pub fn list_tables(&mut self, name: &str) -> Vec<String> {
        let Some(conn) = self.connections.get_mut(name) else {
            return Vec::new();
        };
        conn.session.list_tables().unwrap_or_else(|err| {
            warn!(connection = name, error = %err, "listing tables failed");
            Vec::new()
        })
    }

    /// Column names of `table`. Empty when either the connection or the
    /// table is missing.
    pub fn list_columns(&mut self, name: &str, table: &str) -> Vec<String> {
        let Some(conn) = self.connections.get_mut(name) else {
            return Vec::new();
        };
        conn.session.describe_table(table).unwrap_or_else(|err| {
            warn!(connection = name, table, error = %err, "describing table failed");
            Vec::new()
        })
    }

    /// Sorted names of the open connections.
    pub fn names(&self) -> Vec<String> {
        self.connections.keys().cloned().collect()
    }

    pub fn describe(&self, name: &str) -> Option<ConnectionInfo> {
        self.connections.get(name).map(Connection::info)
    }

    pub fn connections(&self) -> impl Iterator<Item = &Connection> + '_ {
        self.connections.values()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.connections.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Registry {
    fn drop(&mut self) {
        self.close_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Value;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Default)]
    struct Counters {
        opens: AtomicUsize,
        executes: AtomicUsize,
        closes: AtomicUsize,
    }

    /// Driver double that records every call it receives.
    struct CountingDriver {
        counters: Arc<Counters>,
        fail_open: bool,
    }

    struct CountingSession {
        counters: Arc<Counters>,
    }

    impl Session for CountingSession {
        fn execute(&mut self, sql: &str) -> Result<QueryResult> {
            self.counters.executes.fetch_add(1, Ordering::SeqCst);
            if sql.starts_with("FAIL") {
                return Err(DbError::driver("boom"));
            }
            Ok(QueryResult::new(vec!["sql".into()], vec![vec![Value::from(sql)]]))
        }

        fn list_tables(&mut self) -> Result<Vec<String>> {
            Err(DbError::driver("no catalog"))
        }

        fn describe_table(&mut self, table: &str) -> Result<Vec<String>> {
            Ok(if table == "t" { vec!["id".into()] } else { Vec::new() })
        }

        fn close(self: Box<Self>) -> Result<()> {
            self.counters.closes.fetch_add(1, Ordering::SeqCst);
            Err(DbError::driver("close always fails here"))
        }
    }

    impl Driver for CountingDriver {
        fn open(&self, _target: &ConnectionTarget) -> Result<Box<dyn Session>> {
            self.counters.opens.fetch_add(1, Ordering::SeqCst);
            if self.fail_open {
                return Err(DbError::driver("password authentication failed"));
            }
            Ok(Box::new(CountingSession {
                counters: Arc::clone(&self.counters),
            }))
        }
    }

    fn counting_registry(fail_open: bool) -> (Registry, Arc<Counters>) {
        let counters = Arc::new(Counters::default());
        let registry = Registry::with_driver(CountingDriver {
            counters: Arc::clone(&counters),
            fail_open,
        });
        (registry, counters)
    }

    #[test]
    fn test_empty_name_rejected() {
        let (mut registry, counters) = counting_registry(false);
        let err = registry.open("", ConnectionTarget::sqlite(":memory:")).unwrap_err();
        assert_eq!(err, DbError::InvalidName);
        assert_eq!(counters.opens.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_duplicate_name_does_not_reach_driver() {
        let (mut registry, counters) = counting_registry(false);
        registry.open("main", ConnectionTarget::sqlite("a.db")).unwrap();
        let err = registry.open("main", ConnectionTarget::sqlite("b.db")).unwrap_err();

        assert_eq!(err, DbError::DuplicateName("main".into()));
        assert_eq!(counters.opens.load(Ordering::SeqCst), 1);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.describe("main").unwrap().target, "a.db");
    }

    #[test]
    fn test_failed_open_leaves_registry_unchanged() {
        let (mut registry, _) = counting_registry(true);
        let target = ConnectionTarget::postgres("localhost", 5432, "app", "bob", "wrong");
        let err = registry.open("pg", target).unwrap_err();

        assert_eq!(err.to_string(), "password authentication failed");
        assert!(registry.is_empty());
        assert!(!registry.contains("pg"));
    }

    #[test]
    fn test_execute_unknown_name_never_contacts_driver() {
        let (mut registry, counters) = counting_registry(false);
        registry.open("main", ConnectionTarget::sqlite("a.db")).unwrap();

        let err = registry.execute("Main", "SELECT 1").unwrap_err();
        assert_eq!(err, DbError::ConnectionNotFound("Main".into()));
        assert_eq!(counters.executes.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_execute_forwards_sql_verbatim() {
        let (mut registry, counters) = counting_registry(false);
        registry.open("main", ConnectionTarget::sqlite("a.db")).unwrap();

        let sql = "  select 'x'; -- trailing comment";
        let result = registry.execute("main", sql).unwrap();
        assert_eq!(result.rows[0][0], Value::from(sql));
        assert_eq!(counters.executes.load(Ordering::SeqCst), 1);

        let err = registry.execute("main", "FAIL now").unwrap_err();
        assert_eq!(err, DbError::driver("boom"));
        assert_eq!(counters.executes.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_introspection_swallows_missing_and_failures() {
        let (mut registry, _) = counting_registry(false);
        registry.open("main", ConnectionTarget::sqlite("a.db")).unwrap();

        assert!(registry.list_tables("main").is_empty());
        assert!(registry.list_tables("other").is_empty());
        assert_eq!(registry.list_columns("main", "t"), vec!["id"]);
        assert!(registry.list_columns("main", "nope").is_empty());
        assert!(registry.list_columns("other", "t").is_empty());
    }

    #[test]
    fn test_close_is_synchronous_and_name_reusable() {
        let (mut registry, counters) = counting_registry(false);
        registry.open("main", ConnectionTarget::sqlite("a.db")).unwrap();
        registry.close("main");
        assert_eq!(counters.closes.load(Ordering::SeqCst), 1);
        assert!(registry.is_empty());

        registry.open("main", ConnectionTarget::sqlite("a.db")).unwrap();
        assert_eq!(registry.len(), 1);

        registry.close("absent");
        assert_eq!(counters.closes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_drop_closes_everything() {
        let (mut registry, counters) = counting_registry(false);
        registry.open("a", ConnectionTarget::sqlite("a.db")).unwrap();
        registry.open("b", ConnectionTarget::sqlite("b.db")).unwrap();
        assert_eq!(registry.names(), vec!["a", "b"]);

        drop(registry);
        assert_eq!(counters.closes.load(Ordering::SeqCst), 2);
    }
}
